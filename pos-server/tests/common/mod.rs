//! Test harness: an app over an embedded store in a temp dir

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use pos_server::db::DbService;
use pos_server::{Config, ServerState, build_app};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "integration-test-secret-integration-test";

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    _dir: Arc<TempDir>,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(dir.path().to_string_lossy(), JWT_SECRET);
        let db = DbService::open(
            config.database_dir(),
            "test",
            "test",
            Duration::from_secs(30),
        )
        .await
        .unwrap();
        let state = ServerState::new(config, db);
        let app = build_app(&state).with_state(state.clone());
        Self {
            app,
            state,
            _dir: Arc::new(dir),
        }
    }

    /// Same store, but every request gets `window` to finish its store calls
    pub fn with_window(&self, window: Duration) -> Self {
        let db = DbService::from_handle(self.state.db.db.clone(), window);
        let state = ServerState::new(self.state.config.clone(), db);
        let app = build_app(&state).with_state(state.clone());
        Self {
            app,
            state,
            _dir: Arc::clone(&self._dir),
        }
    }

    /// Run raw SurrealQL against the store (schema faults for failure tests)
    pub async fn exec(&self, sql: &str) {
        self.state
            .db
            .db
            .query(sql.to_string())
            .await
            .unwrap()
            .check()
            .unwrap();
    }

    /// Send a request; returns status and JSON body (`Null` when empty)
    pub async fn call(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    /// Sign up a fresh user and return its access token
    pub async fn signup(&self, email: &str, phone: &str) -> (StatusCode, Value) {
        self.call(
            "POST",
            "/users/signup",
            None,
            Some(json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": email,
                "password": "correct-horse",
                "phone": phone,
            })),
        )
        .await
    }

    pub async fn token(&self) -> String {
        let (status, body) = self.signup("staff@example.com", "5550100").await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Menu, food and table ready for ordering; returns (food_id, table_id)
    pub async fn seed_catalog(&self, token: &str, food_price: f64) -> (String, String) {
        let (status, menu) = self
            .call(
                "POST",
                "/menus",
                Some(token),
                Some(json!({
                    "name": "Dinner",
                    "category": "Mains",
                    "start_date": "2026-01-01T00:00:00Z",
                    "end_date": "2026-12-31T00:00:00Z",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{menu}");

        let (status, food) = self
            .call(
                "POST",
                "/foods",
                Some(token),
                Some(json!({
                    "name": "Pho",
                    "price": food_price,
                    "food_image": "https://img.example/pho.png",
                    "menu_id": menu["menu_id"],
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{food}");

        let (status, table) = self
            .call(
                "POST",
                "/tables",
                Some(token),
                Some(json!({"table_number": 7, "number_of_guests": 4})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{table}");

        (
            food["food_id"].as_str().unwrap().to_string(),
            table["table_id"].as_str().unwrap().to_string(),
        )
    }
}
