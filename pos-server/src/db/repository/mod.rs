//! Repository Module
//!
//! CRUD operations for the SurrealDB collections.
//!
//! Records are addressed by their domain identifier field (`food_id`,
//! `order_id`, ...), never by the store's own record key. Every store call
//! goes through [`BaseRepository::run`], bounded by the request deadline of
//! the [`DbService`] the repository was built from.
//! Collection names are backtick-quoted in queries (`order` is a keyword).

pub mod dining_table;
pub mod food;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod user;

// Re-exports
pub use dining_table::DiningTableRepository;
pub use food::FoodRepository;
pub use invoice::InvoiceRepository;
pub use menu::MenuRepository;
pub use order::OrderRepository;
pub use order_item::OrderItemRepository;
pub use user::UserRepository;

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use shared::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::db::DbService;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Timed out after {0} ms")]
    Timeout(u64),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Database(msg) => AppError::Database(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Timeout(ms) => AppError::Timeout(ms),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Deserialize)]
struct CountRow {
    count: u64,
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
    timeout: Duration,
    deadline: Instant,
}

impl BaseRepository {
    pub fn new(service: &DbService) -> Self {
        Self {
            db: service.db.clone(),
            timeout: service.timeout,
            deadline: service.deadline(),
        }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Run one store call; fails once the request deadline has passed
    pub async fn run<T, F>(&self, fut: F) -> RepoResult<T>
    where
        F: Future<Output = RepoResult<T>>,
    {
        match tokio::time::timeout_at(self.deadline, fut).await {
            Ok(result) => result,
            Err(_) => {
                let ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                tracing::warn!(timeout_ms = ms, "Request window exceeded");
                Err(RepoError::Timeout(ms))
            }
        }
    }

    /// `SELECT *` over a whole collection, oldest first
    pub async fn find_all<T: DeserializeOwned>(&self, table: &'static str) -> RepoResult<Vec<T>> {
        self.run(async {
            let rows: Vec<T> = self
                .db
                .query(format!("SELECT * FROM `{table}` ORDER BY created_at ASC"))
                .await?
                .take(0)?;
            Ok(rows)
        })
        .await
    }

    /// One record by its identifier field
    pub async fn find_one<T: DeserializeOwned>(
        &self,
        table: &'static str,
        field: &'static str,
        id: &str,
    ) -> RepoResult<Option<T>> {
        let id = id.to_string();
        self.run(async {
            let rows: Vec<T> = self
                .db
                .query(format!("SELECT * FROM `{table}` WHERE {field} = $id LIMIT 1"))
                .bind(("id", id))
                .await?
                .take(0)?;
            Ok(rows.into_iter().next())
        })
        .await
    }

    /// Every record whose `field` is one of `ids`
    pub async fn find_in<T: DeserializeOwned>(
        &self,
        table: &'static str,
        field: &'static str,
        ids: &[String],
    ) -> RepoResult<Vec<T>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = ids.to_vec();
        self.run(async {
            let rows: Vec<T> = self
                .db
                .query(format!("SELECT * FROM `{table}` WHERE {field} IN $ids"))
                .bind(("ids", ids))
                .await?
                .take(0)?;
            Ok(rows)
        })
        .await
    }

    /// Does any record have `field = value`
    pub async fn exists(
        &self,
        table: &'static str,
        field: &'static str,
        value: &str,
    ) -> RepoResult<bool> {
        let value = value.to_string();
        self.run(async {
            let rows: Vec<CountRow> = self
                .db
                .query(format!(
                    "SELECT count() AS count FROM `{table}` WHERE {field} = $value GROUP ALL"
                ))
                .bind(("value", value))
                .await?
                .take(0)?;
            Ok(rows.first().map(|r| r.count).unwrap_or(0) > 0)
        })
        .await
    }

    /// Number of records in a collection
    pub async fn count(&self, table: &'static str) -> RepoResult<u64> {
        self.run(async {
            let rows: Vec<CountRow> = self
                .db
                .query(format!("SELECT count() AS count FROM `{table}` GROUP ALL"))
                .await?
                .take(0)?;
            Ok(rows.first().map(|r| r.count).unwrap_or(0))
        })
        .await
    }

    /// A window of a collection, oldest first
    pub async fn page<T: DeserializeOwned>(
        &self,
        table: &'static str,
        start: u64,
        limit: u64,
    ) -> RepoResult<Vec<T>> {
        self.run(async {
            let rows: Vec<T> = self
                .db
                .query(format!(
                    "SELECT * FROM `{table}` ORDER BY created_at ASC LIMIT $limit START $start"
                ))
                .bind(("limit", limit))
                .bind(("start", start))
                .await?
                .take(0)?;
            Ok(rows)
        })
        .await
    }

    /// Insert one record and return it as stored
    pub async fn insert<T>(&self, table: &'static str, record: T) -> RepoResult<T>
    where
        T: serde::Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        self.run(async {
            let created: Option<T> = self.db.create(table).content(record).await?;
            created.ok_or_else(|| RepoError::Database(format!("Failed to create {table}")))
        })
        .await
    }

    /// Merge `patch` into the record with `field = id`
    ///
    /// Returns `None` when no record matches; nothing is created.
    pub async fn merge<T: DeserializeOwned>(
        &self,
        table: &'static str,
        field: &'static str,
        id: &str,
        patch: serde_json::Value,
    ) -> RepoResult<Option<T>> {
        let id = id.to_string();
        self.run(async {
            let rows: Vec<T> = self
                .db
                .query(format!(
                    "UPDATE `{table}` MERGE $data WHERE {field} = $id RETURN AFTER"
                ))
                .bind(("data", patch))
                .bind(("id", id))
                .await?
                .take(0)?;
            Ok(rows.into_iter().next())
        })
        .await
    }

    /// Delete the records with `field = id`
    pub async fn delete(&self, table: &'static str, field: &'static str, id: &str) -> RepoResult<()> {
        let id = id.to_string();
        self.run(async {
            self.db
                .query(format!("DELETE `{table}` WHERE {field} = $id"))
                .bind(("id", id))
                .await?
                .check()?;
            Ok(())
        })
        .await
    }
}

/// Unwrap a field the payload validator already marked as required
pub fn required<T>(value: Option<T>, field: &str) -> RepoResult<T> {
    value.ok_or_else(|| RepoError::Validation(format!("{field} is required")))
}

/// Serialize an update payload into a merge patch stamped with `updated_at`
///
/// Absent fields are skipped by the payload's serde attributes, so they
/// never overwrite stored values.
pub fn patch_with_timestamp<U: serde::Serialize>(update: &U) -> RepoResult<serde_json::Value> {
    let mut patch = serde_json::to_value(update)
        .map_err(|e| RepoError::Validation(format!("Invalid update payload: {e}")))?;
    match patch.as_object_mut() {
        Some(map) => {
            map.insert(
                "updated_at".to_string(),
                serde_json::to_value(shared::util::now())
                    .map_err(|e| RepoError::Database(e.to_string()))?,
            );
            Ok(patch)
        }
        None => Err(RepoError::Validation("Update payload must be an object".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::FoodUpdate;

    #[test]
    fn test_patch_skips_absent_fields() {
        let update = FoodUpdate {
            name: Some("Pho".into()),
            ..Default::default()
        };
        let patch = patch_with_timestamp(&update).unwrap();
        let map = patch.as_object().unwrap();
        assert_eq!(map["name"], "Pho");
        assert!(map.contains_key("updated_at"));
        assert!(!map.contains_key("price"));
        assert!(!map.contains_key("menu_id"));
    }

    #[test]
    fn test_repo_error_maps_to_status() {
        use axum::http::StatusCode;
        assert_eq!(AppError::from(RepoError::NotFound("x".into())).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::from(RepoError::Duplicate("x".into())).status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::from(RepoError::Timeout(5)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    fn scoped(window: Duration) -> DbService {
        DbService::from_handle(Surreal::init(), window).for_request()
    }

    async fn stall(ms: u64) -> RepoResult<()> {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok(())
    }

    #[tokio::test]
    async fn test_calls_share_one_request_window() {
        let db = scoped(Duration::from_millis(200));
        let repo = BaseRepository::new(&db);

        assert!(repo.run(stall(130)).await.is_ok());
        let err = repo.run(stall(130)).await.unwrap_err();
        assert!(matches!(err, RepoError::Timeout(200)), "{err}");
    }

    #[tokio::test]
    async fn test_repositories_of_one_request_share_deadline() {
        let db = scoped(Duration::from_millis(200));

        let first = BaseRepository::new(&db);
        assert!(first.run(stall(130)).await.is_ok());

        // built later, same deadline
        let second = BaseRepository::new(&db);
        assert!(matches!(
            second.run(stall(130)).await,
            Err(RepoError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_each_request_gets_its_own_window() {
        let shared = DbService::from_handle(Surreal::init(), Duration::from_millis(200));

        let a = BaseRepository::new(&shared.for_request());
        assert!(a.run(stall(130)).await.is_ok());
        let b = BaseRepository::new(&shared.for_request());
        assert!(b.run(stall(130)).await.is_ok());
    }
}
