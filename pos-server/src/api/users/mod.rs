//! User API 模块
//!
//! `/users/signup` 和 `/users/login` 公开，其余路由需要令牌。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/signup", post(handler::signup))
        .route("/login", post(handler::login))
        .route("/{user_id}", get(handler::get_by_id))
}
