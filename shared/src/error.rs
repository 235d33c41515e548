//! Unified error type
//!
//! Every handler returns [`AppResult`]. Errors render as
//! `{"error": "<message>"}` with the status code of their category:
//!
//! | Category | Status |
//! |------|--------|
//! | Validation | 400 |
//! | Unauthorized / InvalidToken / TokenExpired / InvalidCredentials | 401 |
//! | NotFound | 404 |
//! | Conflict | 409 |
//! | Database / Timeout / Internal | 500 |
//!
//! Server-side details of 5xx errors are logged, not returned.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// JSON error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Client errors (4xx) ==========
    #[error("Validation failed: {0}")]
    /// Malformed input (400)
    Validation(String),

    #[error("Authentication required")]
    /// Missing credentials (401)
    Unauthorized,

    #[error("Invalid token: {0}")]
    /// Bad or tampered token (401)
    InvalidToken(String),

    #[error("Token expired")]
    /// 令牌过期 (401)
    TokenExpired,

    #[error("Invalid credentials")]
    /// Login failure, same message for unknown email and wrong password (401)
    InvalidCredentials,

    #[error("Resource not found: {0}")]
    /// Record or referenced record missing (404)
    NotFound(String),

    #[error("Resource already exists: {0}")]
    /// Uniqueness violation (409)
    Conflict(String),

    // ========== Server errors (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Request window of {0} ms exceeded")]
    Timeout(u64),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Handler result type
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized
            | Self::InvalidToken(_)
            | Self::TokenExpired
            | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Timeout(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message returned to the client
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::NotFound(msg) | Self::Conflict(msg) => msg.clone(),
            Self::Unauthorized => "Authentication required".to_string(),
            Self::InvalidToken(_) => "Invalid token".to_string(),
            Self::TokenExpired => "Token expired".to_string(),
            Self::InvalidCredentials => "email or password is incorrect".to_string(),
            Self::Database(_) => "Database error".to_string(),
            Self::Timeout(_) => "Request timed out".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
            }
            AppError::Timeout(ms) => {
                error!(target: "database", timeout_ms = ms, "Store call timed out");
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
            }
            _ => {}
        }

        let body = Json(ErrorBody {
            error: self.client_message(),
        });
        (self.status(), body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}
