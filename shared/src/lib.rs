//! Shared types for the restaurant POS
//!
//! Entities, request payloads and report rows exchanged between the
//! server and its clients, plus the error type every handler returns.

pub mod error;
pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use axum::Json;
pub use error::{AppError, AppResult, ErrorBody};
pub use serde::{Deserialize, Serialize};
