//! 工具模块 - 日志、提取器、分页

pub mod extract;
pub mod logger;
pub mod types;

pub use extract::{RequestDb, ValidJson};
pub use types::{PageWindow, PaginationParams};
