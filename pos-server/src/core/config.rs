use std::path::PathBuf;
use std::time::Duration;

use crate::auth::{JwtConfig, JwtError};

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (database, logs) |
/// | PORT | 8000 | HTTP 服务端口 |
/// | DB_NAMESPACE | restaurant | SurrealDB namespace |
/// | DB_NAME | pos | SurrealDB database |
/// | REQUEST_TIMEOUT_MS | 100000 | 每个请求的存储等待窗口(毫秒) |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (unset) | 日志文件目录 |
/// | JWT_SECRET | (dev only fallback) | JWT 密钥 |
/// | JWT_EXPIRATION_HOURS | 24 | 访问令牌有效期 |
/// | JWT_REFRESH_EXPIRATION_HOURS | 168 | 刷新令牌有效期 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/pos PORT=9000 cargo run -p pos-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    pub db_namespace: String,
    pub db_name: String,
    /// 每个请求的存储等待窗口 (毫秒)
    pub request_timeout_ms: u64,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// JWT 认证配置
    pub jwt: JwtConfig,
}

impl Config {
    /// 从环境变量加载配置 (仅在 JWT 密钥不可用时失败)
    pub fn from_env() -> Result<Self, JwtError> {
        Ok(Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            db_namespace: std::env::var("DB_NAMESPACE").unwrap_or_else(|_| "restaurant".into()),
            db_name: std::env::var("DB_NAME").unwrap_or_else(|_| "pos".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(100_000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            jwt: JwtConfig::from_env()?,
        })
    }

    /// Configuration rooted at `work_dir` with a fixed JWT secret (tests)
    pub fn with_overrides(work_dir: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port: 0,
            db_namespace: "restaurant".into(),
            db_name: "pos".into(),
            request_timeout_ms: 100_000,
            environment: "test".into(),
            log_level: "info".into(),
            log_dir: None,
            jwt: JwtConfig::with_secret(jwt_secret),
        }
    }

    /// Database directory under the work dir
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
