use chrono::{DateTime, Utc};

/// 获取当前 UTC 时间
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Generate a fresh record identifier.
///
/// UUID v4 in simple (32 hex chars) form. Identifiers are opaque to clients.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
