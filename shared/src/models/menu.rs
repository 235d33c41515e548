//! Menu Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Menu entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub menu_id: String,
    pub name: String,
    pub category: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create menu payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MenuCreate {
    #[validate(required, length(min = 2, max = 100))]
    pub name: Option<String>,
    #[validate(required, length(min = 3, max = 50))]
    pub category: Option<String>,
    #[validate(required)]
    pub start_date: Option<DateTime<Utc>>,
    #[validate(required)]
    pub end_date: Option<DateTime<Utc>>,
}

/// Update menu payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MenuUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 50))]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

/// A menu's active window must be non-empty
pub fn is_valid_span(start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    end > start
}
