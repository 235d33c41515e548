//! Food Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Food entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub food_id: String,
    pub name: String,
    /// Price in currency unit, rounded to 2 decimals
    pub price: f64,
    pub food_image: String,
    /// Menu reference
    pub menu_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create food payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FoodCreate {
    #[validate(required, length(min = 2, max = 100))]
    pub name: Option<String>,
    #[validate(required)]
    pub price: Option<f64>,
    #[validate(required, length(min = 1, max = 2048))]
    pub food_image: Option<String>,
    #[validate(required, length(min = 1))]
    pub menu_id: Option<String>,
}

/// Update food payload (absent fields are left untouched)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FoodUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 2048))]
    pub food_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub menu_id: Option<String>,
}

/// One page of foods (`GET /foods`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodPage {
    pub total_count: u64,
    pub food_items: Vec<Food>,
}
