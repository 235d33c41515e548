//! Dining Table Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Dining table entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub table_id: String,
    pub table_number: i32,
    /// Seating capacity
    pub number_of_guests: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create dining table payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DiningTableCreate {
    #[validate(required)]
    pub table_number: Option<i32>,
    #[validate(required, range(min = 1))]
    pub number_of_guests: Option<i32>,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DiningTableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub number_of_guests: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guests_must_be_positive() {
        let payload: DiningTableCreate =
            serde_json::from_str(r#"{"table_number": 4, "number_of_guests": 0}"#).unwrap();
        assert!(payload.validate().is_err());

        let payload: DiningTableCreate =
            serde_json::from_str(r#"{"table_number": 4, "number_of_guests": 6}"#).unwrap();
        assert!(payload.validate().is_ok());
    }
}
