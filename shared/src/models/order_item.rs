//! Order Item Model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// Portion size of an order line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    S,
    M,
    L,
}

impl Quantity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::S => "S",
            Quantity::M => "M",
            Quantity::L => "L",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quantity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "S" => Ok(Quantity::S),
            "M" => Ok(Quantity::M),
            "L" => Ok(Quantity::L),
            other => Err(AppError::validation(format!(
                "quantity must be one of S, M, L (got {other:?})"
            ))),
        }
    }
}

/// Order item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_item_id: String,
    pub order_id: String,
    pub food_id: String,
    pub quantity: Quantity,
    pub unit_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of a batch creation request
///
/// Fields stay loose here so that a bad line can be reported by index
/// instead of failing the whole body at deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderItemInput {
    pub food_id: Option<String>,
    pub quantity: Option<String>,
    pub unit_price: Option<f64>,
}

/// A line that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidOrderLine {
    pub food_id: String,
    pub quantity: Quantity,
    pub unit_price: f64,
}

impl OrderItemInput {
    /// Check a single line; `index` is the position in the request
    pub fn validate(&self, index: usize) -> Result<ValidOrderLine, AppError> {
        let food_id = match self.food_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                return Err(AppError::validation(format!(
                    "order_items[{index}]: food_id is required"
                )));
            }
        };

        let quantity = match self.quantity.as_deref() {
            Some(q) => q.parse::<Quantity>().map_err(|_| {
                AppError::validation(format!(
                    "order_items[{index}]: quantity must be one of S, M, L"
                ))
            })?,
            None => {
                return Err(AppError::validation(format!(
                    "order_items[{index}]: quantity is required"
                )));
            }
        };

        let unit_price = match self.unit_price {
            Some(p) if p.is_finite() => p,
            Some(_) => {
                return Err(AppError::validation(format!(
                    "order_items[{index}]: unit_price must be a finite number"
                )));
            }
            None => {
                return Err(AppError::validation(format!(
                    "order_items[{index}]: unit_price is required"
                )));
            }
        };

        Ok(ValidOrderLine {
            food_id,
            quantity,
            unit_price,
        })
    }
}

/// Batch creation payload (`POST /orderItems`)
///
/// Lines are checked one by one by [`OrderItemInput::validate`].
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderItemPack {
    pub table_id: Option<String>,
    #[serde(default)]
    pub order_items: Vec<OrderItemInput>,
}

/// Batch creation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemBatchResult {
    pub order_id: String,
    pub inserted_ids: Vec<String>,
}

/// Update order item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OrderItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub food_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(food: Option<&str>, qty: Option<&str>, price: Option<f64>) -> OrderItemInput {
        OrderItemInput {
            food_id: food.map(String::from),
            quantity: qty.map(String::from),
            unit_price: price,
        }
    }

    #[test]
    fn test_quantity_tokens() {
        assert_eq!("S".parse::<Quantity>().unwrap(), Quantity::S);
        assert_eq!("M".parse::<Quantity>().unwrap(), Quantity::M);
        assert_eq!("L".parse::<Quantity>().unwrap(), Quantity::L);
        assert!("XL".parse::<Quantity>().is_err());
        assert!("s".parse::<Quantity>().is_err());
        assert_eq!(Quantity::M.to_string(), "M");
    }

    #[test]
    fn test_quantity_serde() {
        let q: Quantity = serde_json::from_str("\"L\"").unwrap();
        assert_eq!(q, Quantity::L);
        assert!(serde_json::from_str::<Quantity>("\"XXL\"").is_err());
        assert_eq!(serde_json::to_string(&Quantity::S).unwrap(), "\"S\"");
    }

    #[test]
    fn test_valid_line() {
        let ok = line(Some("f1"), Some("M"), Some(5.005)).validate(0).unwrap();
        assert_eq!(ok.food_id, "f1");
        assert_eq!(ok.quantity, Quantity::M);
        // Rounding happens when the item is built, not here
        assert_eq!(ok.unit_price, 5.005);
    }

    #[test]
    fn test_invalid_lines_name_their_index() {
        let cases = [
            line(None, Some("S"), Some(1.0)),
            line(Some("  "), Some("S"), Some(1.0)),
            line(Some("f1"), None, Some(1.0)),
            line(Some("f1"), Some("XL"), Some(1.0)),
            line(Some("f1"), Some("S"), None),
            line(Some("f1"), Some("S"), Some(f64::NAN)),
        ];
        for case in cases {
            let err = case.validate(3).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
            assert!(err.to_string().contains("order_items[3]"), "{err}");
        }
    }

    #[test]
    fn test_pack_defaults_to_empty_lines() {
        let pack: OrderItemPack = serde_json::from_str(r#"{"table_id": "t1"}"#).unwrap();
        assert_eq!(pack.table_id.as_deref(), Some("t1"));
        assert!(pack.order_items.is_empty());
    }
}
