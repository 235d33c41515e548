//! Order item report rows
//!
//! Output of the order-item aggregation pipeline: one report per
//! `(order_id, table_number)` group, with the line items denormalized.

use serde::{Deserialize, Serialize};

use super::order_item::Quantity;

/// One line item with its food resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    pub order_item_id: String,
    pub food_id: String,
    pub quantity: Quantity,
    pub unit_price: f64,
    pub food_name: Option<String>,
    pub food_image: Option<String>,
    /// Food list price
    pub price: Option<f64>,
    /// Line amount (the food price; absent when the food is missing)
    pub amount: Option<f64>,
}

/// Aggregated order report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemReport {
    pub table_id: Option<String>,
    pub order_id: Option<String>,
    pub table_number: Option<i32>,
    pub total_count: u32,
    pub order_items: Vec<ReportLine>,
    pub total_amount: f64,
}
