//! Order-item batch creation
//!
//! Placing an order creates one [`Order`](shared::models::Order) and all of
//! its items in a single request:
//!
//! 1. validate every line (nothing is written on failure)
//! 2. create the order
//! 3. insert every item in one statement
//!
//! There are no multi-document transactions. If step 3 fails the order is
//! deleted again on a best-effort basis and the store error is returned.
//! All three steps and the cleanup share the request window of the
//! [`DbService`] they are given; an expired window fails the cleanup too,
//! which is logged.

use shared::models::{OrderItem, OrderItemBatchResult, OrderItemPack, ValidOrderLine};
use shared::money::round_price;
use shared::util::{new_id, now};
use shared::{AppError, AppResult};

use crate::db::DbService;
use crate::db::repository::{OrderItemRepository, OrderRepository};

/// Validate all lines, reporting the first bad one by index
pub fn validate_lines(pack: &OrderItemPack) -> AppResult<Vec<ValidOrderLine>> {
    if pack.order_items.is_empty() {
        return Err(AppError::validation("order_items must not be empty"));
    }
    pack.order_items
        .iter()
        .enumerate()
        .map(|(index, line)| line.validate(index))
        .collect()
}

/// Build the items of a new order
pub fn build_items(order_id: &str, lines: Vec<ValidOrderLine>) -> Vec<OrderItem> {
    let now = now();
    lines
        .into_iter()
        .map(|line| OrderItem {
            order_item_id: new_id(),
            order_id: order_id.to_string(),
            food_id: line.food_id,
            quantity: line.quantity,
            unit_price: round_price(line.unit_price),
            created_at: now,
            updated_at: now,
        })
        .collect()
}

/// Create an order and its items
pub async fn create_order_items(
    db: &DbService,
    pack: OrderItemPack,
) -> AppResult<OrderItemBatchResult> {
    let lines = validate_lines(&pack)?;

    let orders = OrderRepository::new(db);
    let order_id = orders.create_for_items(pack.table_id).await?;

    let items = build_items(&order_id, lines);
    let count = items.len();

    match OrderItemRepository::new(db).insert_many(items).await {
        Ok(inserted_ids) => {
            tracing::info!(order_id = %order_id, items = count, "Order items created");
            Ok(OrderItemBatchResult {
                order_id,
                inserted_ids,
            })
        }
        Err(e) => {
            tracing::error!(order_id = %order_id, error = %e, "Batch insert failed, removing order");
            if let Err(cleanup) = orders.delete(&order_id).await {
                tracing::error!(
                    order_id = %order_id,
                    error = %cleanup,
                    "Failed to remove order after batch insert failure"
                );
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{OrderItemInput, Quantity};

    fn pack(lines: Vec<OrderItemInput>) -> OrderItemPack {
        OrderItemPack {
            table_id: Some("t1".into()),
            order_items: lines,
        }
    }

    fn input(food: &str, qty: &str, price: f64) -> OrderItemInput {
        OrderItemInput {
            food_id: Some(food.into()),
            quantity: Some(qty.into()),
            unit_price: Some(price),
        }
    }

    #[test]
    fn test_empty_pack_rejected() {
        let err = validate_lines(&pack(vec![])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_first_bad_line_reported() {
        let err = validate_lines(&pack(vec![
            input("f1", "S", 1.0),
            input("f2", "XL", 1.0),
            input("", "M", 1.0),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("order_items[1]"), "{err}");
    }

    #[test]
    fn test_build_items_rounds_and_links() {
        let lines = validate_lines(&pack(vec![input("f1", "S", 5.005), input("f2", "L", 5.004)]))
            .unwrap();
        let items = build_items("o1", lines);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.order_id == "o1"));
        assert_eq!(items[0].unit_price, 5.01);
        assert_eq!(items[1].unit_price, 5.0);
        assert_eq!(items[1].quantity, Quantity::L);
        assert_ne!(items[0].order_item_id, items[1].order_item_id);
    }
}
