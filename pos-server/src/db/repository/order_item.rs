//! Order Item Repository

use super::{BaseRepository, RepoError, RepoResult, patch_with_timestamp};
use crate::db::DbService;
use shared::models::{OrderItem, OrderItemUpdate};
use shared::money::round_price;

pub const TABLE: &str = "order_item";
const ID_FIELD: &str = "order_item_id";

#[derive(Clone)]
pub struct OrderItemRepository {
    base: BaseRepository,
}

impl OrderItemRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all order items
    pub async fn find_all(&self) -> RepoResult<Vec<OrderItem>> {
        self.base.find_all(TABLE).await
    }

    /// Find order item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<OrderItem>> {
        self.base.find_one(TABLE, ID_FIELD, id).await
    }

    /// Find the items of one order, oldest first
    pub async fn find_by_order(&self, order_id: &str) -> RepoResult<Vec<OrderItem>> {
        let order_id = order_id.to_string();
        self.base
            .run(async {
                let items: Vec<OrderItem> = self
                    .base
                    .db()
                    .query("SELECT * FROM order_item WHERE order_id = $order_id ORDER BY created_at ASC")
                    .bind(("order_id", order_id))
                    .await?
                    .take(0)?;
                Ok(items)
            })
            .await
    }

    /// Insert a batch of items in one statement
    ///
    /// Returns the identifiers of the stored items in input order.
    pub async fn insert_many(&self, items: Vec<OrderItem>) -> RepoResult<Vec<String>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let expected = items.len();
        let ids: Vec<String> = items.iter().map(|i| i.order_item_id.clone()).collect();

        let stored: Vec<OrderItem> = self
            .base
            .run(async {
                let stored: Vec<OrderItem> = self
                    .base
                    .db()
                    .query("INSERT INTO order_item $items")
                    .bind(("items", items))
                    .await?
                    .take(0)?;
                Ok(stored)
            })
            .await?;

        ensure_all_stored(expected, stored.len())?;
        Ok(ids)
    }

    /// Update an order item
    pub async fn update(&self, id: &str, mut data: OrderItemUpdate) -> RepoResult<OrderItem> {
        if let Some(food_id) = &data.food_id
            && food_id.trim().is_empty()
        {
            return Err(RepoError::Validation("food_id must not be empty".to_string()));
        }
        if let Some(price) = data.unit_price {
            if !price.is_finite() {
                return Err(RepoError::Validation(
                    "unit_price must be a finite number".to_string(),
                ));
            }
            data.unit_price = Some(round_price(price));
        }

        let patch = patch_with_timestamp(&data)?;
        self.base
            .merge(TABLE, ID_FIELD, id, patch)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order item {id} not found")))
    }
}

/// A batch insert that stored fewer rows than it was given is a failure
fn ensure_all_stored(expected: usize, stored: usize) -> RepoResult<()> {
    if stored == expected {
        Ok(())
    } else {
        Err(RepoError::Database(format!(
            "Batch insert stored {stored} of {expected} order items"
        )))
    }
}
