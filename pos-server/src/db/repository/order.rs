//! Order Repository

use super::{BaseRepository, RepoError, RepoResult, dining_table, patch_with_timestamp, required};
use crate::db::DbService;
use shared::models::{Order, OrderCreate, OrderUpdate};
use shared::util::{new_id, now};

pub const TABLE: &str = "order";
pub const ID_FIELD: &str = "order_id";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all orders
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        self.base.find_all(TABLE).await
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        self.base.find_one(TABLE, ID_FIELD, id).await
    }

    /// Find every order whose id is in `ids`
    pub async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Order>> {
        self.base.find_in(TABLE, ID_FIELD, ids).await
    }

    /// Does an order with this id exist
    pub async fn exists(&self, id: &str) -> RepoResult<bool> {
        self.base.exists(TABLE, ID_FIELD, id).await
    }

    /// Create an order from the API; the table must exist
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        let table_id = required(data.table_id, "table_id")?;
        self.ensure_table(&table_id).await?;

        let now = now();
        let order = Order {
            order_id: new_id(),
            table_id: Some(table_id),
            order_date: data.order_date.unwrap_or(now),
            created_at: now,
            updated_at: now,
        };

        self.base.insert(TABLE, order).await
    }

    /// Create the order that a batch of order items will reference
    ///
    /// No validation is done on `table_id`. Returns the new order id.
    pub async fn create_for_items(&self, table_id: Option<String>) -> RepoResult<String> {
        let now = now();
        let order = Order {
            order_id: new_id(),
            table_id,
            order_date: now,
            created_at: now,
            updated_at: now,
        };

        let created = self.base.insert(TABLE, order).await?;
        Ok(created.order_id)
    }

    /// Update an order; a changed table reference must exist
    pub async fn update(&self, id: &str, data: OrderUpdate) -> RepoResult<Order> {
        if let Some(table_id) = &data.table_id {
            self.ensure_table(table_id).await?;
        }

        let patch = patch_with_timestamp(&data)?;
        self.base
            .merge(TABLE, ID_FIELD, id, patch)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
    }

    /// Delete an order (batch creation compensation only)
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        self.base.delete(TABLE, ID_FIELD, id).await
    }

    async fn ensure_table(&self, table_id: &str) -> RepoResult<()> {
        if self
            .base
            .exists(dining_table::TABLE, dining_table::ID_FIELD, table_id)
            .await?
        {
            Ok(())
        } else {
            Err(RepoError::NotFound(format!("Table {table_id} not found")))
        }
    }
}
