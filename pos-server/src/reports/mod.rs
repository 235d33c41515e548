//! Order-item aggregation
//!
//! Builds the denormalized [`OrderItemReport`] of one order: its items with
//! food details, grouped by `(order_id, table_number)`.
//!
//! - [`pipeline`] - the ordered steps, pure functions over rows
//! - [`ReportSource`] - where the rows come from
//! - [`StoreReportSource`] - the SurrealDB-backed source

pub mod pipeline;

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use shared::models::{DiningTable, Food, Order, OrderItem, OrderItemReport};

use crate::db::DbService;
use crate::db::repository::{
    DiningTableRepository, FoodRepository, OrderItemRepository, OrderRepository, RepoResult,
};

/// Row lookups the aggregation needs
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Candidate items for an order
    async fn order_items(&self, order_id: &str) -> RepoResult<Vec<OrderItem>>;
    async fn foods(&self, ids: &[String]) -> RepoResult<Vec<Food>>;
    async fn orders(&self, ids: &[String]) -> RepoResult<Vec<Order>>;
    async fn tables(&self, ids: &[String]) -> RepoResult<Vec<DiningTable>>;
}

/// [`ReportSource`] over the repositories
#[derive(Clone)]
pub struct StoreReportSource {
    items: OrderItemRepository,
    foods: FoodRepository,
    orders: OrderRepository,
    tables: DiningTableRepository,
}

impl StoreReportSource {
    pub fn new(db: &DbService) -> Self {
        Self {
            items: OrderItemRepository::new(db),
            foods: FoodRepository::new(db),
            orders: OrderRepository::new(db),
            tables: DiningTableRepository::new(db),
        }
    }
}

#[async_trait]
impl ReportSource for StoreReportSource {
    async fn order_items(&self, order_id: &str) -> RepoResult<Vec<OrderItem>> {
        self.items.find_by_order(order_id).await
    }

    async fn foods(&self, ids: &[String]) -> RepoResult<Vec<Food>> {
        self.foods.find_by_ids(ids).await
    }

    async fn orders(&self, ids: &[String]) -> RepoResult<Vec<Order>> {
        self.orders.find_by_ids(ids).await
    }

    async fn tables(&self, ids: &[String]) -> RepoResult<Vec<DiningTable>> {
        self.tables.find_by_ids(ids).await
    }
}

/// Run the aggregation for one order
///
/// The order id is not validated; an unknown id yields no reports.
pub async fn order_item_report<S: ReportSource + ?Sized>(
    source: &S,
    order_id: &str,
) -> RepoResult<Vec<OrderItemReport>> {
    let items = pipeline::filter(source.order_items(order_id).await?, order_id);
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let food_ids = distinct(items.iter().map(|i| i.food_id.as_str()));
    let order_ids = distinct(items.iter().map(|i| i.order_id.as_str()));
    let (foods, orders) =
        futures::try_join!(source.foods(&food_ids), source.orders(&order_ids))?;
    let foods: HashMap<String, Food> = foods.into_iter().map(|f| (f.food_id.clone(), f)).collect();
    let orders: HashMap<String, Order> =
        orders.into_iter().map(|o| (o.order_id.clone(), o)).collect();

    let table_ids = distinct(orders.values().filter_map(|o| o.table_id.as_deref()));
    let tables: HashMap<String, DiningTable> = source
        .tables(&table_ids)
        .await?
        .into_iter()
        .map(|t| (t.table_id.clone(), t))
        .collect();

    let rows = pipeline::join_food(items, &foods);
    let rows = pipeline::join_order(rows, &orders);
    let rows = pipeline::join_table(rows, &tables);
    let projected = pipeline::project(rows);
    let groups = pipeline::group(projected);
    Ok(pipeline::finish(groups))
}

fn distinct<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    ids.collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}
