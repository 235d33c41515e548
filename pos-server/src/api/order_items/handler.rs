//! Order Item API Handlers

use axum::{Json, extract::Path};
use shared::models::{
    OrderItem, OrderItemBatchResult, OrderItemPack, OrderItemReport, OrderItemUpdate,
};
use shared::{AppError, AppResult};

use crate::db::repository::OrderItemRepository;
use crate::orders::create_order_items;
use crate::reports::{StoreReportSource, order_item_report};
use crate::utils::{RequestDb, ValidJson};

/// GET /orderItems - 获取所有订单明细
pub async fn list(RequestDb(db): RequestDb) -> AppResult<Json<Vec<OrderItem>>> {
    let repo = OrderItemRepository::new(&db);
    let items = repo.find_all().await?;
    Ok(Json(items))
}

/// GET /orderItems/{order_item_id} - 获取单个订单明细
pub async fn get_by_id(
    RequestDb(db): RequestDb,
    Path(order_item_id): Path<String>,
) -> AppResult<Json<OrderItem>> {
    let repo = OrderItemRepository::new(&db);
    let item = repo
        .find_by_id(&order_item_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order item {} not found", order_item_id)))?;
    Ok(Json(item))
}

/// GET /orderItems-order/{order_id} - 订单明细汇总
pub async fn items_by_order(
    RequestDb(db): RequestDb,
    Path(order_id): Path<String>,
) -> AppResult<Json<Vec<OrderItemReport>>> {
    let source = StoreReportSource::new(&db);
    let reports = order_item_report(&source, &order_id).await?;
    Ok(Json(reports))
}

/// POST /orderItems - 创建订单及其明细
pub async fn create(
    RequestDb(db): RequestDb,
    ValidJson(payload): ValidJson<OrderItemPack>,
) -> AppResult<Json<OrderItemBatchResult>> {
    let result = create_order_items(&db, payload).await?;
    Ok(Json(result))
}

/// PATCH /orderItems/{order_item_id} - 更新订单明细
pub async fn update(
    RequestDb(db): RequestDb,
    Path(order_item_id): Path<String>,
    ValidJson(payload): ValidJson<OrderItemUpdate>,
) -> AppResult<Json<OrderItem>> {
    let repo = OrderItemRepository::new(&db);
    let item = repo.update(&order_item_id, payload).await?;
    Ok(Json(item))
}
