//! Order API Handlers

use axum::{Json, extract::Path};
use shared::models::{Order, OrderCreate, OrderUpdate};
use shared::{AppError, AppResult};

use crate::db::repository::OrderRepository;
use crate::utils::{RequestDb, ValidJson};

/// GET /orders - 获取所有订单
pub async fn list(RequestDb(db): RequestDb) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(&db);
    let orders = repo.find_all().await?;
    Ok(Json(orders))
}

/// GET /orders/{order_id} - 获取单个订单
pub async fn get_by_id(
    RequestDb(db): RequestDb,
    Path(order_id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(&db);
    let order = repo
        .find_by_id(&order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_id)))?;
    Ok(Json(order))
}

/// POST /orders - 创建订单 (桌台必须存在)
pub async fn create(
    RequestDb(db): RequestDb,
    ValidJson(payload): ValidJson<OrderCreate>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(&db);
    let order = repo.create(payload).await?;
    Ok(Json(order))
}

/// PATCH /orders/{order_id} - 更新订单
pub async fn update(
    RequestDb(db): RequestDb,
    Path(order_id): Path<String>,
    ValidJson(payload): ValidJson<OrderUpdate>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(&db);
    let order = repo.update(&order_id, payload).await?;
    Ok(Json(order))
}
