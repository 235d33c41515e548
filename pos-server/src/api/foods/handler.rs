//! Food API Handlers

use axum::{
    Json,
    extract::{Path, Query},
};
use shared::models::{Food, FoodCreate, FoodPage, FoodUpdate};
use shared::{AppError, AppResult};

use crate::db::repository::FoodRepository;
use crate::utils::{PaginationParams, RequestDb, ValidJson};

/// GET /foods - 分页获取菜品
pub async fn list(
    RequestDb(db): RequestDb,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<FoodPage>> {
    let window = params.window()?;
    let repo = FoodRepository::new(&db);
    let (total_count, food_items) = repo.find_page(window.start, window.limit).await?;
    Ok(Json(FoodPage {
        total_count,
        food_items,
    }))
}

/// GET /foods/{food_id} - 获取单个菜品
pub async fn get_by_id(
    RequestDb(db): RequestDb,
    Path(food_id): Path<String>,
) -> AppResult<Json<Food>> {
    let repo = FoodRepository::new(&db);
    let food = repo
        .find_by_id(&food_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Food {} not found", food_id)))?;
    Ok(Json(food))
}

/// POST /foods - 创建菜品
pub async fn create(
    RequestDb(db): RequestDb,
    ValidJson(payload): ValidJson<FoodCreate>,
) -> AppResult<Json<Food>> {
    let repo = FoodRepository::new(&db);
    let food = repo.create(payload).await?;
    tracing::info!(food_id = %food.food_id, "Food created");
    Ok(Json(food))
}

/// PATCH /foods/{food_id} - 更新菜品
pub async fn update(
    RequestDb(db): RequestDb,
    Path(food_id): Path<String>,
    ValidJson(payload): ValidJson<FoodUpdate>,
) -> AppResult<Json<Food>> {
    let repo = FoodRepository::new(&db);
    let food = repo.update(&food_id, payload).await?;
    Ok(Json(food))
}
