//! Dining Table API Handlers

use axum::{Json, extract::Path};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use shared::{AppError, AppResult};

use crate::db::repository::DiningTableRepository;
use crate::utils::{RequestDb, ValidJson};

/// GET /tables - 获取所有桌台
pub async fn list(RequestDb(db): RequestDb) -> AppResult<Json<Vec<DiningTable>>> {
    let repo = DiningTableRepository::new(&db);
    let tables = repo.find_all().await?;
    Ok(Json(tables))
}

/// GET /tables/{table_id} - 获取单个桌台
pub async fn get_by_id(
    RequestDb(db): RequestDb,
    Path(table_id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(&db);
    let table = repo
        .find_by_id(&table_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", table_id)))?;
    Ok(Json(table))
}

/// POST /tables - 创建桌台
pub async fn create(
    RequestDb(db): RequestDb,
    ValidJson(payload): ValidJson<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(&db);
    let table = repo.create(payload).await?;
    Ok(Json(table))
}

/// PATCH /tables/{table_id} - 更新桌台
pub async fn update(
    RequestDb(db): RequestDb,
    Path(table_id): Path<String>,
    ValidJson(payload): ValidJson<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(&db);
    let table = repo.update(&table_id, payload).await?;
    Ok(Json(table))
}
