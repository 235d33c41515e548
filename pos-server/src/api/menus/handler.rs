//! Menu API Handlers

use axum::{Json, extract::Path};
use shared::models::{Menu, MenuCreate, MenuUpdate};
use shared::{AppError, AppResult};

use crate::db::repository::MenuRepository;
use crate::utils::{RequestDb, ValidJson};

/// GET /menus - 获取所有菜单
pub async fn list(RequestDb(db): RequestDb) -> AppResult<Json<Vec<Menu>>> {
    let repo = MenuRepository::new(&db);
    let menus = repo.find_all().await?;
    Ok(Json(menus))
}

/// GET /menus/{menu_id} - 获取单个菜单
pub async fn get_by_id(
    RequestDb(db): RequestDb,
    Path(menu_id): Path<String>,
) -> AppResult<Json<Menu>> {
    let repo = MenuRepository::new(&db);
    let menu = repo
        .find_by_id(&menu_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu {} not found", menu_id)))?;
    Ok(Json(menu))
}

/// POST /menus - 创建菜单
pub async fn create(
    RequestDb(db): RequestDb,
    ValidJson(payload): ValidJson<MenuCreate>,
) -> AppResult<Json<Menu>> {
    let repo = MenuRepository::new(&db);
    let menu = repo.create(payload).await?;
    Ok(Json(menu))
}

/// PATCH /menus/{menu_id} - 更新菜单
pub async fn update(
    RequestDb(db): RequestDb,
    Path(menu_id): Path<String>,
    ValidJson(payload): ValidJson<MenuUpdate>,
) -> AppResult<Json<Menu>> {
    let repo = MenuRepository::new(&db);
    let menu = repo.update(&menu_id, payload).await?;
    Ok(Json(menu))
}
