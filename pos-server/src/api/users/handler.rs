//! User API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{AuthResponse, LoginRequest, SignupRequest, User, UserPage, UserResponse};
use shared::util::{new_id, now};
use shared::{AppError, AppResult};

use crate::auth::password::{hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::{UserRepository, required};
use crate::security_log;
use crate::utils::{PaginationParams, RequestDb, ValidJson};

/// GET /users - 分页获取用户
pub async fn list(
    RequestDb(db): RequestDb,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<UserPage>> {
    let window = params.window()?;
    let repo = UserRepository::new(&db);
    let (total_count, users) = repo.find_page(window.start, window.limit).await?;
    Ok(Json(UserPage {
        total_count,
        user_items: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// GET /users/{user_id} - 获取单个用户
pub async fn get_by_id(
    RequestDb(db): RequestDb,
    Path(user_id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let repo = UserRepository::new(&db);
    let user = repo
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", user_id)))?;
    Ok(Json(user.into()))
}

/// POST /users/signup - 注册
pub async fn signup(
    State(state): State<ServerState>,
    RequestDb(db): RequestDb,
    ValidJson(payload): ValidJson<SignupRequest>,
) -> AppResult<Json<AuthResponse>> {
    let password = required(payload.password, "password")?;
    let password_hash = hash_password(&password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let now = now();
    let mut user = User {
        user_id: new_id(),
        first_name: required(payload.first_name, "first_name")?,
        last_name: required(payload.last_name, "last_name")?,
        email: required(payload.email, "email")?,
        phone: required(payload.phone, "phone")?,
        password_hash,
        avatar: payload.avatar,
        token: None,
        refresh_token: None,
        created_at: now,
        updated_at: now,
    };

    let tokens = state
        .jwt_service
        .generate_pair(&user)
        .map_err(|e| AppError::internal(e.to_string()))?;
    user.token = Some(tokens.token.clone());
    user.refresh_token = Some(tokens.refresh_token.clone());

    let repo = UserRepository::new(&db);
    let user = repo.create(user).await?;

    security_log!("INFO", "user_signup", user_id = user.user_id.clone());

    Ok(Json(AuthResponse {
        token: tokens.token,
        refresh_token: tokens.refresh_token,
        user: user.into(),
    }))
}

/// POST /users/login - 登录 (邮箱不存在与密码错误返回相同的 401)
pub async fn login(
    State(state): State<ServerState>,
    RequestDb(db): RequestDb,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = required(payload.email, "email")?;
    let password = required(payload.password, "password")?;

    let repo = UserRepository::new(&db);
    let Some(user) = repo.find_by_email(&email).await? else {
        security_log!("WARN", "login_failed", reason = "unknown_email");
        return Err(AppError::InvalidCredentials);
    };

    let valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !valid {
        security_log!("WARN", "login_failed", user_id = user.user_id.clone());
        return Err(AppError::InvalidCredentials);
    }

    let tokens = state
        .jwt_service
        .generate_pair(&user)
        .map_err(|e| AppError::internal(e.to_string()))?;
    let user = repo
        .update_tokens(&user.user_id, &tokens.token, &tokens.refresh_token)
        .await?;

    security_log!("INFO", "login_success", user_id = user.user_id.clone());

    Ok(Json(AuthResponse {
        token: tokens.token,
        refresh_token: tokens.refresh_token,
        user: user.into(),
    }))
}
