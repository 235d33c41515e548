//! 认证中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::AppError;

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// Legacy header carrying the bare token
const LEGACY_TOKEN_HEADER: &str = "token";

/// Routes reachable without a token
const PUBLIC_PATHS: &[&str] = &["/health", "/users/signup", "/users/login"];

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 读取访问令牌，没有时读取旧的 `token` 头。
/// 验证通过后把 [`CurrentUser`] 写入请求扩展。
///
/// | 错误 | 状态码 |
/// |------|--------|
/// | 缺少令牌 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS 预检
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if PUBLIC_PATHS.contains(&req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let headers = req.headers();
    let token = match headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => match headers
            .get(LEGACY_TOKEN_HEADER)
            .and_then(|h| h.to_str().ok())
        {
            Some(token) if !token.is_empty() => token,
            _ => {
                security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
                return Err(AppError::Unauthorized);
            }
        },
    };

    match state.jwt_service.validate_access_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}
