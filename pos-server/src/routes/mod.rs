use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::auth::require_auth;
use crate::core::ServerState;

pub mod logging;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Health - public route
        .merge(api::health::router())
        // Users - signup/login public, the rest authenticated
        .merge(api::users::router())
        // Catalog
        .merge(api::menus::router())
        .merge(api::foods::router())
        .merge(api::tables::router())
        // Ordering
        .merge(api::orders::router())
        .merge(api::order_items::router())
        .merge(api::invoices::router())
}

/// Build a fully configured application with all middleware
///
/// Used by the HTTP server and by tests through `oneshot`.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // JWT authentication - innermost, injects CurrentUser
        .layer(axum_middleware::from_fn_with_state(state.clone(), require_auth))
        // ========== Tower HTTP Middleware ==========
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        // Request logging
        .layer(axum_middleware::from_fn(logging::logging_middleware))
        .layer(TraceLayer::new_for_http())
        // Request ID - set before anything logs it, echoed on the response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
}
