//! Order Item API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /orderItems | GET | 所有订单明细 |
//! | /orderItems | POST | 创建订单及其明细 |
//! | /orderItems/{order_item_id} | GET, PATCH | 单个订单明细 |
//! | /orderItems-order/{order_id} | GET | 订单明细汇总 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/orderItems", routes())
        .route("/orderItems-order/{order_id}", get(handler::items_by_order))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{order_item_id}", get(handler::get_by_id).patch(handler::update))
}
