//! API 路由模块
//!
//! | 模块 | 路径 |
//! |------|------|
//! | [`health`] | `/health` |
//! | [`foods`] | `/foods` |
//! | [`menus`] | `/menus` |
//! | [`tables`] | `/tables` |
//! | [`orders`] | `/orders` |
//! | [`order_items`] | `/orderItems`, `/orderItems-order/{order_id}` |
//! | [`invoices`] | `/invoices` |
//! | [`users`] | `/users` |

pub mod health;

pub mod foods;
pub mod invoices;
pub mod menus;
pub mod order_items;
pub mod orders;
pub mod tables;
pub mod users;
