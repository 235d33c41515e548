//! Data models
//!
//! Shared between pos-server and clients (via API).
//! Every entity carries its own string identifier (`food_id`, `order_id`, ...);
//! the document store's record key is never exposed.

pub mod dining_table;
pub mod food;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod report;
pub mod user;

// Re-exports
pub use dining_table::*;
pub use food::*;
pub use invoice::*;
pub use menu::*;
pub use order::*;
pub use order_item::*;
pub use report::*;
pub use user::*;
