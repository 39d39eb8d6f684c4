//! Domain models for the dashboard.
//!
//! - [`catalog`] - Catalog rows as returned by the JSON API
//! - [`input`] - Request bodies and their validated drafts
//! - [`order`] - Orders and line items
//! - [`session`] - Session-stored identity
//! - [`store`] - Stores
//! - [`user`] - Dashboard accounts

pub mod catalog;
pub mod input;
pub mod order;
pub mod session;
pub mod store;
pub mod user;

pub use catalog::{
    Billboard, Category, CategoryWithBillboard, LocalizedKind, LocalizedOption, OptionKind,
    OptionValue, Product, ProductDetail, ProductImage,
};
pub use order::{Order, OrderLine};
pub use session::{CurrentUser, keys as session_keys};
pub use store::Store;
pub use user::User;
