//! Domain state owned by the storefront.
//!
//! - [`cart`] - Line items with quantity invariants and aggregates
//! - [`wishlist`] - Toggle set of products
//! - [`session`] - Anonymous or authenticated identity

pub mod cart;
pub mod session;
pub mod wishlist;

pub use cart::{Cart, CartError, LineItem, QuantityChange};
pub use session::Session;
pub use wishlist::Wishlist;
