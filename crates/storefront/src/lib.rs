//! Boutique storefront state.
//!
//! Holds the session, cart and wishlist of a storefront visitor, mirrors
//! them to local storage so they survive restarts, and publishes the badge
//! and navigation values derived from them.
//!
//! ```rust,ignore
//! use boutique_storefront::{Storefront, config::StorefrontConfig};
//!
//! let config = StorefrontConfig::from_env()?;
//! let mut storefront = Storefront::from_config(&config)?;
//!
//! let product = storefront.product(&"42".into()).await.ok_or("missing")?;
//! storefront.add_to_cart(&product, 1)?;
//! println!("{}", storefront.render_cart()?);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod format;
pub mod fragments;
pub mod mirror;
pub mod models;
pub mod projection;
pub mod services;
pub mod storefront;

pub use error::{Result, StorefrontError};
pub use storefront::{Notice, NoticeLevel, Storefront, StorefrontOptions};
