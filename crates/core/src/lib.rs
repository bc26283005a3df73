//! Boutique Core - Shared domain types.
//!
//! This crate provides the types shared by every Boutique component:
//! - `storefront` - Cart, wishlist and session state with local mirroring
//! - `cli` - Terminal front end driving the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! Everything here is plain data that serializes to the shapes used by the
//! tabular data endpoint and by the local mirror.
//!
//! # Modules
//!
//! - [`types`] - Identifiers, prices, emails, products, identities and orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
