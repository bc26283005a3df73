//! Core types for Boutique.
//!
//! This module provides type-safe wrappers for the storefront's domain
//! concepts.

pub mod credential;
pub mod email;
pub mod id;
pub mod identity;
pub mod order;
pub mod price;
pub mod product;
pub mod status;

pub use credential::StoredCredential;
pub use email::{Email, EmailError};
pub use id::*;
pub use identity::{NewIdentity, UserIdentity};
pub use order::{NewOrder, Order, OrderLine};
pub use price::{Price, PriceError};
pub use product::{Category, Product, ProductDraft};
pub use status::OrderStatus;

use serde::{Deserialize, Deserializer};

/// Read an explicit `null` as the type's default, the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
