//! External services consumed by the storefront.
//!
//! # Services
//!
//! - `identity` - list and create user rows
//! - `catalog` - products and categories, plus admin product management
//! - `orders` - create orders and list a user's orders
//!
//! All three live behind the same tabular endpoint and are implemented by
//! [`TablesClient`]. [`InMemoryTables`] implements them against process
//! memory.
//!
//! Every call is attempted once. Failures never reach the caller: an
//! unreachable service or a malformed response degrades to an empty list or
//! an absent value, and is logged by the implementation.

pub mod auth;
pub mod memory;
pub mod tables;

use std::future::Future;
use std::sync::Arc;

use boutique_core::{
    Category, NewIdentity, NewOrder, Order, Product, ProductDraft, ProductId, UserId, UserIdentity,
};

pub use auth::{AuthError, AuthService, CredentialScheme, Registration};
pub use memory::InMemoryTables;
pub use tables::{TablesClient, TablesError};

/// Filter for product listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProductFilter {
    /// Restrict to a category. Sent to the endpoint as a free-text search.
    pub category: Option<String>,
}

impl ProductFilter {
    /// All products.
    #[must_use]
    pub const fn all() -> Self {
        Self { category: None }
    }

    /// Products matching `category`.
    #[must_use]
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
        }
    }
}

/// User rows.
pub trait IdentityService {
    /// Every known identity. Empty on failure.
    fn list_users(&self) -> impl Future<Output = Vec<UserIdentity>> + Send;

    /// Create an identity. `None` on failure.
    fn create_user(
        &self,
        candidate: &NewIdentity,
    ) -> impl Future<Output = Option<UserIdentity>> + Send;
}

/// Product and category rows.
pub trait CatalogService {
    /// Products matching `filter`. Empty on failure.
    fn list_products(&self, filter: &ProductFilter)
    -> impl Future<Output = Vec<Product>> + Send;

    /// A single product. `None` if missing or on failure.
    fn get_product(&self, id: &ProductId) -> impl Future<Output = Option<Product>> + Send;

    /// Every category. Empty on failure.
    fn list_categories(&self) -> impl Future<Output = Vec<Category>> + Send;

    /// Create a product. `None` on failure.
    fn create_product(&self, draft: &ProductDraft)
    -> impl Future<Output = Option<Product>> + Send;

    /// Replace a product's fields. `None` if missing or on failure.
    fn update_product(
        &self,
        id: &ProductId,
        draft: &ProductDraft,
    ) -> impl Future<Output = Option<Product>> + Send;

    /// Delete a product. `false` on failure.
    fn delete_product(&self, id: &ProductId) -> impl Future<Output = bool> + Send;
}

/// Order rows.
pub trait OrderService {
    /// Submit an order. `None` on failure.
    fn create_order(&self, order: &NewOrder) -> impl Future<Output = Option<Order>> + Send;

    /// Orders placed by `user_id`. Empty on failure.
    fn list_orders_for_user(&self, user_id: &UserId) -> impl Future<Output = Vec<Order>> + Send;
}

impl<T: IdentityService> IdentityService for Arc<T> {
    fn list_users(&self) -> impl Future<Output = Vec<UserIdentity>> + Send {
        (**self).list_users()
    }

    fn create_user(
        &self,
        candidate: &NewIdentity,
    ) -> impl Future<Output = Option<UserIdentity>> + Send {
        (**self).create_user(candidate)
    }
}

impl<T: CatalogService> CatalogService for Arc<T> {
    fn list_products(&self, filter: &ProductFilter)
    -> impl Future<Output = Vec<Product>> + Send {
        (**self).list_products(filter)
    }

    fn get_product(&self, id: &ProductId) -> impl Future<Output = Option<Product>> + Send {
        (**self).get_product(id)
    }

    fn list_categories(&self) -> impl Future<Output = Vec<Category>> + Send {
        (**self).list_categories()
    }

    fn create_product(&self, draft: &ProductDraft)
    -> impl Future<Output = Option<Product>> + Send {
        (**self).create_product(draft)
    }

    fn update_product(
        &self,
        id: &ProductId,
        draft: &ProductDraft,
    ) -> impl Future<Output = Option<Product>> + Send {
        (**self).update_product(id, draft)
    }

    fn delete_product(&self, id: &ProductId) -> impl Future<Output = bool> + Send {
        (**self).delete_product(id)
    }
}

impl<T: OrderService> OrderService for Arc<T> {
    fn create_order(&self, order: &NewOrder) -> impl Future<Output = Option<Order>> + Send {
        (**self).create_order(order)
    }

    fn list_orders_for_user(&self, user_id: &UserId) -> impl Future<Output = Vec<Order>> + Send {
        (**self).list_orders_for_user(user_id)
    }
}

/// Everything the storefront needs from the tabular endpoint.
pub trait TableServices: IdentityService + CatalogService + OrderService {}

impl<T: IdentityService + CatalogService + OrderService> TableServices for T {}
