//! Unified error handling with Sentry integration.
//!
//! Every fallible storefront operation returns [`Result`]. Callers show
//! [`StorefrontError::user_message`] to the person at the keyboard; the
//! `Display` text is for logs.

use thiserror::Error;

use boutique_core::ProductId;

use crate::config::ConfigError;
use crate::mirror::StoreError;
use crate::models::CartError;
use crate::services::{AuthError, TablesError};

/// Storefront-level error type.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Login or registration failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Cart mutation rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// The operation needs an authenticated session.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The operation needs an administrator session.
    #[error("Forbidden: administrator session required")]
    Forbidden,

    /// The product does not exist in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Checkout with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The order service did not accept the order.
    #[error("Order rejected by the order service")]
    OrderRejected,

    /// The catalog service did not apply a product change.
    #[error("Catalog update rejected: {0}")]
    CatalogRejected(String),

    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The mirror directory could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// The service client could not be built.
    #[error("Service error: {0}")]
    Tables(#[from] TablesError),
}

impl StorefrontError {
    /// Message safe to show to the user. Internal details stay in logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(err) => err.user_message(),
            Self::Cart(_) => "Quantity must be at least 1".to_string(),
            Self::NotAuthenticated => "Please log in first".to_string(),
            Self::Forbidden => "Administrator access required".to_string(),
            Self::ProductNotFound(_) => "Product not found".to_string(),
            Self::EmptyCart => "Your cart is empty".to_string(),
            Self::OrderRejected => "Your order could not be placed, please try again".to_string(),
            Self::CatalogRejected(_) => "The catalog could not be updated".to_string(),
            Self::Render(_) | Self::Storage(_) | Self::Tables(_) => "Internal error".to_string(),
            Self::Config(err) => err.to_string(),
        }
    }

    /// Whether this error points at a defect rather than a user mistake.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Render(_) | Self::Storage(_) | Self::Tables(_) | Self::Config(_)
        )
    }

    /// Send internal errors to Sentry and log them.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::debug!(error = %self, "Storefront operation refused");
        }
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Set the Sentry user context.
///
/// Call this after login so errors are associated with the user.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for a user action.
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data.unwrap_or_default() {
        breadcrumb.data.insert(
            (*key).to_string(),
            serde_json::Value::String((*value).to_string()),
        );
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = StorefrontError::ProductNotFound(ProductId::new("p-123"));
        assert_eq!(err.to_string(), "Product not found: p-123");
        assert_eq!(StorefrontError::EmptyCart.to_string(), "Cart is empty");
    }

    #[test]
    fn test_user_messages_hide_details() {
        let err = StorefrontError::Storage(StoreError::Unavailable("disk on fire".to_string()));
        assert_eq!(err.user_message(), "Internal error");
        assert!(err.is_internal());

        let err = StorefrontError::Auth(AuthError::InvalidCredentials);
        assert_eq!(err.user_message(), "Invalid email or password");
        assert!(!err.is_internal());
    }

    #[test]
    fn test_breadcrumb_without_client_is_noop() {
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "p1")]));
        add_breadcrumb("wishlist", "Toggled", None);
        clear_sentry_user();
    }
}
