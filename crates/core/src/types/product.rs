//! Catalog types: products and categories.
//!
//! Field names follow the rows of the `products` and `categories` tables so
//! values decode straight from the tabular endpoint and serialize back into
//! the same shape for the local mirror.

use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::price::Price;

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// A product as listed by the catalog.
///
/// Immutable from the storefront's point of view: carts and wishlists keep
/// the copy they were given, including its price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,
    pub price: Price,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub image: String,
    pub category: CategoryId,
    /// Average rating between 0.0 and 5.0.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub reviews_count: u32,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub featured: bool,
}

impl Product {
    /// Rating clamped into `0.0..=5.0`; non-finite values count as zero.
    #[must_use]
    pub fn rating(&self) -> f64 {
        if self.rating.is_finite() {
            self.rating.clamp(0.0, MAX_RATING)
        } else {
            0.0
        }
    }
}

/// Product fields sent when creating or replacing a catalog row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,
    pub price: Price,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub image: String,
    pub category: CategoryId,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub reviews_count: u32,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub featured: bool,
}

impl From<Product> for ProductDraft {
    fn from(product: Product) -> Self {
        Self {
            name: product.name,
            description: product.description,
            price: product.price,
            image: product.image,
            category: product.category,
            rating: product.rating,
            reviews_count: product.reviews_count,
            featured: product.featured,
        }
    }
}

/// A browsable product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub icon: String,
}
