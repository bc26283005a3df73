//! Wishlist entries.

use boutique_core::{Product, ProductId};
use serde::{Deserialize, Serialize};

/// A set of products keyed by product ID, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Product>", into = "Vec<Product>")]
pub struct Wishlist {
    entries: Vec<Product>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Remove the product if present, otherwise add it.
    ///
    /// Returns `true` when the product was added, `false` when removed.
    pub fn toggle(&mut self, product: &Product) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != product.id);
        if self.entries.len() != before {
            return false;
        }
        self.entries.push(product.clone());
        true
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entries.iter().any(|entry| &entry.id == product_id)
    }

    #[must_use]
    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<Product>> for Wishlist {
    fn from(stored: Vec<Product>) -> Self {
        let mut wishlist = Self::new();
        for product in stored {
            if !wishlist.contains(&product.id) {
                wishlist.entries.push(product);
            }
        }
        wishlist
    }
}

impl From<Wishlist> for Vec<Product> {
    fn from(wishlist: Wishlist) -> Self {
        wishlist.entries
    }
}
