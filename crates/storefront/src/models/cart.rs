//! Cart line items.
//!
//! The cart is an ordered list of line items keyed by product ID. A line
//! item always has a quantity of at least one: any operation that would take
//! it to zero removes the line instead.

use boutique_core::{OrderLine, Price, Product, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by cart mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Quantities added to the cart must be positive.
    #[error("quantity must be a positive integer")]
    InvalidQuantity,
}

/// A product in the cart together with its quantity.
///
/// Serialized flat: the product's fields plus `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub product: Product,
    quantity: u32,
}

impl LineItem {
    /// Number of units, always at least one.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price captured when the product was added.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.product.price
    }

    /// `unit price × quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

impl From<&LineItem> for OrderLine {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product.id.clone(),
            name: item.product.name.clone(),
            price: item.product.price,
            quantity: item.quantity,
        }
    }
}

/// Result of [`Cart::set_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now has the requested quantity.
    Updated,
    /// The requested quantity was zero or less, so the line was removed.
    Removed,
    /// The product is not in the cart; nothing changed.
    Unchanged,
}

/// The line-item collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` units of `product` and return the line's new quantity.
    ///
    /// An existing line for the same product ID grows by `quantity` (the
    /// price already on that line is kept); otherwise a new line is appended.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` if `quantity` is zero.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<u32, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            return Ok(line.quantity);
        }

        self.lines.push(LineItem {
            product: product.clone(),
            quantity,
        });
        Ok(quantity)
    }

    /// Remove the line for `product_id`. Returns `false` if it was absent.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.product.id != product_id);
        self.lines.len() != before
    }

    /// Set the quantity of an existing line.
    ///
    /// Zero or less behaves exactly like [`Cart::remove`]. This never inserts:
    /// a product that is not already in the cart is left out.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> QuantityChange {
        if self.get(product_id).is_none() {
            return QuantityChange::Unchanged;
        }
        if quantity <= 0 {
            self.remove(product_id);
            return QuantityChange::Removed;
        }

        if let Some(line) = self.line_mut(product_id) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        QuantityChange::Updated
    }

    /// Sum of `price × quantity` over all lines, at add-time prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(LineItem::subtotal).sum()
    }

    /// Sum of all quantities (not the number of lines).
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.lines.iter().find(|line| &line.product.id == product_id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut LineItem> {
        self.lines
            .iter_mut()
            .find(|line| &line.product.id == product_id)
    }
}

/// Rebuild a cart from stored lines, dropping zero quantities and merging
/// duplicate product IDs into the first occurrence.
impl From<Vec<LineItem>> for Cart {
    fn from(stored: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        for line in stored {
            if line.quantity == 0 {
                continue;
            }
            match cart.line_mut(&line.product.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boutique_core::CategoryId;
    use serde_json::json;

    use super::*;

    fn product(id: &str, cents: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Produit {id}"),
            description: String::new(),
            price: Price::from_cents(cents),
            image: String::new(),
            category: CategoryId::new("maison"),
            rating: 4.0,
            reviews_count: 3,
            featured: false,
        }
    }

    #[test]
    fn test_add_same_product_merges_lines() {
        let mut cart = Cart::new();
        let lampe = product("lampe", 1500);

        assert_eq!(cart.add(&lampe, 2).unwrap(), 2);
        assert_eq!(cart.add(&lampe, 3).unwrap(), 5);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn test_add_zero_is_rejected() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add(&product("lampe", 1500), 0).unwrap_err(),
            CartError::InvalidQuantity
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let mut by_set = Cart::new();
        by_set.add(&product("a", 100), 1).unwrap();
        by_set.add(&product("b", 200), 4).unwrap();
        let mut by_remove = by_set.clone();

        assert_eq!(
            by_set.set_quantity(&ProductId::new("b"), 0),
            QuantityChange::Removed
        );
        assert!(by_remove.remove(&ProductId::new("b")));
        assert_eq!(by_set, by_remove);

        assert_eq!(
            by_set.set_quantity(&ProductId::new("a"), -3),
            QuantityChange::Removed
        );
        assert!(by_set.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product("a", 100), 2).unwrap();
        let before = cart.clone();

        assert_eq!(
            cart.set_quantity(&ProductId::new("inconnu"), 5),
            QuantityChange::Unchanged
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity_is_absolute() {
        let mut cart = Cart::new();
        cart.add(&product("a", 100), 2).unwrap();
        assert_eq!(cart.set_quantity(&ProductId::new("a"), 7), QuantityChange::Updated);
        assert_eq!(cart.get(&ProductId::new("a")).unwrap().quantity(), 7);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product("a", 100), 1).unwrap();
        assert!(!cart.remove(&ProductId::new("b")));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_total_uses_add_time_price() {
        let mut cart = Cart::new();
        let mut lampe = product("lampe", 1000);
        cart.add(&lampe, 2).unwrap();

        lampe.price = Price::from_cents(9900);
        cart.add(&lampe, 1).unwrap();
        cart.add(&product("vase", 250), 2).unwrap();

        assert_eq!(cart.total(), Price::from_cents(3000 + 500));
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn test_no_line_ever_has_zero_quantity() {
        let mut cart = Cart::new();
        let ids = ["a", "b", "c"];
        let quantities = [3_i64, 0, -1, 2, 5, 0, 1, -7];

        for (step, quantity) in quantities.iter().enumerate() {
            let id = ids[step % ids.len()];
            cart.add(&product(id, 100), 1).unwrap();
            cart.set_quantity(&ProductId::new(id), *quantity);
            if step % 3 == 0 {
                cart.remove(&ProductId::new(ids[(step + 1) % ids.len()]));
            }
            assert!(cart.lines().iter().all(|line| line.quantity() >= 1));
        }
    }

    #[test]
    fn test_serializes_flat_lines() {
        let mut cart = Cart::new();
        cart.add(&product("a", 1999), 2).unwrap();

        let value = serde_json::to_value(&cart).unwrap();
        assert_eq!(value[0]["id"], "a");
        assert_eq!(value[0]["quantity"], 2);
        assert_eq!(value[0]["price"], "19.99");
    }

    #[test]
    fn test_decoding_drops_zero_and_merges_duplicates() {
        let cart: Cart = serde_json::from_value(json!([
            {"id": "a", "name": "A", "price": 1, "category": "c", "quantity": 2},
            {"id": "b", "name": "B", "price": 1, "category": "c", "quantity": 0},
            {"id": "a", "name": "A", "price": 1, "category": "c", "quantity": 1}
        ]))
        .unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&ProductId::new("a")).unwrap().quantity(), 3);
    }
}
