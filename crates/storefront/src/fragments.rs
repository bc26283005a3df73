//! HTML fragments rendered with Askama.
//!
//! Views carry preformatted strings so the templates only interpolate.
//! Every interpolated value is HTML-escaped by Askama.

use askama::Template;

use boutique_core::{Category, Product};

use crate::format::star_rating;
use crate::models::{Cart, LineItem, Wishlist};
use crate::projection::Badge;

// =============================================================================
// Views
// =============================================================================

/// Product card display data.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub image: String,
    pub stars: String,
    pub reviews_count: u32,
    pub price: String,
    pub featured: bool,
    /// The product is in the wishlist.
    pub wishlisted: bool,
}

impl ProductCardView {
    #[must_use]
    pub fn new(product: &Product, wishlist: &Wishlist) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.to_string(),
            image: product.image.clone(),
            stars: star_rating(product.rating()),
            reviews_count: product.reviews_count,
            price: product.price.to_string(),
            featured: product.featured,
            wishlisted: wishlist.contains(&product.id),
        }
    }
}

/// Category card display data.
#[derive(Debug, Clone)]
pub struct CategoryCardView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub icon: String,
}

impl From<&Category> for CategoryCardView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            description: category.description.clone(),
            image: category.image.clone(),
            icon: category.icon.clone(),
        }
    }
}

/// Cart line display data.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub unit_price: String,
    pub line_total: String,
    pub quantity: u32,
    /// Quantity requested by the `-` control; zero removes the line.
    pub decrement: u32,
    /// Quantity requested by the `+` control.
    pub increment: u32,
}

impl From<&LineItem> for CartLineView {
    fn from(line: &LineItem) -> Self {
        Self {
            id: line.product.id.to_string(),
            name: line.product.name.clone(),
            image: line.product.image.clone(),
            unit_price: line.unit_price().to_string(),
            line_total: line.subtotal().to_string(),
            quantity: line.quantity(),
            decrement: line.quantity().saturating_sub(1),
            increment: line.quantity().saturating_add(1),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub count: u64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total: cart.total().to_string(),
            count: cart.count(),
        }
    }
}

/// Badge display data.
#[derive(Debug, Clone)]
pub struct BadgeView {
    /// CSS class, e.g. `cart-badge`.
    pub class: &'static str,
    pub count: u64,
    pub visible: bool,
}

impl BadgeView {
    #[must_use]
    pub const fn new(class: &'static str, badge: Badge) -> Self {
        Self {
            class,
            count: badge.count,
            visible: badge.visible,
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Product card fragment.
#[derive(Template)]
#[template(path = "fragments/product_card.html")]
pub struct ProductCardTemplate {
    pub card: ProductCardView,
}

/// Category card fragment.
#[derive(Template)]
#[template(path = "fragments/category_card.html")]
pub struct CategoryCardTemplate {
    pub card: CategoryCardView,
}

/// Cart lines and summary fragment.
#[derive(Template)]
#[template(path = "fragments/cart.html")]
pub struct CartTemplate {
    pub cart: CartView,
}

/// Counter badge fragment.
#[derive(Template)]
#[template(path = "fragments/badge.html")]
pub struct BadgeTemplate {
    pub badge: BadgeView,
}

/// Render a product card.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn product_card(product: &Product, wishlist: &Wishlist) -> askama::Result<String> {
    ProductCardTemplate {
        card: ProductCardView::new(product, wishlist),
    }
    .render()
}

/// Render a category card.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn category_card(category: &Category) -> askama::Result<String> {
    CategoryCardTemplate {
        card: CategoryCardView::from(category),
    }
    .render()
}

/// Render the cart.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn cart(cart: &Cart) -> askama::Result<String> {
    CartTemplate {
        cart: CartView::from(cart),
    }
    .render()
}

/// Render a badge.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn badge(class: &'static str, badge: Badge) -> askama::Result<String> {
    BadgeTemplate {
        badge: BadgeView::new(class, badge),
    }
    .render()
}
