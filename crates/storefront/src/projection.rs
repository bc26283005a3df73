//! Values derived from the session, cart and wishlist for display.
//!
//! A [`Projection`] is recomputed from scratch after every mutation and
//! published to observers; nothing in it is stored.

use serde::Serialize;

use crate::models::{Cart, Session, Wishlist};

/// A counter badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub count: u64,
    /// `true` iff `count > 0`.
    pub visible: bool,
}

impl Badge {
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self {
            count,
            visible: count > 0,
        }
    }
}

/// Which navigation link groups are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavVisibility {
    /// Login and register links.
    pub anonymous_links: bool,
    /// Account, orders and logout links.
    pub user_links: bool,
    /// Catalog management links.
    pub admin_links: bool,
}

impl NavVisibility {
    #[must_use]
    pub const fn for_session(session: &Session) -> Self {
        Self {
            anonymous_links: !session.is_authenticated(),
            user_links: session.is_authenticated(),
            admin_links: session.is_administrator(),
        }
    }
}

impl Default for NavVisibility {
    fn default() -> Self {
        Self::for_session(&Session::Anonymous)
    }
}

/// Everything a header needs to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub cart: Badge,
    pub wishlist: Badge,
    pub nav: NavVisibility,
}

impl Projection {
    /// Derive the projection from the current state.
    #[must_use]
    pub fn derive(session: &Session, cart: &Cart, wishlist: &Wishlist) -> Self {
        Self {
            cart: Badge::new(cart.count()),
            wishlist: Badge::new(wishlist.len() as u64),
            nav: NavVisibility::for_session(session),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boutique_core::{CategoryId, Email, Price, Product, ProductId, StoredCredential, UserId, UserIdentity};
    use serde_json::Map;

    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: id.to_owned(),
            description: String::new(),
            price: Price::from_cents(500),
            image: String::new(),
            category: CategoryId::new("c"),
            rating: 0.0,
            reviews_count: 0,
            featured: false,
        }
    }

    fn session(is_admin: bool) -> Session {
        Session::Authenticated(UserIdentity {
            id: UserId::new("u1"),
            email: Email::parse("marie@boutique.fr").unwrap(),
            credential: StoredCredential::new("x".to_owned()),
            is_admin,
            attributes: Map::new(),
        })
    }

    #[test]
    fn test_empty_state_hides_badges() {
        let projection = Projection::derive(&Session::Anonymous, &Cart::new(), &Wishlist::new());
        assert_eq!(projection.cart, Badge { count: 0, visible: false });
        assert!(!projection.wishlist.visible);
        assert_eq!(projection, Projection::default());
    }

    #[test]
    fn test_cart_badge_counts_quantities() {
        let mut cart = Cart::new();
        cart.add(&product("a"), 2).unwrap();
        cart.add(&product("b"), 3).unwrap();
        let mut wishlist = Wishlist::new();
        wishlist.toggle(&product("a"));

        let projection = Projection::derive(&Session::Anonymous, &cart, &wishlist);
        assert_eq!(projection.cart, Badge { count: 5, visible: true });
        assert_eq!(projection.wishlist, Badge { count: 1, visible: true });
    }

    #[test]
    fn test_nav_flags_follow_session() {
        let anonymous = NavVisibility::for_session(&Session::Anonymous);
        assert!(anonymous.anonymous_links && !anonymous.user_links && !anonymous.admin_links);

        let customer = NavVisibility::for_session(&session(false));
        assert!(!customer.anonymous_links && customer.user_links && !customer.admin_links);

        let admin = NavVisibility::for_session(&session(true));
        assert!(!admin.anonymous_links && admin.user_links && admin.admin_links);
    }
}
