//! The storefront context.
//!
//! [`Storefront`] owns the session, the cart, the wishlist, the persistent
//! mirror and the service handles. Every state change goes through a
//! `&mut self` method that, in order:
//!
//! 1. updates the in-memory state (authoritative),
//! 2. writes the affected key through the mirror,
//! 3. republishes the [`Projection`],
//! 4. emits a [`Notice`] for the user.
//!
//! In-memory state is never rolled back when a mirror write fails; the
//! mirror degrades instead.

use secrecy::SecretString;
use tokio::sync::{broadcast, watch};
use tracing::{info, instrument, warn};

use boutique_core::{
    Category, NewOrder, Order, OrderLine, OrderStatus, Product, ProductDraft, ProductId,
    UserIdentity,
};

use crate::config::StorefrontConfig;
use crate::error::{
    Result, StorefrontError, add_breadcrumb, clear_sentry_user, set_sentry_user,
};
use crate::fragments;
use crate::mirror::{FileStore, Mirror, MirrorKey};
use crate::models::{Cart, QuantityChange, Session, Wishlist};
use crate::projection::Projection;
use crate::services::{
    AuthService, CredentialScheme, ProductFilter, Registration, TableServices, TablesClient,
};

const NOTICE_CAPACITY: usize = 32;

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Danger,
}

impl std::fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Info => write!(f, "info"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Behaviour switches for a [`Storefront`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontOptions {
    /// Transform applied to new passwords.
    pub credential_scheme: CredentialScheme,
    /// Navigation target returned by [`Storefront::logout`].
    pub home_path: String,
}

impl Default for StorefrontOptions {
    fn default() -> Self {
        Self {
            credential_scheme: CredentialScheme::default(),
            home_path: "index.html".to_string(),
        }
    }
}

impl From<&StorefrontConfig> for StorefrontOptions {
    fn from(config: &StorefrontConfig) -> Self {
        Self {
            credential_scheme: config.credential_scheme,
            home_path: config.home_path.clone(),
        }
    }
}

/// Session, cart and wishlist state with a persistent mirror.
pub struct Storefront<S> {
    services: S,
    mirror: Mirror,
    options: StorefrontOptions,
    session: Session,
    cart: Cart,
    wishlist: Wishlist,
    projection: watch::Sender<Projection>,
    notices: broadcast::Sender<Notice>,
}

impl Storefront<TablesClient> {
    /// Open a storefront backed by the HTTP endpoint and the on-disk mirror
    /// described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self> {
        let store = FileStore::open(&config.data_dir)?;
        let services = TablesClient::new(&config.api, config.catalog_cache_ttl)?;
        Ok(Self::open(services, Mirror::new(store), config.into()))
    }
}

impl<S: TableServices> Storefront<S> {
    /// Build the context and seed it from the mirror.
    ///
    /// A missing or unreadable session key means anonymous; missing or
    /// unreadable cart and wishlist keys mean empty.
    pub fn open(services: S, mut mirror: Mirror, options: StorefrontOptions) -> Self {
        let session = Session::from(mirror.restore::<UserIdentity>(MirrorKey::CurrentUser));
        let cart = mirror.restore::<Cart>(MirrorKey::Cart).unwrap_or_default();
        let wishlist = mirror
            .restore::<Wishlist>(MirrorKey::Wishlist)
            .unwrap_or_default();

        if let Some(identity) = session.identity() {
            set_sentry_user(&identity.id, Some(identity.email.as_str()));
        }

        info!(
            authenticated = session.is_authenticated(),
            cart_lines = cart.len(),
            wishlist_entries = wishlist.len(),
            "Storefront state restored"
        );

        let (projection, _) = watch::channel(Projection::derive(&session, &cart, &wishlist));
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);

        Self {
            services,
            mirror,
            options,
            session,
            cart,
            wishlist,
            projection,
            notices,
        }
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// The service handles.
    pub const fn services(&self) -> &S {
        &self.services
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The authenticated identity, if any.
    pub const fn current_user(&self) -> Option<&UserIdentity> {
        self.session.identity()
    }

    pub const fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub const fn is_administrator(&self) -> bool {
        self.session.is_administrator()
    }

    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    pub const fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// The latest published projection.
    pub fn projection(&self) -> Projection {
        *self.projection.borrow()
    }

    /// Observe projection updates. The receiver starts at the current value.
    pub fn subscribe(&self) -> watch::Receiver<Projection> {
        self.projection.subscribe()
    }

    /// Observe notices emitted from now on.
    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// `true` once a storage failure switched the mirror to memory-only.
    pub fn is_storage_degraded(&self) -> bool {
        self.mirror.is_degraded()
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Authenticate against the identity service.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Auth` when no identity matches; the session
    /// is left as it was.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &SecretString) -> Result<UserIdentity> {
        let auth = AuthService::new(&self.services, self.options.credential_scheme);
        let result = auth.login(email, password).await;
        match result {
            Ok(identity) => {
                self.notify(
                    NoticeLevel::Success,
                    format!("Welcome back, {}!", identity.display_name()),
                );
                self.authenticate(identity.clone());
                Ok(identity)
            }
            Err(e) => {
                self.notify(NoticeLevel::Danger, e.user_message());
                Err(e.into())
            }
        }
    }

    /// Create an account and authenticate as it.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Auth` with `DuplicateIdentity`,
    /// `InvalidEmail`, `WeakPassword` or `CreationFailed`; the session is left
    /// as it was.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&mut self, registration: Registration) -> Result<UserIdentity> {
        let auth = AuthService::new(&self.services, self.options.credential_scheme);
        let result = auth.register(registration).await;
        match result {
            Ok(identity) => {
                self.notify(NoticeLevel::Success, "Account created, welcome!".to_string());
                self.authenticate(identity.clone());
                Ok(identity)
            }
            Err(e) => {
                self.notify(NoticeLevel::Danger, e.user_message());
                Err(e.into())
            }
        }
    }

    fn authenticate(&mut self, identity: UserIdentity) {
        info!(user_id = %identity.id, "User logged in");
        set_sentry_user(&identity.id, Some(identity.email.as_str()));
        add_breadcrumb("auth", "Logged in", Some(&[("user_id", identity.id.as_str())]));

        self.mirror.write_through(MirrorKey::CurrentUser, &identity);
        self.session = Session::Authenticated(identity);
        self.publish();
    }

    /// End the session. Cart and wishlist are kept.
    ///
    /// Returns the page to navigate to.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> &str {
        if let Some(identity) = self.session.identity() {
            info!(user_id = %identity.id, "User logged out");
        }
        self.session = Session::Anonymous;
        self.mirror.forget(MirrorKey::CurrentUser);

        clear_sentry_user();
        add_breadcrumb("auth", "Logged out", None);
        self.publish();
        self.notify(NoticeLevel::Info, "You have been logged out".to_string());

        &self.options.home_path
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add `quantity` units of `product` to the cart and return the line's
    /// new quantity.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Cart` if `quantity` is zero.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) -> Result<u32> {
        let line_quantity = self.cart.add(product, quantity)?;

        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("product_id", product.id.as_str())]),
        );
        self.persist_cart();
        self.notify(NoticeLevel::Success, format!("{} added to cart", product.name));
        Ok(line_quantity)
    }

    /// Look up a product and add it to the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::ProductNotFound` if the catalog has no such
    /// product, or `StorefrontError::Cart` if `quantity` is zero.
    pub async fn add_to_cart_by_id(&mut self, id: &ProductId, quantity: u32) -> Result<u32> {
        let product = self
            .services
            .get_product(id)
            .await
            .ok_or_else(|| StorefrontError::ProductNotFound(id.clone()))?;
        self.add_to_cart(&product, quantity)
    }

    /// Remove a line. Returns `false` if the product was not in the cart.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        if !self.cart.remove(id) {
            return false;
        }
        add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", id.as_str())]));
        self.persist_cart();
        self.notify(NoticeLevel::Info, "Item removed from cart".to_string());
        true
    }

    /// Set a line's quantity; zero or less removes it.
    #[instrument(skip(self))]
    pub fn set_cart_quantity(&mut self, id: &ProductId, quantity: i64) -> QuantityChange {
        let change = self.cart.set_quantity(id, quantity);
        match change {
            QuantityChange::Unchanged => {}
            QuantityChange::Removed => {
                add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", id.as_str())]));
                self.persist_cart();
                self.notify(NoticeLevel::Info, "Item removed from cart".to_string());
            }
            QuantityChange::Updated => {
                add_breadcrumb("cart", "Updated quantity", Some(&[("product_id", id.as_str())]));
                self.persist_cart();
            }
        }
        change
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        add_breadcrumb("cart", "Cleared cart", None);
        self.persist_cart();
    }

    fn persist_cart(&mut self) {
        self.mirror.write_through(MirrorKey::Cart, &self.cart);
        self.publish();
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Add or remove `product`. Returns `true` when it was added.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn toggle_wishlist(&mut self, product: &Product) -> bool {
        let added = self.wishlist.toggle(product);

        add_breadcrumb(
            "wishlist",
            if added { "Added to wishlist" } else { "Removed from wishlist" },
            Some(&[("product_id", product.id.as_str())]),
        );
        self.mirror.write_through(MirrorKey::Wishlist, &self.wishlist);
        self.publish();

        if added {
            self.notify(NoticeLevel::Success, format!("{} added to wishlist", product.name));
        } else {
            self.notify(NoticeLevel::Info, format!("{} removed from wishlist", product.name));
        }
        added
    }

    /// Look up a product and toggle it in the wishlist.
    ///
    /// A product already in the wishlist is removed without a catalog call.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::ProductNotFound` if the product is neither in
    /// the wishlist nor in the catalog.
    pub async fn toggle_wishlist_by_id(&mut self, id: &ProductId) -> Result<bool> {
        let known = self
            .wishlist
            .entries()
            .iter()
            .find(|entry| &entry.id == id)
            .cloned();
        let product = match known {
            Some(product) => product,
            None => self
                .services
                .get_product(id)
                .await
                .ok_or_else(|| StorefrontError::ProductNotFound(id.clone()))?,
        };
        Ok(self.toggle_wishlist(&product))
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Products, optionally restricted to a category. Empty on failure.
    pub async fn products(&self, filter: &ProductFilter) -> Vec<Product> {
        self.services.list_products(filter).await
    }

    /// A single product.
    pub async fn product(&self, id: &ProductId) -> Option<Product> {
        self.services.get_product(id).await
    }

    /// Every category. Empty on failure.
    pub async fn categories(&self) -> Vec<Category> {
        self.services.list_categories().await
    }

    fn require_administrator(&self) -> Result<()> {
        if self.is_administrator() {
            Ok(())
        } else {
            warn!("Catalog change refused without administrator session");
            Err(StorefrontError::Forbidden)
        }
    }

    /// Create a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Forbidden` without an administrator session,
    /// or `StorefrontError::CatalogRejected` if the service refuses.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product> {
        self.require_administrator()?;
        let product = self
            .services
            .create_product(draft)
            .await
            .ok_or_else(|| StorefrontError::CatalogRejected(draft.name.clone()))?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Replace a catalog product's fields.
    ///
    /// Cart and wishlist copies keep the fields they were added with.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Forbidden` without an administrator session,
    /// or `StorefrontError::CatalogRejected` if the service refuses.
    #[instrument(skip(self, draft))]
    pub async fn update_product(&self, id: &ProductId, draft: &ProductDraft) -> Result<Product> {
        self.require_administrator()?;
        let product = self
            .services
            .update_product(id, draft)
            .await
            .ok_or_else(|| StorefrontError::CatalogRejected(id.to_string()))?;
        info!(product_id = %product.id, "Product updated");
        Ok(product)
    }

    /// Delete a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Forbidden` without an administrator session,
    /// or `StorefrontError::CatalogRejected` if the service refuses.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<()> {
        self.require_administrator()?;
        if !self.services.delete_product(id).await {
            return Err(StorefrontError::CatalogRejected(id.to_string()));
        }
        info!(product_id = %id, "Product deleted");
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Submit the cart as an order and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::NotAuthenticated` when anonymous,
    /// `StorefrontError::EmptyCart` with nothing to order, or
    /// `StorefrontError::OrderRejected` if the service refuses; the cart is
    /// kept in every error case.
    #[instrument(skip(self, shipping_address))]
    pub async fn place_order(&mut self, shipping_address: &str) -> Result<Order> {
        let user_id = self
            .current_user()
            .map(|identity| identity.id.clone())
            .ok_or(StorefrontError::NotAuthenticated)?;
        if self.cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }

        let order = NewOrder {
            user_id,
            items: self.cart.lines().iter().map(OrderLine::from).collect(),
            total: self.cart.total(),
            status: OrderStatus::Pending,
            shipping_address: shipping_address.to_string(),
            created_at: chrono::Utc::now(),
        };

        let Some(created) = self.services.create_order(&order).await else {
            warn!(user_id = %order.user_id, "Order rejected");
            self.notify(NoticeLevel::Danger, StorefrontError::OrderRejected.user_message());
            return Err(StorefrontError::OrderRejected);
        };

        info!(order_id = %created.id, total = %created.details.total, "Order placed");
        add_breadcrumb("checkout", "Order placed", Some(&[("order_id", created.id.as_str())]));

        self.cart.clear();
        self.persist_cart();
        self.notify(NoticeLevel::Success, format!("Order {} placed", created.id));
        Ok(created)
    }

    /// Orders of the current user. Empty on failure.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::NotAuthenticated` when anonymous.
    pub async fn orders(&self) -> Result<Vec<Order>> {
        let identity = self.current_user().ok_or(StorefrontError::NotAuthenticated)?;
        Ok(self.services.list_orders_for_user(&identity.id).await)
    }

    // =========================================================================
    // Fragments
    // =========================================================================

    /// Render the cart fragment.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Render` if rendering fails.
    pub fn render_cart(&self) -> Result<String> {
        Ok(fragments::cart(&self.cart)?)
    }

    /// Render a product card, marked when the product is wishlisted.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Render` if rendering fails.
    pub fn render_product_card(&self, product: &Product) -> Result<String> {
        Ok(fragments::product_card(product, &self.wishlist)?)
    }

    /// Render a category card.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Render` if rendering fails.
    pub fn render_category_card(&self, category: &Category) -> Result<String> {
        Ok(fragments::category_card(category)?)
    }

    /// Render the cart and wishlist badges.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Render` if rendering fails.
    pub fn render_badges(&self) -> Result<String> {
        let projection = self.projection();
        let cart = fragments::badge("cart-badge", projection.cart)?;
        let wishlist = fragments::badge("wishlist-badge", projection.wishlist)?;
        Ok(format!("{cart}\n{wishlist}"))
    }

    // =========================================================================
    // Publication
    // =========================================================================

    fn publish(&self) {
        self.projection
            .send_replace(Projection::derive(&self.session, &self.cart, &self.wishlist));
    }

    fn notify(&self, level: NoticeLevel, message: String) {
        tracing::debug!(%level, %message, "Notice");
        // No receiver is not an error.
        let _ = self.notices.send(Notice { level, message });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use boutique_core::{CategoryId, Email, Price, StoredCredential, UserId};
    use serde_json::Map;

    use super::*;
    use crate::mirror::{KeyValueStore, MemoryStore};
    use crate::services::{AuthError, InMemoryTables};

    fn product(id: &str, cents: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Produit {id}"),
            description: String::new(),
            price: Price::from_cents(cents),
            image: String::new(),
            category: CategoryId::new("deco"),
            rating: 4.0,
            reviews_count: 1,
            featured: false,
        }
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    fn tables_with_user(is_admin: bool) -> InMemoryTables {
        let tables = InMemoryTables::new();
        tables.seed_user(UserIdentity {
            id: UserId::new("u1"),
            email: Email::parse("marie@boutique.fr").unwrap(),
            credential: StoredCredential::new("cHc=".to_owned()),
            is_admin,
            attributes: Map::new(),
        });
        tables
    }

    fn open_storefront(tables: InMemoryTables) -> (Storefront<InMemoryTables>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let storefront = Storefront::open(
            tables,
            Mirror::new(Arc::clone(&store)),
            StorefrontOptions {
                credential_scheme: CredentialScheme::Legacy,
                ..StorefrontOptions::default()
            },
        );
        (storefront, store)
    }

    #[tokio::test]
    async fn test_login_publishes_nav_and_persists() {
        let (mut storefront, store) = open_storefront(tables_with_user(false));
        let mut projection = storefront.subscribe();
        assert!(projection.borrow_and_update().nav.anonymous_links);

        storefront.login("marie@boutique.fr", &secret("pw")).await.unwrap();

        assert!(projection.has_changed().unwrap());
        let nav = projection.borrow_and_update().nav;
        assert!(nav.user_links && !nav.anonymous_links && !nav.admin_links);
        assert!(store.read("currentUser").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_bad_login_stays_anonymous_with_notice() {
        let (mut storefront, store) = open_storefront(tables_with_user(false));
        let mut notices = storefront.subscribe_notices();

        let err = storefront
            .login("marie@boutique.fr", &secret("faux"))
            .await
            .unwrap_err();

        assert!(matches!(err, StorefrontError::Auth(AuthError::InvalidCredentials)));
        assert!(!storefront.is_authenticated());
        assert!(store.read("currentUser").unwrap().is_none());
        assert_eq!(notices.recv().await.unwrap().level, NoticeLevel::Danger);
    }

    #[tokio::test]
    async fn test_logout_keeps_cart_and_wishlist() {
        let (mut storefront, store) = open_storefront(tables_with_user(false));
        storefront.login("marie@boutique.fr", &secret("pw")).await.unwrap();
        storefront.add_to_cart(&product("a", 100), 2).unwrap();
        storefront.toggle_wishlist(&product("b", 100));

        assert_eq!(storefront.logout(), "index.html");
        assert_eq!(storefront.logout(), "index.html");

        assert!(!storefront.is_authenticated());
        assert!(store.read("currentUser").unwrap().is_none());
        assert_eq!(storefront.cart().count(), 2);
        assert_eq!(storefront.wishlist().len(), 1);
        assert!(store.read("cart").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cart_mutations_publish_badges() {
        let (mut storefront, _store) = open_storefront(InMemoryTables::new());
        let lampe = product("lampe", 1500);

        storefront.add_to_cart(&lampe, 2).unwrap();
        assert_eq!(storefront.projection().cart.count, 2);

        assert_eq!(
            storefront.set_cart_quantity(&lampe.id, 0),
            QuantityChange::Removed
        );
        assert!(!storefront.projection().cart.visible);
        assert!(storefront.add_to_cart(&lampe, 0).is_err());
    }

    #[tokio::test]
    async fn test_admin_guard() {
        let (mut storefront, _store) = open_storefront(tables_with_user(false));
        let draft = ProductDraft::from(product("x", 100));

        assert!(matches!(
            storefront.create_product(&draft).await,
            Err(StorefrontError::Forbidden)
        ));
        storefront.login("marie@boutique.fr", &secret("pw")).await.unwrap();
        assert!(matches!(
            storefront.create_product(&draft).await,
            Err(StorefrontError::Forbidden)
        ));

        let (mut admin, _store) = open_storefront(tables_with_user(true));
        admin.login("marie@boutique.fr", &secret("pw")).await.unwrap();
        let created = admin.create_product(&draft).await.unwrap();
        admin.delete_product(&created.id).await.unwrap();
        assert!(matches!(
            admin.delete_product(&created.id).await,
            Err(StorefrontError::CatalogRejected(_))
        ));
    }

    #[tokio::test]
    async fn test_place_order_requirements() {
        let (mut storefront, _store) = open_storefront(tables_with_user(false));
        assert!(matches!(
            storefront.place_order("1 rue de Paris").await,
            Err(StorefrontError::NotAuthenticated)
        ));

        storefront.login("marie@boutique.fr", &secret("pw")).await.unwrap();
        assert!(matches!(
            storefront.place_order("1 rue de Paris").await,
            Err(StorefrontError::EmptyCart)
        ));

        storefront.add_to_cart(&product("a", 1000), 3).unwrap();
        let order = storefront.place_order("1 rue de Paris").await.unwrap();
        assert_eq!(order.details.total, Price::from_cents(3000));
        assert_eq!(order.details.status, OrderStatus::Pending);
        assert!(storefront.cart().is_empty());
        assert_eq!(storefront.orders().await.unwrap().len(), 1);
    }
}
