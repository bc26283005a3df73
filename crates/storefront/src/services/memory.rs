//! Tabular services held in process memory.
//!
//! Used for tests and for running the storefront without an endpoint. Row
//! IDs are generated as UUIDs. Taking the tables offline makes every call
//! behave like an unreachable endpoint.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use boutique_core::{
    Category, NewIdentity, NewOrder, Order, OrderId, Product, ProductDraft, ProductId, UserId,
    UserIdentity,
};

use super::{CatalogService, IdentityService, OrderService, ProductFilter};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserIdentity>,
    products: Vec<Product>,
    categories: Vec<Category>,
    orders: Vec<Order>,
}

/// In-memory implementation of every tabular service.
#[derive(Debug, Default)]
pub struct InMemoryTables {
    tables: Mutex<Tables>,
    offline: AtomicBool,
}

impl InMemoryTables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an unreachable endpoint: lists come back empty, lookups and
    /// writes come back absent.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a user row as-is.
    pub fn seed_user(&self, user: UserIdentity) {
        self.tables().users.push(user);
    }

    /// Insert a product row as-is.
    pub fn seed_product(&self, product: Product) {
        self.tables().products.push(product);
    }

    /// Insert a category row as-is.
    pub fn seed_category(&self, category: Category) {
        self.tables().categories.push(category);
    }

    /// Every stored user row.
    #[must_use]
    pub fn users(&self) -> Vec<UserIdentity> {
        self.tables().users.clone()
    }

    /// Every stored order row.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.tables().orders.clone()
    }
}

fn next_id() -> String {
    Uuid::new_v4().to_string()
}

fn product_from_draft(id: ProductId, draft: &ProductDraft) -> Product {
    Product {
        id,
        name: draft.name.clone(),
        description: draft.description.clone(),
        price: draft.price,
        image: draft.image.clone(),
        category: draft.category.clone(),
        rating: draft.rating,
        reviews_count: draft.reviews_count,
        featured: draft.featured,
    }
}

/// Free-text match in the spirit of the endpoint's `search` parameter.
fn matches_filter(product: &Product, filter: &ProductFilter) -> bool {
    filter.category.as_ref().is_none_or(|category| {
        product.category.as_str() == category || product.name.contains(category.as_str())
    })
}

impl IdentityService for InMemoryTables {
    async fn list_users(&self) -> Vec<UserIdentity> {
        if self.is_offline() {
            return Vec::new();
        }
        self.users()
    }

    async fn create_user(&self, candidate: &NewIdentity) -> Option<UserIdentity> {
        if self.is_offline() {
            return None;
        }
        let user = UserIdentity {
            id: UserId::new(next_id()),
            email: candidate.email.clone(),
            credential: candidate.credential.clone(),
            is_admin: candidate.is_admin,
            attributes: candidate.attributes.clone(),
        };
        self.tables().users.push(user.clone());
        Some(user)
    }
}

impl CatalogService for InMemoryTables {
    async fn list_products(&self, filter: &ProductFilter) -> Vec<Product> {
        if self.is_offline() {
            return Vec::new();
        }
        self.tables()
            .products
            .iter()
            .filter(|product| matches_filter(product, filter))
            .cloned()
            .collect()
    }

    async fn get_product(&self, id: &ProductId) -> Option<Product> {
        if self.is_offline() {
            return None;
        }
        self.tables()
            .products
            .iter()
            .find(|product| &product.id == id)
            .cloned()
    }

    async fn list_categories(&self) -> Vec<Category> {
        if self.is_offline() {
            return Vec::new();
        }
        self.tables().categories.clone()
    }

    async fn create_product(&self, draft: &ProductDraft) -> Option<Product> {
        if self.is_offline() {
            return None;
        }
        let product = product_from_draft(ProductId::new(next_id()), draft);
        self.tables().products.push(product.clone());
        Some(product)
    }

    async fn update_product(&self, id: &ProductId, draft: &ProductDraft) -> Option<Product> {
        if self.is_offline() {
            return None;
        }
        let mut tables = self.tables();
        let row = tables.products.iter_mut().find(|product| &product.id == id)?;
        *row = product_from_draft(id.clone(), draft);
        Some(row.clone())
    }

    async fn delete_product(&self, id: &ProductId) -> bool {
        if self.is_offline() {
            return false;
        }
        let mut tables = self.tables();
        let before = tables.products.len();
        tables.products.retain(|product| &product.id != id);
        tables.products.len() != before
    }
}

impl OrderService for InMemoryTables {
    async fn create_order(&self, order: &NewOrder) -> Option<Order> {
        if self.is_offline() {
            return None;
        }
        let order = Order {
            id: OrderId::new(next_id()),
            details: order.clone(),
        };
        self.tables().orders.push(order.clone());
        Some(order)
    }

    async fn list_orders_for_user(&self, user_id: &UserId) -> Vec<Order> {
        if self.is_offline() {
            return Vec::new();
        }
        self.tables()
            .orders
            .iter()
            .filter(|order| &order.details.user_id == user_id)
            .cloned()
            .collect()
    }
}
