//! Integration tests for Boutique.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p boutique-integration-tests
//! ```
//!
//! No endpoint is needed: the storefront runs over [`InMemoryTables`] and a
//! [`FileStore`] rooted in a temporary directory. Opening the storefront
//! twice from the same [`TestContext`] simulates a restart.
//!
//! # Test Categories
//!
//! - `persistence` - State carried across restarts, legacy mirror files
//! - `session` - Login, registration and logout
//! - `degradation` - Storage failures and an unreachable endpoint
//! - `checkout` - Orders and the catalog administration guard

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use secrecy::SecretString;
use tempfile::TempDir;

use boutique_core::{
    Category, CategoryId, Email, Price, Product, ProductId, StoredCredential, UserId, UserIdentity,
};
use boutique_storefront::mirror::{FileStore, Mirror, MirrorKey};
use boutique_storefront::services::InMemoryTables;
use boutique_storefront::{Storefront, StorefrontOptions};

/// Email of the seeded customer.
pub const CUSTOMER_EMAIL: &str = "marie@boutique.fr";
/// Password of the seeded customer, stored in the legacy encoding.
pub const CUSTOMER_PASSWORD: &str = "pw";
/// Email of the seeded administrator.
pub const ADMIN_EMAIL: &str = "admin@boutique.fr";
/// Password of the seeded administrator, stored in the legacy encoding.
pub const ADMIN_PASSWORD: &str = "secret";

/// Tables and a data directory shared by every storefront opened from it.
pub struct TestContext {
    pub tables: Arc<InMemoryTables>,
    data_dir: TempDir,
}

impl TestContext {
    /// Two products, one category, a customer and an administrator.
    #[must_use]
    pub fn new() -> Self {
        let tables = InMemoryTables::new();
        tables.seed_product(product("1", "Lampe", 2999));
        tables.seed_product(product("2", "Vase", 1500));
        tables.seed_category(Category {
            id: CategoryId::new("deco"),
            name: "Déco".to_owned(),
            description: "Objets pour la maison".to_owned(),
            image: String::new(),
            icon: String::new(),
        });
        tables.seed_user(identity("u1", CUSTOMER_EMAIL, "cHc=", false));
        tables.seed_user(identity("u2", ADMIN_EMAIL, "c2VjcmV0", true));

        Self {
            tables: Arc::new(tables),
            data_dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Directory backing the mirror.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }

    /// File holding the mirrored value of `key`.
    #[must_use]
    pub fn mirror_file(&self, key: MirrorKey) -> PathBuf {
        self.data_dir().join(format!("{key}.json"))
    }

    /// Open a storefront with default options.
    #[must_use]
    pub fn open(&self) -> Storefront<Arc<InMemoryTables>> {
        self.open_with(StorefrontOptions::default())
    }

    /// Open a storefront, seeding its state from the data directory.
    #[must_use]
    pub fn open_with(&self, options: StorefrontOptions) -> Storefront<Arc<InMemoryTables>> {
        let store = FileStore::open(self.data_dir()).expect("open file store");
        Storefront::open(Arc::clone(&self.tables), Mirror::new(store), options)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A product in the `deco` category.
#[must_use]
pub fn product(id: &str, name: &str, cents: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: String::new(),
        price: Price::from_cents(cents),
        image: format!("{id}.jpg"),
        category: CategoryId::new("deco"),
        rating: 4.0,
        reviews_count: 3,
        featured: false,
    }
}

fn identity(id: &str, email: &str, credential: &str, is_admin: bool) -> UserIdentity {
    UserIdentity {
        id: UserId::new(id),
        email: Email::parse(email).expect("valid fixture email"),
        credential: StoredCredential::new(credential.to_owned()),
        is_admin,
        attributes: serde_json::Map::new(),
    }
}

#[must_use]
pub fn password(s: &str) -> SecretString {
    SecretString::from(s.to_owned())
}
