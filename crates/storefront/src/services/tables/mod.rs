//! HTTP client for the tabular REST endpoint.
//!
//! Every table lives under `{base_url}/tables/{name}`. List responses are
//! wrapped as `{"data": [...]}`; single rows are returned bare.
//!
//! Catalog listings are cached with `moka` when a TTL is configured. Any
//! product write clears the catalog cache. Single-product lookups always go
//! to the endpoint.

mod cache;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use boutique_core::{
    Category, NewIdentity, NewOrder, Order, Product, ProductDraft, ProductId, UserId, UserIdentity,
};

use crate::config::ApiConfig;

use super::{CatalogService, IdentityService, OrderService, ProductFilter};
use cache::{CacheKey, CacheValue};

/// Errors that can occur when talking to the tabular endpoint.
#[derive(Debug, Error)]
pub enum TablesError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The base URL cannot have path segments appended.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// `{"data": [...]}` wrapper around list responses.
#[derive(Debug, Deserialize)]
struct ListResponse {
    data: Option<Vec<Value>>,
}

/// Client for the tabular REST endpoint.
///
/// Cheap to clone; clones share the connection pool and the cache.
#[derive(Clone)]
pub struct TablesClient {
    inner: Arc<TablesClientInner>,
}

struct TablesClientInner {
    client: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
    page_limit: u32,
    cache: Option<Cache<CacheKey, CacheValue>>,
}

impl std::fmt::Debug for TablesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TablesClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("page_limit", &self.inner.page_limit)
            .field("cached", &self.inner.cache.is_some())
            .finish_non_exhaustive()
    }
}

impl TablesClient {
    /// Create a new client. `cache_ttl` of `None` disables catalog caching.
    ///
    /// # Errors
    ///
    /// Returns `TablesError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, cache_ttl: Option<Duration>) -> Result<Self, TablesError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let cache = cache_ttl.map(|ttl| Cache::builder().max_capacity(1000).time_to_live(ttl).build());

        Ok(Self {
            inner: Arc::new(TablesClientInner {
                client: builder.build()?,
                base_url: config.base_url.clone(),
                token: config.token.clone(),
                page_limit: config.page_limit,
                cache,
            }),
        })
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    /// `{base_url}/tables/{segments...}`.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TablesError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TablesError::InvalidBaseUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .push("tables")
            .extend(segments);
        Ok(url)
    }

    /// List URL with the configured page limit and an optional search term.
    fn list_url(&self, table: &str, search: Option<&str>) -> Result<Url, TablesError> {
        let mut url = self.endpoint(&[table])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &self.inner.page_limit.to_string());
            if let Some(search) = search {
                query.append_pair("search", search);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.inner.client.request(method, url);
        match &self.inner.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Send a request and return the response body. `None` on 404.
    async fn execute(&self, request: RequestBuilder) -> Result<Option<String>, TablesError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.text().await?;

        if !status.is_success() {
            return Err(TablesError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(Some(body))
    }

    async fn fetch_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, TablesError> {
        match self.execute(self.request(Method::GET, url)).await? {
            Some(body) => decode_list(&body),
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_row<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>, TablesError> {
        match self.execute(request).await? {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Cache helpers
    // =========================================================================

    async fn cached(&self, key: &CacheKey) -> Option<CacheValue> {
        match &self.inner.cache {
            Some(cache) => cache.get(key).await,
            None => None,
        }
    }

    async fn remember(&self, key: CacheKey, value: CacheValue) {
        if let Some(cache) = &self.inner.cache {
            cache.insert(key, value).await;
        }
    }

    fn invalidate_catalog(&self) {
        if let Some(cache) = &self.inner.cache {
            cache.invalidate_all();
        }
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// `GET tables/users`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn try_list_users(&self) -> Result<Vec<UserIdentity>, TablesError> {
        self.fetch_list(self.list_url("users", None)?).await
    }

    /// `POST tables/users`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    #[instrument(skip(self, candidate), fields(email = %candidate.email))]
    pub async fn try_create_user(
        &self,
        candidate: &NewIdentity,
    ) -> Result<Option<UserIdentity>, TablesError> {
        let url = self.endpoint(&["users"])?;
        self.fetch_row(self.request(Method::POST, url).json(candidate)).await
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// `GET tables/products`, filtered by category through `search`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn try_list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, TablesError> {
        let key = CacheKey::Products(filter.clone());
        if let Some(CacheValue::Products(products)) = self.cached(&key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let url = self.list_url("products", filter.category.as_deref())?;
        let products: Vec<Product> = self.fetch_list(url).await?;

        self.remember(key, CacheValue::Products(products.clone())).await;
        Ok(products)
    }

    /// `GET tables/products/{id}`.
    ///
    /// Never served from the cache: the result is what a cart line snapshots
    /// its price from.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn try_get_product(&self, id: &ProductId) -> Result<Option<Product>, TablesError> {
        let url = self.endpoint(&["products", id.as_str()])?;
        self.fetch_row(self.request(Method::GET, url)).await
    }

    /// `GET tables/categories`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    #[instrument(skip(self))]
    pub async fn try_list_categories(&self) -> Result<Vec<Category>, TablesError> {
        if let Some(CacheValue::Categories(categories)) = self.cached(&CacheKey::Categories).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.fetch_list(self.list_url("categories", None)?).await?;

        self.remember(CacheKey::Categories, CacheValue::Categories(categories.clone()))
            .await;
        Ok(categories)
    }

    /// `POST tables/products`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn try_create_product(&self, draft: &ProductDraft) -> Result<Option<Product>, TablesError> {
        let url = self.endpoint(&["products"])?;
        let created = self.fetch_row(self.request(Method::POST, url).json(draft)).await;
        self.invalidate_catalog();
        created
    }

    /// `PUT tables/products/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    #[instrument(skip(self, draft), fields(product_id = %id))]
    pub async fn try_update_product(
        &self,
        id: &ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, TablesError> {
        let url = self.endpoint(&["products", id.as_str()])?;
        let updated = self.fetch_row(self.request(Method::PUT, url).json(draft)).await;
        self.invalidate_catalog();
        updated
    }

    /// `DELETE tables/products/{id}`. `false` when the row did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn try_delete_product(&self, id: &ProductId) -> Result<bool, TablesError> {
        let url = self.endpoint(&["products", id.as_str()])?;
        let deleted = self.execute(self.request(Method::DELETE, url)).await;
        self.invalidate_catalog();
        Ok(deleted?.is_some())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// `POST tables/orders`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    #[instrument(skip(self, order), fields(user_id = %order.user_id))]
    pub async fn try_create_order(&self, order: &NewOrder) -> Result<Option<Order>, TablesError> {
        let url = self.endpoint(&["orders"])?;
        self.fetch_row(self.request(Method::POST, url).json(order)).await
    }

    /// `GET tables/orders?search={user_id}`.
    ///
    /// The endpoint search is free text, so rows belonging to other users are
    /// filtered out here.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn try_list_orders_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, TablesError> {
        let url = self.list_url("orders", Some(user_id.as_str()))?;
        let orders: Vec<Order> = self.fetch_list(url).await?;
        Ok(orders
            .into_iter()
            .filter(|order| &order.details.user_id == user_id)
            .collect())
    }
}

/// Decode a `{"data": [...]}` list response. Missing `data` is an empty list.
///
/// Rows are decoded one by one; a row that does not fit `T` is logged and
/// skipped so the rest of the list survives.
fn decode_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, TablesError> {
    let response: ListResponse = serde_json::from_str(body)?;
    let rows = response.data.unwrap_or_default();
    let total = rows.len();

    let decoded: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed row");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        debug!(kept = decoded.len(), total, "Decoded list with skipped rows");
    }
    Ok(decoded)
}

/// Log a failed call and fall back to the empty value.
fn or_degrade<T: Default>(result: Result<T, TablesError>, operation: &'static str) -> T {
    result.unwrap_or_else(|e| {
        tracing::error!(error = %e, operation, "Tabular endpoint call failed");
        T::default()
    })
}

impl IdentityService for TablesClient {
    async fn list_users(&self) -> Vec<UserIdentity> {
        or_degrade(self.try_list_users().await, "list_users")
    }

    async fn create_user(&self, candidate: &NewIdentity) -> Option<UserIdentity> {
        or_degrade(self.try_create_user(candidate).await, "create_user")
    }
}

impl CatalogService for TablesClient {
    async fn list_products(&self, filter: &ProductFilter) -> Vec<Product> {
        or_degrade(self.try_list_products(filter).await, "list_products")
    }

    async fn get_product(&self, id: &ProductId) -> Option<Product> {
        or_degrade(self.try_get_product(id).await, "get_product")
    }

    async fn list_categories(&self) -> Vec<Category> {
        or_degrade(self.try_list_categories().await, "list_categories")
    }

    async fn create_product(&self, draft: &ProductDraft) -> Option<Product> {
        or_degrade(self.try_create_product(draft).await, "create_product")
    }

    async fn update_product(&self, id: &ProductId, draft: &ProductDraft) -> Option<Product> {
        or_degrade(self.try_update_product(id, draft).await, "update_product")
    }

    async fn delete_product(&self, id: &ProductId) -> bool {
        or_degrade(self.try_delete_product(id).await, "delete_product")
    }
}

impl OrderService for TablesClient {
    async fn create_order(&self, order: &NewOrder) -> Option<Order> {
        or_degrade(self.try_create_order(order).await, "create_order")
    }

    async fn list_orders_for_user(&self, user_id: &UserId) -> Vec<Order> {
        or_degrade(self.try_list_orders_for_user(user_id).await, "list_orders_for_user")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> TablesClient {
        let mut config = ApiConfig::new(base).unwrap();
        config.page_limit = 50;
        TablesClient::new(&config, Some(Duration::from_secs(60))).unwrap()
    }

    #[test]
    fn test_endpoint_joins_under_base_path() {
        let client = client("https://api.boutique.fr/v1");
        let url = client.endpoint(&["products", "p-1"]).unwrap();
        assert_eq!(url.as_str(), "https://api.boutique.fr/v1/tables/products/p-1");
    }

    #[test]
    fn test_endpoint_escapes_ids() {
        let client = client("https://api.boutique.fr/");
        let url = client.endpoint(&["products", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "https://api.boutique.fr/tables/products/a%2Fb%20c");
    }

    #[test]
    fn test_list_url_carries_limit_and_search() {
        let client = client("https://api.boutique.fr/");
        let all = client.list_url("products", None).unwrap();
        assert_eq!(all.as_str(), "https://api.boutique.fr/tables/products?limit=50");

        let filtered = client.list_url("products", Some("déco maison")).unwrap();
        assert_eq!(filtered.query(), Some("limit=50&search=d%C3%A9co+maison"));
    }

    #[test]
    fn test_decode_list_without_data_is_empty() {
        let categories: Vec<Category> = decode_list(r#"{"total": 0}"#).unwrap();
        assert!(categories.is_empty());
    }

    #[test]
    fn test_decode_list_reads_rows() {
        let body = r#"{"data": [{"id": 7, "name": "Lampe", "price": 29.99, "category": "deco"}]}"#;
        let products: Vec<Product> = decode_list(body).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products.first().unwrap().id, ProductId::new("7"));
    }

    #[test]
    fn test_decode_list_skips_malformed_rows() {
        let body = r#"{"data": [
            {"id": "u1", "email": "marie@boutique.fr", "password": "cHc=", "is_admin": null},
            {"id": "u2", "password": "x"},
            {"id": "u3", "email": "paul@boutique.fr", "password": "x", "is_admin": true}
        ]}"#;
        let users: Vec<UserIdentity> = decode_list(body).unwrap();

        let ids: Vec<&str> = users.iter().map(|user| user.id.as_str()).collect();
        assert_eq!(ids, ["u1", "u3"]);
        assert!(!users.first().unwrap().is_admin);
    }

    #[test]
    fn test_decode_list_keeps_products_next_to_bad_row() {
        let body = r#"{"data": [
            {"id": 1, "name": "Lampe", "price": 29.99, "category": "deco", "rating": null},
            {"id": 2, "name": "Vase", "category": "deco"}
        ]}"#;
        let products: Vec<Product> = decode_list(body).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products.first().unwrap().id, ProductId::new("1"));
    }

    #[test]
    fn test_decode_list_rejects_garbage() {
        assert!(matches!(
            decode_list::<Product>("<html>"),
            Err(TablesError::Parse(_))
        ));
    }

    /// Serve one canned JSON body per connection, then stop listening.
    async fn serve(bodies: Vec<&'static str>) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            for body in bodies {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut request = [0u8; 4096];
                let _ = socket.read(&mut request).await.unwrap();
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn test_product_lookup_bypasses_cache() {
        let base = serve(vec![
            r#"{"id": "1", "name": "Lampe", "price": "29.99", "category": "deco"}"#,
            r#"{"id": "1", "name": "Lampe", "price": "49.99", "category": "deco"}"#,
        ])
        .await;
        let client = client(&base);
        let id = ProductId::new("1");

        let first = client.try_get_product(&id).await.unwrap().unwrap();
        let second = client.try_get_product(&id).await.unwrap().unwrap();

        assert_eq!(first.price, boutique_core::Price::from_cents(2999));
        assert_eq!(second.price, boutique_core::Price::from_cents(4999));
    }

    #[tokio::test]
    async fn test_product_listing_is_cached() {
        let base = serve(vec![
            r#"{"data": [{"id": "1", "name": "Lampe", "price": "29.99", "category": "deco"}]}"#,
        ])
        .await;
        let client = client(&base);

        let first = client.try_list_products(&ProductFilter::all()).await.unwrap();
        // The server is gone; only the cache can answer.
        let second = client.try_list_products(&ProductFilter::all()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_degrades_to_empty() {
        // Nothing listens on the discard port.
        let client = client("http://127.0.0.1:9/");

        assert!(client.list_products(&ProductFilter::all()).await.is_empty());
        assert!(client.get_product(&ProductId::new("1")).await.is_none());
        assert!(client.list_users().await.is_empty());
        assert!(!client.delete_product(&ProductId::new("1")).await);
    }
}
