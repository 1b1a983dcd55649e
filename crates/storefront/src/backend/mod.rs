//! Bakery REST backend client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest`
//! - The backend is the source of truth - NO local sync, direct API calls
//! - In-memory caching via `moka` for read-mostly endpoints (5 minute TTL)
//!
//! This client covers the public surface only: catalog, blog, auth, and
//! order placement/history. The management surface (product CRUD, user
//! administration) lives in the admin binary's own client.
//!
//! # Example
//!
//! ```rust,ignore
//! use miga_storefront::backend::BakeryClient;
//!
//! let client = BakeryClient::new(&config.backend);
//!
//! let products = client.list_products().await?;
//! let user = client.login("ana@example.com", "hunter2!").await?;
//! ```

pub mod types;

pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use miga_core::ProductId;

use crate::config::BackendConfig;

/// Errors that can occur when talking to the bakery backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credentials rejected by the backend.
    #[error("Unauthorized")]
    Unauthorized,

    /// Resource conflict (e.g. email already registered).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other non-success status.
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Cached response payloads.
#[derive(Clone)]
enum CacheValue {
    Products(Arc<Vec<Product>>),
    Product(Arc<Product>),
    Posts(Arc<Vec<BlogPost>>),
}

/// Client for the bakery REST backend (public surface).
///
/// Catalog and blog reads are cached for 5 minutes.
#[derive(Clone)]
pub struct BakeryClient {
    inner: Arc<BakeryClientInner>,
}

struct BakeryClientInner {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
    cache: Cache<String, CacheValue>,
}

impl BakeryClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(BakeryClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_token: config
                    .api_token
                    .as_ref()
                    .map(|token| token.expose_secret().to_string()),
                cache,
            }),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.inner.base_url);
        let builder = self.inner.client.request(method, url);
        match &self.inner.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode a JSON response.
    ///
    /// `what` names the resource for error messages and logs.
    async fn execute<T: DeserializeOwned>(
        &self,
        what: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = builder.send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match status {
                reqwest::StatusCode::NOT_FOUND => BackendError::NotFound(what.to_string()),
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                    BackendError::Unauthorized
                }
                reqwest::StatusCode::CONFLICT => {
                    BackendError::Conflict(body.chars().take(200).collect())
                }
                _ => {
                    tracing::error!(
                        status = %status,
                        what = %what,
                        body = %body.chars().take(500).collect::<String>(),
                        "Backend returned non-success status"
                    );
                    BackendError::Status {
                        status: status.as_u16(),
                        body: body.chars().take(200).collect(),
                    }
                }
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                what = %what,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse backend response"
            );
            BackendError::Parse(e)
        })
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, BackendError> {
        let cache_key = "products".to_string();

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product list");
            return Ok((*products).clone());
        }

        let products: Vec<Product> = self
            .execute("products", self.request(reqwest::Method::GET, "/productos"))
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(Arc::new(products.clone())))
            .await;

        Ok(products)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, BackendError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok((*product).clone());
        }

        let product: Product = self
            .execute(
                &format!("product {id}"),
                self.request(reqwest::Method::GET, &format!("/productos/{id}")),
            )
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Arc::new(product.clone())))
            .await;

        Ok(product)
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Authenticate against the backend.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Unauthorized`] when the credentials are
    /// rejected, or another error if the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, BackendError> {
        self.execute(
            "login",
            self.request(reqwest::Method::POST, "/auth/login")
                .json(&LoginRequest { email, password }),
        )
        .await
    }

    /// Register a new customer account.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Conflict`] when the email is already taken,
    /// or another error if the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, BackendError> {
        self.execute(
            "register",
            self.request(reqwest::Method::POST, "/auth/register")
                .json(&RegisterRequest {
                    name,
                    email,
                    password,
                }),
        )
        .await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails. The cart is never mutated
    /// here; callers clear it only after the confirmation view renders.
    #[instrument(skip(self, order))]
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, BackendError> {
        self.execute(
            "order",
            self.request(reqwest::Method::POST, "/pedidos").json(order),
        )
        .await
    }

    /// List orders placed by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(user = %user))]
    pub async fn orders_for_user(&self, user: &str) -> Result<Vec<Order>, BackendError> {
        self.execute(
            "orders",
            self.request(reqwest::Method::GET, "/pedidos")
                .query(&[("usuario", user)]),
        )
        .await
    }

    // =========================================================================
    // Blog
    // =========================================================================

    /// List blog posts.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_posts(&self) -> Result<Vec<BlogPost>, BackendError> {
        let cache_key = "posts".to_string();

        if let Some(CacheValue::Posts(posts)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for blog posts");
            return Ok((*posts).clone());
        }

        let posts: Vec<BlogPost> = self
            .execute("posts", self.request(reqwest::Method::GET, "/blog"))
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Posts(Arc::new(posts.clone())))
            .await;

        Ok(posts)
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Probe the backend for readiness checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or unhealthy.
    pub async fn health(&self) -> Result<(), BackendError> {
        let response = self.request(reqwest::Method::GET, "/productos").send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(BackendError::Status {
                status: status.as_u16(),
                body: String::new(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");

        let err = BackendError::Status {
            status: 502,
            body: "upstream down".to_string(),
        };
        assert_eq!(err.to_string(), "Backend returned 502: upstream down");
    }

    #[test]
    fn test_unauthorized_display() {
        assert_eq!(BackendError::Unauthorized.to_string(), "Unauthorized");
    }
}
