//! Bakery REST backend client (management surface).
//!
//! Unlike the storefront client this one is uncached: the back-office
//! always works against fresh data, and it is the only caller of the
//! mutating catalog and user endpoints.

pub mod types;

pub use types::*;

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::instrument;

use miga_core::{OrderId, OrderStatus, ProductId, UserId, UserRole};

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

    /// Any other non-success status.
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Client for the bakery backend's management surface.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl AdminClient {
    /// Create a new management client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(AdminClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_token: config
                    .api_token
                    .as_ref()
                    .map(|token| token.expose_secret().to_string()),
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

    async fn check(
        what: &str,
        response: reqwest::Response,
    ) -> Result<String, BackendError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        Err(match status {
            reqwest::StatusCode::NOT_FOUND => BackendError::NotFound(what.to_string()),
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                BackendError::Unauthorized
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
        })
    }

    /// Send a request and decode a JSON response.
    async fn execute<T: DeserializeOwned>(
        &self,
        what: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let body = Self::check(what, builder.send().await?).await?;

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

    /// Send a request where only the status matters (e.g. DELETE).
    async fn execute_empty(
        &self,
        what: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<(), BackendError> {
        Self::check(what, builder.send().await?).await.map(|_| ())
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Authenticate against the backend.
    ///
    /// Role checks happen at the route layer; this returns whatever user
    /// the backend knows.
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

    /// Register a user (used by the CLI bootstrap).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
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
    // Products
    // =========================================================================

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, BackendError> {
        self.execute("products", self.request(reqwest::Method::GET, "/productos"))
            .await
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, BackendError> {
        self.execute(
            &format!("product {id}"),
            self.request(reqwest::Method::GET, &format!("/productos/{id}")),
        )
        .await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, payload))]
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Product, BackendError> {
        self.execute(
            "product",
            self.request(reqwest::Method::POST, "/productos").json(payload),
        )
        .await
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self, payload), fields(id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<Product, BackendError> {
        self.execute(
            &format!("product {id}"),
            self.request(reqwest::Method::PATCH, &format!("/productos/{id}"))
                .json(payload),
        )
        .await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), BackendError> {
        self.execute_empty(
            &format!("product {id}"),
            self.request(reqwest::Method::DELETE, &format!("/productos/{id}")),
        )
        .await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// List orders, optionally filtered to one user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, user: Option<&str>) -> Result<Vec<Order>, BackendError> {
        let mut builder = self.request(reqwest::Method::GET, "/pedidos");
        if let Some(user) = user {
            builder = builder.query(&[("usuario", user)]);
        }
        self.execute("orders", builder).await
    }

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, BackendError> {
        self.execute(
            &format!("order {id}"),
            self.request(reqwest::Method::GET, &format!("/pedidos/{id}")),
        )
        .await
    }

    /// Update an order's status.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the request fails.
    #[instrument(skip(self), fields(id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, BackendError> {
        self.execute(
            &format!("order {id}"),
            self.request(reqwest::Method::PATCH, &format!("/pedidos/{id}"))
                .json(&StatusPatch { status }),
        )
        .await
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, BackendError> {
        self.execute("users", self.request(reqwest::Method::GET, "/usuarios"))
            .await
    }

    /// Change a user's role.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is not found or the request fails.
    #[instrument(skip(self), fields(id = %id, role = %role))]
    pub async fn update_user_role(
        &self,
        id: UserId,
        role: UserRole,
    ) -> Result<User, BackendError> {
        self.execute(
            &format!("user {id}"),
            self.request(reqwest::Method::PATCH, &format!("/usuarios/{id}"))
                .json(&RolePatch { role }),
        )
        .await
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is not found or the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), BackendError> {
        self.execute_empty(
            &format!("user {id}"),
            self.request(reqwest::Method::DELETE, &format!("/usuarios/{id}")),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::NotFound("order 9".to_string());
        assert_eq!(err.to_string(), "Not found: order 9");
    }
}
