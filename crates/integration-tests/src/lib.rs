//! Integration tests for Miga.
//!
//! A `wiremock` server stands in for the bakery REST backend, so the
//! backend clients and the storefront router are exercised end to end
//! without a real API.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p miga-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_backend` - Storefront client against the mocked API
//! - `admin_backend` - Management client against the mocked API
//! - `storefront_routes` - Router smoke tests via `tower::ServiceExt`

use axum::Router;
use secrecy::SecretString;

use miga_admin::config::AdminConfig;
use miga_storefront::config::StorefrontConfig;

/// Session secret that satisfies the startup entropy checks.
const TEST_SESSION_SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6j";

/// Storefront configuration pointed at a mocked backend.
#[must_use]
pub fn storefront_config(backend_url: &str) -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        session_secret: SecretString::from(TEST_SESSION_SECRET),
        backend: miga_storefront::config::BackendConfig {
            base_url: backend_url.trim_end_matches('/').to_string(),
            api_token: None,
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Admin configuration pointed at a mocked backend.
#[must_use]
pub fn admin_config(backend_url: &str) -> AdminConfig {
    AdminConfig {
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        base_url: "http://localhost:3001".to_string(),
        session_secret: SecretString::from(TEST_SESSION_SECRET),
        backend: miga_admin::config::BackendConfig {
            base_url: backend_url.trim_end_matches('/').to_string(),
            api_token: None,
        },
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Build the full storefront router (routes + session layer + state)
/// against a mocked backend, ready for `oneshot` calls.
#[must_use]
pub fn storefront_app(backend_url: &str) -> Router {
    let config = storefront_config(backend_url);
    let state = miga_storefront::state::AppState::new(config.clone());
    let session_layer = miga_storefront::middleware::create_session_layer(&config);

    Router::new()
        .merge(miga_storefront::routes::routes())
        .layer(session_layer)
        .with_state(state)
}

/// A product JSON body in the backend's wire format.
#[must_use]
pub fn product_json(id: i32, name: &str, price: i64, category: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "nombre": name,
        "descripcion": "",
        "precio": price,
        "categoria": category,
        "destacado": true,
    })
}

/// A user JSON body in the backend's wire format.
#[must_use]
pub fn user_json(id: i32, name: &str, email: &str, role: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "nombre": name,
        "email": email,
        "rol": role,
    })
}

/// An order JSON body in the backend's wire format.
#[must_use]
pub fn order_json(id: i32, user: &str, total: i64, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "usuario": user,
        "nombre": "Ana Rojas",
        "telefono": "987654321",
        "correo": "ana@example.com",
        "direccion": "Av. Siempreviva 742",
        "fecha_entrega": "2025-07-01",
        "items": [],
        "total": total,
        "estado": status,
        "creado": "2025-06-15",
    })
}
