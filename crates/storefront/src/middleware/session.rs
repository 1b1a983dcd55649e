//! tower-sessions layer.
//!
//! The session is the only client-bound state the storefront keeps: the
//! current user record, the cart, the notification slot, and the order
//! waiting for its confirmation render. An in-memory store suffices since
//! nothing in it is meant to outlive a deployment.

use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "miga_session";

/// Build the session layer. The cookie is marked secure whenever the
/// public base URL is https.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)))
        .with_secure(config.base_url.starts_with("https://"))
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
