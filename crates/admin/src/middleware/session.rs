//! tower-sessions layer.
//!
//! Besides the admin identity, the session holds the dashboard's
//! configurable sales goal. Admin sessions are deliberately short-lived.

use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::AdminConfig;

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "miga_admin";

/// Build the session layer. The cookie is marked secure whenever the
/// public base URL is https.
#[must_use]
pub fn create_session_layer(config: &AdminConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_expiry(Expiry::OnInactivity(Duration::hours(24)))
        .with_secure(config.base_url.starts_with("https://"))
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
