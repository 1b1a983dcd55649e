//! Middleware stack: sessions, auth guards, request correlation.
//!
//! Layer order in the router, outermost first: Sentry, request id,
//! sessions. The auth guards are extractors rather than layers; handlers
//! opt in per route.

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth, forget_user, remember_user};
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
