//! Middleware stack: sessions and the admin guard.

pub mod auth;
pub mod session;

pub use auth::{RequireAdminAuth, forget_admin, remember_admin};
pub use session::create_session_layer;
