//! Admin auth guard.
//!
//! Every back-office page is server-rendered HTML, so the only rejection
//! is a redirect to the login screen. Only users whose backend role was
//! `admin` at login time ever reach the session; see the auth routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use crate::models::{CurrentAdmin, session_keys};

/// Guard on every back-office handler except the login screen itself.
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Anonymous visitors are bounced to the login page.
pub struct AdminAuthRejection;

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        Redirect::to("/auth/login").into_response()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequireAdminAuth {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts.extensions.get::<Session>().ok_or(AdminAuthRejection)?;

        session
            .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten()
            .map(Self)
            .ok_or(AdminAuthRejection)
    }
}

/// Bind a freshly authenticated admin to the session.
///
/// # Errors
///
/// Returns the session store's error when the write fails.
pub async fn remember_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Drop the admin from the session on logout.
///
/// # Errors
///
/// Returns the session store's error when the write fails.
pub async fn forget_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}
