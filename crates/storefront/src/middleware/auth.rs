//! Session-backed auth guards.
//!
//! Handlers opt into authentication by taking [`RequireAuth`] or
//! [`OptionalAuth`] as an argument; the session layer has already run by
//! the time either extractor looks at the request.

use axum::extract::FromRequestParts;
use axum::http::{StatusCode, header, request::Parts};
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// What an anonymous visitor gets from a guarded route: a redirect to the
/// login page, unless the request explicitly asked for a non-HTML content
/// type, which gets a bare 401 instead.
pub struct AuthRejection {
    wants_html: bool,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        if self.wants_html {
            Redirect::to("/auth/login").into_response()
        } else {
            StatusCode::UNAUTHORIZED.into_response()
        }
    }
}

fn wants_html(parts: &Parts) -> bool {
    match parts
        .headers
        .get(header::ACCEPT)
        .and_then(|accept| accept.to_str().ok())
    {
        Some(accept) => accept.contains("text/html") || accept.contains("*/*"),
        None => true,
    }
}

/// Read the signed-in user out of the session, if any.
///
/// Trust-on-read: a stored record is used as-is and never revalidated
/// against the backend.
async fn session_user(parts: &Parts) -> Option<CurrentUser> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get(session_keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

/// Guard for signed-in pages (account, order history).
pub struct RequireAuth(pub CurrentUser);

impl<S: Send + Sync> FromRequestParts<S> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match session_user(parts).await {
            Some(user) => Ok(Self(user)),
            None => Err(AuthRejection {
                wants_html: wants_html(parts),
            }),
        }
    }
}

/// Non-rejecting variant for pages that render for guests too.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S: Send + Sync> FromRequestParts<S> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_user(parts).await))
    }
}

/// Bind a freshly authenticated user to the session.
///
/// # Errors
///
/// Returns the session store's error when the write fails.
pub async fn remember_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Drop the user from the session on logout.
///
/// # Errors
///
/// Returns the session store's error when the write fails.
pub async fn forget_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}
