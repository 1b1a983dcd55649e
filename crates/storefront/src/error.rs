//! Route-level error type.
//!
//! Handlers return `Result<T, AppError>`. Server-side failures are captured
//! to Sentry on the way out; clients only ever get a short generic message,
//! never backend bodies or internals.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::backend::BackendError;

/// Anything a storefront handler can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    /// A call to the bakery backend failed.
    #[error("backend call failed: {0}")]
    Backend(#[from] BackendError),

    /// The session store rejected a read or write.
    #[error("session store failed: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request needs a signed-in user.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The client sent something unusable.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A bug on our side.
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    /// Status code and client-safe body for this error.
    fn client_view(&self) -> (StatusCode, String) {
        match self {
            Self::NotFound(_) | Self::Backend(BackendError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "No encontrado".into())
            }
            Self::Backend(BackendError::Unauthorized) | Self::Unauthorized(_) => {
                (StatusCode::UNAUTHORIZED, "Inicia sesión para continuar".into())
            }
            Self::Backend(BackendError::Conflict(_)) => {
                (StatusCode::CONFLICT, "El recurso ya existe".into())
            }
            Self::Backend(_) => (
                StatusCode::BAD_GATEWAY,
                "El servicio no está disponible, inténtalo de nuevo".into(),
            ),
            Self::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            Self::Session(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Error interno".into())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.client_view();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                %status,
                sentry_event_id = %event_id,
                "request failed"
            );
        }

        (status, message).into_response()
    }
}

/// Handler result alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Attach the signed-in user to the Sentry scope so later errors carry it.
pub fn sentry_identify(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Drop the user from the Sentry scope on logout.
pub fn sentry_forget() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn missing_resources_are_404() {
        assert_eq!(
            status_of(AppError::NotFound("torta".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Backend(BackendError::NotFound("torta".into()))),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn rejected_credentials_are_401() {
        assert_eq!(
            status_of(AppError::Backend(BackendError::Unauthorized)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Unauthorized("account page".into())),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn backend_failures_are_502() {
        let err = AppError::Backend(BackendError::Status {
            status: 500,
            body: "boom".into(),
        });
        assert_eq!(status_of(err), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn internal_failures_are_500() {
        assert_eq!(
            status_of(AppError::Internal("oops".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn bad_requests_keep_their_reason() {
        let err = AppError::BadRequest("cantidad inválida".into());
        assert_eq!(err.to_string(), "bad request: cantidad inválida");
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }
}
