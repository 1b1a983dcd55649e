//! Route-level error type for the back-office.
//!
//! Same contract as the storefront's: handlers return `Result<T, AppError>`,
//! server-side failures get captured to Sentry, clients see a short generic
//! body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::backend::BackendError;

/// Anything an admin handler can fail with.
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

    /// The client sent something unusable.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A bug on our side.
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    fn client_view(&self) -> (StatusCode, String) {
        match self {
            Self::NotFound(_) | Self::Backend(BackendError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Not found".into())
            }
            Self::Backend(_) => (StatusCode::BAD_GATEWAY, "Backend unavailable".into()),
            Self::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            Self::Session(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_variant() {
        assert_eq!(
            AppError::NotFound("order 9".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Backend(BackendError::Unauthorized)
                .into_response()
                .status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::BadRequest("empty name".into())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }
}
