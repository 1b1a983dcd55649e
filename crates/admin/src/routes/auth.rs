//! Admin authentication route handlers.
//!
//! Login goes through the backend's `/auth/login`; only users whose role
//! is `admin` get a session. Everyone else is bounced with the same
//! generic error to avoid leaking which accounts exist.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::backend::BackendError;
use crate::middleware::{forget_admin, remember_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

fn error_message(code: &str) -> String {
    match code {
        "credentials" => "Correo o contraseña incorrectos".to_string(),
        "session" => "No pudimos iniciar tu sesión, inténtalo de nuevo".to_string(),
        _ => "Algo salió mal, inténtalo de nuevo".to_string(),
    }
}

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().map(error_message),
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.backend().login(&form.email, &form.password).await {
        Ok(user) if user.role.is_admin() => {
            let admin = CurrentAdmin::from(user);

            if let Err(e) = remember_admin(&session, &admin).await {
                tracing::error!(error = %e, "session write failed after login");
                return Redirect::to("/auth/login?error=session").into_response();
            }

            Redirect::to("/").into_response()
        }
        Ok(user) => {
            tracing::warn!(email = %user.email, "Non-admin login attempt on admin panel");
            Redirect::to("/auth/login?error=credentials").into_response()
        }
        Err(BackendError::Unauthorized) => {
            Redirect::to("/auth/login?error=credentials").into_response()
        }
        Err(e) => {
            tracing::error!("Admin login failed: {e}");
            Redirect::to("/auth/login?error=backend").into_response()
        }
    }
}

/// Handle logout.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = forget_admin(&session).await {
        tracing::error!(error = %e, "session write failed on logout");
    }

    // Destroy the whole session; the stored sales goal goes with it
    if let Err(e) = session.flush().await {
        tracing::error!(error = %e, "session flush failed on logout");
    }

    Redirect::to("/auth/login").into_response()
}
