//! Login, registration, logout.
//!
//! Credentials are proxied to the backend's `/auth/login` and
//! `/auth/register`; the session keeps the returned user record. Failures
//! come back as a redirect with an `?error=` code so the page can show a
//! message without holding form state server-side. Logout removes only the
//! user key - the cart survives an explicit logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::backend::{BackendError, User};
use crate::error::{sentry_forget, sentry_identify};
use crate::filters;
use crate::middleware::{forget_user, remember_user};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Shortest password accepted at registration.
const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// `?error=` code carried through the post-redirect-get cycle.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
}

#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<&'static str>,
}

/// User-facing text for each `?error=` code.
fn describe_error(code: &str) -> &'static str {
    match code {
        "credentials" => "Correo o contraseña incorrectos",
        "email_taken" => "Ya existe una cuenta con este correo",
        "password_mismatch" => "Las contraseñas no coinciden",
        "password_too_short" => "La contraseña debe tener al menos 8 caracteres",
        "name_required" => "Ingresa tu nombre",
        "session" => "No pudimos iniciar tu sesión, inténtalo de nuevo",
        _ => "Algo salió mal, inténtalo de nuevo",
    }
}

/// Bind an authenticated backend user to the session and land on the
/// account page. Shared by login and registration.
async fn establish(session: &Session, user: User) -> Response {
    let current = CurrentUser::from(user);

    if let Err(e) = remember_user(session, &current).await {
        tracing::error!(error = %e, "session write failed after auth");
        return Redirect::to("/auth/login?error=session").into_response();
    }

    sentry_identify(&current.id, Some(&current.email));
    Redirect::to("/account").into_response()
}

pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().map(describe_error),
    }
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.backend().login(form.email.trim(), &form.password).await {
        Ok(user) => establish(&session, user).await,
        Err(BackendError::Unauthorized) => {
            Redirect::to("/auth/login?error=credentials").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "login call failed");
            Redirect::to("/auth/login?error=backend").into_response()
        }
    }
}

pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate {
        error: query.error.as_deref().map(describe_error),
    }
}

/// A successful registration signs the new customer in directly.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.name.trim().is_empty() {
        return Redirect::to("/auth/register?error=name_required").into_response();
    }
    if form.password != form.password_confirm {
        return Redirect::to("/auth/register?error=password_mismatch").into_response();
    }
    if form.password.len() < MIN_PASSWORD_LEN {
        return Redirect::to("/auth/register?error=password_too_short").into_response();
    }

    match state
        .backend()
        .register(form.name.trim(), form.email.trim(), &form.password)
        .await
    {
        Ok(user) => establish(&session, user).await,
        Err(BackendError::Conflict(_)) => {
            Redirect::to("/auth/register?error=email_taken").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "registration call failed");
            Redirect::to("/auth/register?error=failed").into_response()
        }
    }
}

/// Clears the user record only; cart and notification state stay with the
/// session.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = forget_user(&session).await {
        tracing::error!(error = %e, "session write failed on logout");
    }

    sentry_forget();
    Redirect::to("/").into_response()
}
