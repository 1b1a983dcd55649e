//! Customer management route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use miga_core::{UserId, UserRole};

use crate::backend::User;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Customer row display data.
#[derive(Clone)]
pub struct CustomerRowView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub email_encoded: String,
    pub role: String,
    pub is_admin: bool,
}

impl From<&User> for CustomerRowView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name.clone(),
            email_encoded: urlencoding::encode(&user.email).into_owned(),
            email: user.email.clone(),
            role: user.role.to_string(),
            is_admin: user.role.is_admin(),
        }
    }
}

/// Role change form data.
#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub role: UserRole,
}

/// Customer list template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/index.html")]
pub struct CustomersTemplate {
    pub customers: Vec<CustomerRowView>,
}

/// Display the customer list.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> Result<CustomersTemplate> {
    let users = state.backend().list_users().await?;

    Ok(CustomersTemplate {
        customers: users.iter().map(CustomerRowView::from).collect(),
    })
}

/// Change a customer's role.
///
/// An admin cannot demote their own account; that would lock the panel.
#[instrument(skip(state, admin), fields(id = %id))]
pub async fn set_role(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<i32>,
    Form(form): Form<RoleForm>,
) -> Result<Redirect> {
    let id = UserId::new(id);
    if id == admin.id && form.role == UserRole::Customer {
        return Err(AppError::BadRequest(
            "cannot demote your own account".to_string(),
        ));
    }

    state.backend().update_user_role(id, form.role).await?;

    Ok(Redirect::to("/customers"))
}

/// Delete a customer.
#[instrument(skip(state, admin), fields(id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    let id = UserId::new(id);
    if id == admin.id {
        return Err(AppError::BadRequest(
            "cannot delete your own account".to_string(),
        ));
    }

    state.backend().delete_user(id).await?;

    Ok(Redirect::to("/customers"))
}
