//! Account route handlers (require authentication).

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::backend::Order;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Order summary display data for the history table.
#[derive(Clone)]
pub struct OrderSummaryView {
    pub id: i32,
    pub delivery_date: String,
    pub total: String,
    pub status: &'static str,
    pub item_count: u32,
}

impl From<&Order> for OrderSummaryView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.get(),
            delivery_date: order.delivery_date.to_string(),
            total: order.total.to_string(),
            status: order.status.label(),
            item_count: order.items.iter().map(|item| item.quantity).sum(),
        }
    }
}

/// Account overview template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountTemplate {
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "account/orders.html")]
pub struct OrdersTemplate {
    pub orders: Vec<OrderSummaryView>,
}

/// Display the account overview.
#[instrument(skip(user))]
pub async fn index(RequireAuth(user): RequireAuth) -> AccountTemplate {
    AccountTemplate {
        is_admin: user.is_admin(),
        name: user.name,
        email: user.email,
    }
}

/// Display the order history for the logged-in user.
#[instrument(skip(state, user))]
pub async fn orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<OrdersTemplate> {
    let orders = state.backend().orders_for_user(&user.email).await?;

    Ok(OrdersTemplate {
        orders: orders.iter().map(OrderSummaryView::from).collect(),
    })
}
