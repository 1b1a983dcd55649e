//! Order management route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use miga_core::{OrderId, OrderStatus};

use crate::backend::{Order, OrderItem};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Order row display data.
#[derive(Clone)]
pub struct OrderRowView {
    pub id: i32,
    pub user: String,
    pub customer_name: String,
    pub delivery_date: String,
    pub total: String,
    pub status: &'static str,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.get(),
            user: order.user.clone(),
            customer_name: order.customer_name.clone(),
            delivery_date: order.delivery_date.to_string(),
            total: order.total.to_string(),
            status: order.status.label(),
        }
    }
}

/// Order item display data for the detail page.
#[derive(Clone)]
pub struct OrderItemRowView {
    pub name: String,
    pub details: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&OrderItem> for OrderItemRowView {
    fn from(item: &OrderItem) -> Self {
        let mut details = Vec::new();
        if let Some(size) = &item.size {
            details.push(size.clone());
        }
        if let Some(message) = &item.message {
            details.push(format!("\u{201c}{message}\u{201d}"));
        }
        if let Some(glaze) = &item.glaze {
            details.push(format!("glaseado {glaze}"));
        }

        Self {
            name: item.name.clone(),
            details: details.join(" · "),
            quantity: item.quantity,
            unit_price: item.unit_price.to_string(),
            line_total: (item.unit_price * item.quantity).to_string(),
        }
    }
}

/// Order detail display data.
#[derive(Clone)]
pub struct OrderDetailView {
    pub id: i32,
    pub user: String,
    pub customer_name: String,
    pub phone: String,
    pub contact_email: String,
    pub address: String,
    pub delivery_date: String,
    pub total: String,
    pub status: &'static str,
    pub next_status: Option<NextStatusView>,
    pub cancellable: bool,
    pub items: Vec<OrderItemRowView>,
}

/// The next fulfillment step, if any.
#[derive(Clone)]
pub struct NextStatusView {
    /// Wire value submitted back in the status form.
    pub value: String,
    pub label: &'static str,
}

impl From<&Order> for OrderDetailView {
    fn from(order: &Order) -> Self {
        let next_status = order.status.next().map(|next| NextStatusView {
            value: next.to_string(),
            label: next.label(),
        });

        Self {
            id: order.id.get(),
            user: order.user.clone(),
            customer_name: order.customer_name.clone(),
            phone: order.phone.clone(),
            contact_email: order.contact_email.clone(),
            address: order.address.clone(),
            delivery_date: order.delivery_date.to_string(),
            total: order.total.to_string(),
            status: order.status.label(),
            next_status,
            cancellable: !matches!(
                order.status,
                OrderStatus::Delivered | OrderStatus::Cancelled
            ),
            items: order.items.iter().map(OrderItemRowView::from).collect(),
        }
    }
}

/// Order list filter query.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub usuario: Option<String>,
}

/// Status change form data. Carries the wire value of the target status.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: OrderStatus,
}

/// Order list template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersTemplate {
    pub orders: Vec<OrderRowView>,
    pub filter: Option<String>,
}

/// Order detail template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub order: OrderDetailView,
}

/// Display the order list, optionally filtered to one user.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Query(query): Query<OrdersQuery>,
) -> Result<OrdersTemplate> {
    let filter = query.usuario.filter(|u| !u.is_empty());
    let orders = state.backend().list_orders(filter.as_deref()).await?;

    Ok(OrdersTemplate {
        orders: orders.iter().map(OrderRowView::from).collect(),
        filter,
    })
}

/// Display an order's detail page.
#[instrument(skip(state, _admin), fields(id = %id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<i32>,
) -> Result<OrderShowTemplate> {
    let order = state.backend().get_order(OrderId::new(id)).await?;

    Ok(OrderShowTemplate {
        order: OrderDetailView::from(&order),
    })
}

/// Change an order's status.
#[instrument(skip(state, _admin), fields(id = %id))]
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<i32>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect> {
    state
        .backend()
        .update_order_status(OrderId::new(id), form.status)
        .await?;

    Ok(Redirect::to(&format!("/orders/{id}")))
}
