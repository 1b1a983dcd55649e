//! Checkout route handlers.
//!
//! Ordering obligations: validate locally first (no backend call on a
//! validation failure), POST the order on success, and only clear the cart
//! once the confirmation view actually renders - backing out of a
//! mid-flight checkout keeps the cart intact.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;

use miga_core::Severity;

use crate::backend::{Order, OrderItem};
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::session_keys;
use crate::routes::FlashView;
use crate::routes::cart::CartView;
use crate::services::checkout::{CheckoutForm, FieldErrors, build_order, validate};
use crate::state::AppState;
use crate::store;

// =============================================================================
// View Types
// =============================================================================

/// Order item display data for the confirmation page.
#[derive(Clone)]
pub struct OrderItemView {
    pub name: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&OrderItem> for OrderItemView {
    fn from(item: &OrderItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity,
            line_total: (item.unit_price * item.quantity).to_string(),
        }
    }
}

/// Order display data for the confirmation page.
#[derive(Clone)]
pub struct OrderView {
    pub id: i32,
    pub customer_name: String,
    pub address: String,
    pub delivery_date: String,
    pub total: String,
    pub items: Vec<OrderItemView>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.get(),
            customer_name: order.customer_name.clone(),
            address: order.address.clone(),
            delivery_date: order.delivery_date.to_string(),
            total: order.total.to_string(),
            items: order.items.iter().map(OrderItemView::from).collect(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Checkout form template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/form.html")]
pub struct CheckoutFormTemplate {
    pub cart: CartView,
    pub values: CheckoutForm,
    pub errors: FieldErrors,
    pub flash: Option<FlashView>,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate {
    pub order: OrderView,
    pub flash: Option<FlashView>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the delivery form.
///
/// An empty cart has nothing to check out; redirect back to the cart page.
#[instrument(skip(session))]
pub async fn form(session: Session, OptionalAuth(user): OptionalAuth) -> Result<Response> {
    let cart = store::load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let mut values = CheckoutForm::default();
    if let Some(user) = user {
        values.name = user.name;
        values.email = user.email;
    }

    let flash = store::current_notification(&session).await?.map(FlashView::from);

    Ok(CheckoutFormTemplate {
        cart: CartView::from(&cart),
        values,
        errors: FieldErrors::default(),
        flash,
    }
    .into_response())
}

/// Validate the form and place the order.
///
/// On validation failure the form re-renders with field messages and no
/// request is made. On a backend failure the cart and the form survive for
/// a manual retry; there is no automatic retry.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<CheckoutForm>,
) -> Result<Response> {
    let cart = store::load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let today = Utc::now().date_naive();
    let checkout = match validate(&form, today) {
        Ok(checkout) => checkout,
        Err(errors) => {
            return Ok(CheckoutFormTemplate {
                cart: CartView::from(&cart),
                values: form,
                errors,
                flash: None,
            }
            .into_response());
        }
    };

    let order = build_order(&cart, &checkout, user.as_ref().map(|u| u.email.as_str()));

    match state.backend().create_order(&order).await {
        Ok(placed) => {
            session.insert(session_keys::PENDING_ORDER, &placed).await?;
            Ok(Redirect::to("/checkout/confirmation").into_response())
        }
        Err(e) => {
            tracing::error!("Failed to place order: {e}");
            store::notify(
                &session,
                "No pudimos procesar tu pedido. Inténtalo de nuevo.",
                Severity::Error,
            )
            .await?;

            let flash = store::current_notification(&session).await?.map(FlashView::from);
            Ok(CheckoutFormTemplate {
                cart: CartView::from(&cart),
                values: form,
                errors: FieldErrors::default(),
                flash,
            }
            .into_response())
        }
    }
}

/// Display the confirmation page for the order just placed.
///
/// The cart is cleared here, not at submit time: a customer who navigates
/// back before this view renders keeps their cart.
#[instrument(skip(session))]
pub async fn confirmation(session: Session) -> Result<Response> {
    let Some(order) = session
        .remove::<Order>(session_keys::PENDING_ORDER)
        .await?
    else {
        return Ok(Redirect::to("/").into_response());
    };

    let mut cart = store::load_cart(&session).await?;
    cart.clear();
    store::save_cart(&session, &cart).await?;

    store::notify(
        &session,
        format!("¡Pedido #{} recibido!", order.id),
        Severity::Success,
    )
    .await?;

    let flash = store::current_notification(&session).await?.map(FlashView::from);

    Ok(ConfirmationTemplate {
        order: OrderView::from(&order),
        flash,
    }
    .into_response())
}
