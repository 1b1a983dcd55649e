//! Cart route handlers.
//!
//! The cart lives in the session; every mutation goes through
//! [`crate::store`] and issues exactly one flash notification.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use miga_core::{Cart, CartLine, LineKey, Personalization, ProductId, Severity};

use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::FlashView;
use crate::state::AppState;
use crate::store;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub signature: String,
    pub name: String,
    pub details: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
    pub image: Option<String>,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        let mut details = Vec::new();
        if let Some(size) = &line.personalization.size {
            details.push(size.clone());
        }
        if let Some(message) = &line.personalization.message {
            details.push(format!("\u{201c}{message}\u{201d}"));
        }
        if let Some(glaze) = &line.personalization.glaze {
            details.push(format!("glaseado {glaze}"));
        }

        Self {
            product_id: line.product.id.get(),
            signature: line.key().signature,
            name: line.product.name.clone(),
            details: details.join(" · "),
            quantity: line.quantity,
            price: line.product.unit_price.to_string(),
            line_total: line.line_total().to_string(),
            image: line.product.image.clone(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0".to_string(),
            item_count: 0,
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            subtotal: cart.subtotal().to_string(),
            item_count: cart.total_items(),
        }
    }
}

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
    pub quantity: Option<u32>,
    pub size: Option<String>,
    pub message: Option<String>,
    pub glaze: Option<String>,
}

/// Quantity adjustment actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityAction {
    Increment,
    Decrement,
    Set,
}

/// Update cart form data. The line is addressed by its full identity:
/// base product plus personalization signature.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i32,
    #[serde(default)]
    pub signature: String,
    pub action: QuantityAction,
    pub quantity: Option<u32>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub flash: Option<FlashView>,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Treat empty form strings as absent personalization fields.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartShowTemplate> {
    let cart = store::load_cart(&session).await?;
    let flash = store::current_notification(&session).await?.map(FlashView::from);

    Ok(CartShowTemplate {
        cart: CartView::from(&cart),
        flash,
    })
}

/// Add an item to the cart.
///
/// Fetches the product so the cart line carries a snapshot priced for the
/// chosen size. An identical line (same product and personalization) is
/// merged by incrementing its quantity.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let quantity = form.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest(
            "La cantidad debe ser mayor que cero".to_string(),
        ));
    }

    let product = state
        .backend()
        .get_product(ProductId::new(form.product_id))
        .await?;

    let personalization = Personalization {
        size: non_empty(form.size),
        message: non_empty(form.message),
        glaze: non_empty(form.glaze),
    };

    let snapshot = product.snapshot(personalization.size.as_deref());

    let mut cart = store::load_cart(&session).await?;
    cart.add(snapshot, quantity, personalization);
    store::save_cart(&session, &cart).await?;

    store::notify(
        &session,
        format!("{quantity} × {} agregado al carrito", product.name),
        Severity::Success,
    )
    .await?;

    Ok(Redirect::to("/cart"))
}

/// Adjust the quantity of one cart line.
///
/// Decrementing a quantity-1 line removes it; setting zero does the same.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    let key = LineKey {
        product: ProductId::new(form.product_id),
        signature: form.signature,
    };

    let mut cart = store::load_cart(&session).await?;

    let new_quantity = match form.action {
        QuantityAction::Increment => cart.find(&key).map(|line| line.quantity + 1),
        QuantityAction::Decrement => cart.find(&key).map(|line| line.quantity.saturating_sub(1)),
        QuantityAction::Set => form.quantity,
    };

    let message = match new_quantity {
        Some(0) => {
            cart.set_quantity(&key, 0);
            "Producto eliminado del carrito"
        }
        Some(quantity) => {
            cart.set_quantity(&key, quantity);
            "Carrito actualizado"
        }
        // Unknown line or missing quantity: nothing to change
        None => "Carrito actualizado",
    };

    store::save_cart(&session, &cart).await?;
    store::notify(&session, message, Severity::Info).await?;

    Ok(Redirect::to("/cart"))
}

/// Remove all lines of a base product from the cart.
///
/// Removing an id that is not in the cart is a no-op, not an error.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let mut cart = store::load_cart(&session).await?;
    cart.remove_product(ProductId::new(form.product_id));
    store::save_cart(&session, &cart).await?;

    store::notify(&session, "Producto eliminado del carrito", Severity::Info).await?;

    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Redirect> {
    let mut cart = store::load_cart(&session).await?;
    cart.clear();
    store::save_cart(&session, &cart).await?;

    store::notify(&session, "Carrito vaciado", Severity::Info).await?;

    Ok(Redirect::to("/cart"))
}

/// Get cart count badge (fragment).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let cart = store::load_cart(&session).await?;
    Ok(CartCountTemplate {
        count: cart.total_items(),
    })
}
