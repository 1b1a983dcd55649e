//! Storefront routes.
//!
//! Pages are plain server-rendered HTML with classic form posts; the only
//! fragment endpoint is the cart badge. Mutating cart endpoints redirect
//! back to the page they came from, carrying the flash notification in the
//! session.

pub mod account;
pub mod auth;
pub mod blog;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;

use axum::Router;
use axum::routing::{get, post};

use miga_core::Notification;

use crate::state::AppState;

/// Notification data as the templates render it.
#[derive(Clone)]
pub struct FlashView {
    pub token: u64,
    pub message: String,
    pub severity: &'static str,
}

impl From<Notification> for FlashView {
    fn from(notification: Notification) -> Self {
        Self {
            token: notification.token,
            severity: notification.severity.css_class(),
            message: notification.message,
        }
    }
}

/// The whole public surface; health probes and static files are wired in
/// `main` next to the middleware stack.
pub fn routes() -> Router<AppState> {
    let products = Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show));

    let cart = Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count));

    let checkout = Router::new()
        .route("/", get(checkout::form).post(checkout::submit))
        .route("/confirmation", get(checkout::confirmation));

    let auth = Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout));

    let account = Router::new()
        .route("/", get(account::index))
        .route("/orders", get(account::orders));

    Router::new()
        .route("/", get(home::home))
        .route("/blog", get(blog::index))
        .nest("/products", products)
        .nest("/cart", cart)
        .nest("/checkout", checkout)
        .nest("/auth", auth)
        .nest("/account", account)
}
