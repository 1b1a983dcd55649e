//! Back-office routes.
//!
//! Everything except the login screen takes [`RequireAdminAuth`] and is
//! server-rendered HTML over classic form posts. Mutations follow
//! post-redirect-get back to the listing they came from.
//!
//! [`RequireAdminAuth`]: crate::middleware::RequireAdminAuth

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// The whole back-office surface; the health probe and static files are
/// wired in `main`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/goal", post(dashboard::set_goal))
        // Auth
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/logout", post(auth::logout))
        // Products
        .route(
            "/products",
            get(products::index).post(products::create),
        )
        .route("/products/new", get(products::new))
        .route("/products/{id}", post(products::update))
        .route("/products/{id}/edit", get(products::edit))
        .route("/products/{id}/delete", post(products::delete))
        // Orders
        .route("/orders", get(orders::index))
        .route("/orders/{id}", get(orders::show))
        .route("/orders/{id}/status", post(orders::set_status))
        // Customers
        .route("/customers", get(customers::index))
        .route("/customers/{id}/role", post(customers::set_role))
        .route("/customers/{id}/delete", post(customers::delete))
}
