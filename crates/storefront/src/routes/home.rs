//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Number of products featured on the home page.
const FEATURED_COUNT: usize = 4;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured: Vec<ProductCardView>,
}

/// Display the home page with featured products.
///
/// A backend failure degrades to an empty featured section instead of
/// failing the whole page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let featured = match state.backend().list_products().await {
        Ok(products) => {
            let mut featured: Vec<ProductCardView> = products
                .iter()
                .filter(|p| p.featured)
                .map(ProductCardView::from)
                .collect();
            if featured.is_empty() {
                featured = products.iter().map(ProductCardView::from).collect();
            }
            featured.truncate(FEATURED_COUNT);
            featured
        }
        Err(e) => {
            tracing::warn!("Failed to load featured products: {e}");
            Vec::new()
        }
    };

    HomeTemplate { featured }
}
