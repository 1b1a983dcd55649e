//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use miga_core::{Category, ProductId};

use crate::backend::{BackendError, Product};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Glaze colors offered for personalized cakes.
pub const GLAZE_OPTIONS: &[&str] = &["Chocolate", "Vainilla", "Frambuesa", "Manjar"];

/// Product display data for listing grids.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub category: String,
    pub image: Option<String>,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.get(),
            name: product.name.clone(),
            price: product.price.to_string(),
            category: product.category.clone(),
            image: product.image.clone(),
        }
    }
}

/// Category chip for the catalog filter bar.
#[derive(Clone)]
pub struct CategoryChip {
    pub code: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Size choice display data for the personalization form.
#[derive(Clone)]
pub struct SizeView {
    pub label: String,
    pub price: String,
}

/// Product display data for the detail page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub image: Option<String>,
    pub sizes: Vec<SizeView>,
    pub personalizable: bool,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        let sizes = product
            .sizes
            .iter()
            .map(|size| SizeView {
                price: product.price_for_size(Some(&size.label)).to_string(),
                label: size.label.clone(),
            })
            .collect::<Vec<_>>();

        Self {
            id: product.id.get(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            category: product.category.clone(),
            image: product.image.clone(),
            personalizable: !sizes.is_empty(),
            sizes,
        }
    }
}

/// Catalog filter query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub chips: Vec<CategoryChip>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub glaze_options: &'static [&'static str],
}

/// Not-found state template for missing products.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {}

/// Display the catalog, optionally filtered by category code.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<ProductsIndexTemplate> {
    let products = state.backend().list_products().await?;

    let selected = query.category.as_deref().filter(|c| !c.is_empty());
    let products = products
        .iter()
        .filter(|p| selected.is_none_or(|c| p.category == c))
        .map(ProductCardView::from)
        .collect();

    let chips = Category::ALL
        .into_iter()
        .map(|category| CategoryChip {
            code: category.code(),
            label: category.label(),
            active: selected == Some(category.code()),
        })
        .collect();

    Ok(ProductsIndexTemplate { products, chips })
}

/// Display a product detail page with its personalization form.
///
/// A missing product renders the not-found state rather than an error.
#[instrument(skip(state), fields(id = %id))]
pub async fn show(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    match state.backend().get_product(ProductId::new(id)).await {
        Ok(product) => Ok(ProductShowTemplate {
            product: ProductDetailView::from(&product),
            glaze_options: GLAZE_OPTIONS,
        }
        .into_response()),
        Err(BackendError::NotFound(_)) => {
            Ok((StatusCode::NOT_FOUND, ProductNotFoundTemplate {}).into_response())
        }
        Err(e) => Err(e.into()),
    }
}
