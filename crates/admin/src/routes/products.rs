//! Product management route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use miga_core::{Category, Price, ProductId};

use crate::backend::{Product, ProductPayload};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Product row display data.
#[derive(Clone)]
pub struct ProductRowView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub category: String,
    pub featured: bool,
}

impl From<&Product> for ProductRowView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.get(),
            name: product.name.clone(),
            price: product.price.to_string(),
            category: product.category.clone(),
            featured: product.featured,
        }
    }
}

/// Category option for the product form.
#[derive(Clone)]
pub struct CategoryOption {
    pub code: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn category_options(selected: &str) -> Vec<CategoryOption> {
    Category::ALL
        .into_iter()
        .map(|category| CategoryOption {
            code: category.code(),
            label: category.label(),
            selected: category.code() == selected,
        })
        .collect()
}

/// Product form data.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub featured: bool,
}

impl ProductForm {
    fn into_payload(self) -> Result<ProductPayload> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("name must not be empty".to_string()));
        }
        if self.price <= 0 {
            return Err(AppError::BadRequest("price must be positive".to_string()));
        }

        let image = self.image.trim();
        Ok(ProductPayload {
            name,
            description: self.description.trim().to_string(),
            price: Price::new(self.price),
            category: self.category,
            image: (!image.is_empty()).then(|| image.to_string()),
            featured: self.featured,
        })
    }
}

/// Product list template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsTemplate {
    pub products: Vec<ProductRowView>,
}

/// Product create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub heading: String,
    pub action: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image: String,
    pub featured: bool,
    pub categories: Vec<CategoryOption>,
}

/// Display the product list.
#[instrument(skip(state, _admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> Result<ProductsTemplate> {
    let products = state.backend().list_products().await?;

    Ok(ProductsTemplate {
        products: products.iter().map(ProductRowView::from).collect(),
    })
}

/// Display the create-product form.
#[instrument(skip(_admin))]
pub async fn new(RequireAdminAuth(_admin): RequireAdminAuth) -> ProductFormTemplate {
    ProductFormTemplate {
        heading: "Nuevo producto".to_string(),
        action: "/products".to_string(),
        name: String::new(),
        description: String::new(),
        price: 0,
        image: String::new(),
        featured: false,
        categories: category_options(""),
    }
}

/// Create a product.
#[instrument(skip(state, _admin, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let payload = form.into_payload()?;
    state.backend().create_product(&payload).await?;

    Ok(Redirect::to("/products"))
}

/// Display the edit form for a product.
#[instrument(skip(state, _admin), fields(id = %id))]
pub async fn edit(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<i32>,
) -> Result<ProductFormTemplate> {
    let product = state.backend().get_product(ProductId::new(id)).await?;

    Ok(ProductFormTemplate {
        heading: format!("Editar {}", product.name),
        action: format!("/products/{id}"),
        name: product.name,
        description: product.description,
        price: product.price.as_pesos(),
        image: product.image.unwrap_or_default(),
        featured: product.featured,
        categories: category_options(&product.category),
    })
}

/// Update a product.
#[instrument(skip(state, _admin, form), fields(id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<i32>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let payload = form.into_payload()?;
    state
        .backend()
        .update_product(ProductId::new(id), &payload)
        .await?;

    Ok(Redirect::to("/products"))
}

/// Delete a product.
#[instrument(skip(state, _admin), fields(id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<i32>,
) -> Result<Redirect> {
    state.backend().delete_product(ProductId::new(id)).await?;

    Ok(Redirect::to("/products"))
}
