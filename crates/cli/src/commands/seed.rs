//! Catalog seeding command.
//!
//! Pushes a small starter catalog through the backend's management
//! endpoints. Intended for fresh environments; running it twice creates
//! duplicates, the backend does not dedupe by name.

use miga_admin::backend::{AdminClient, ProductPayload};
use miga_admin::config::BackendConfig;
use miga_core::Price;

fn starter_catalog() -> Vec<ProductPayload> {
    vec![
        ProductPayload {
            name: "Torta de chocolate".into(),
            description: "Bizcocho húmedo con mousse de chocolate amargo.".into(),
            price: Price::new(14500),
            category: "TC".into(),
            image: Some("torta-chocolate.jpg".into()),
            featured: true,
        },
        ProductPayload {
            name: "Torta tres leches".into(),
            description: "Clásica, con merengue italiano.".into(),
            price: Price::new(13000),
            category: "TC".into(),
            image: Some("torta-tres-leches.jpg".into()),
            featured: true,
        },
        ProductPayload {
            name: "Kuchen de nuez".into(),
            description: "Receta valdiviana con nueces del sur.".into(),
            price: Price::new(8500),
            category: "TK".into(),
            image: Some("kuchen-nuez.jpg".into()),
            featured: false,
        },
        ProductPayload {
            name: "Kuchen de murta".into(),
            description: "Con murta fresca de temporada.".into(),
            price: Price::new(9000),
            category: "TK".into(),
            image: None,
            featured: false,
        },
        ProductPayload {
            name: "Alfajores de manjar".into(),
            description: "Caja de seis unidades.".into(),
            price: Price::new(4500),
            category: "GL".into(),
            image: Some("alfajores.jpg".into()),
            featured: true,
        },
        ProductPayload {
            name: "Pan amasado".into(),
            description: "Bolsa de cuatro unidades, horneado del día.".into(),
            price: Price::new(1800),
            category: "PAN".into(),
            image: None,
            featured: false,
        },
        ProductPayload {
            name: "Marraqueta".into(),
            description: "El clásico, crujiente por fuera.".into(),
            price: Price::new(1500),
            category: "PAN".into(),
            image: None,
            featured: false,
        },
        ProductPayload {
            name: "Mil hojas individual".into(),
            description: "Con manjar y crema pastelera.".into(),
            price: Price::new(3200),
            category: "PF".into(),
            image: Some("mil-hojas.jpg".into()),
            featured: false,
        },
    ]
}

/// Push the starter catalog to the backend.
///
/// # Errors
///
/// Returns an error if the backend configuration is invalid or any create
/// call fails; products created before the failure are left in place.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let config = BackendConfig::from_env()?;
    let client = AdminClient::new(&config);

    let catalog = starter_catalog();
    tracing::info!("Seeding {} products", catalog.len());

    for payload in &catalog {
        let product = client.create_product(payload).await?;
        tracing::info!(id = %product.id, name = %product.name, "Created product");
    }

    tracing::info!("Seed complete");
    Ok(())
}
