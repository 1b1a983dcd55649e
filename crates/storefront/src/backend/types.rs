//! Wire types for the bakery REST backend.
//!
//! The backend predates this client and speaks Spanish field names; serde
//! renames keep the Rust side idiomatic.

use chrono::NaiveDate;
use miga_core::{
    CartLine, OrderId, OrderStatus, Personalization, PostId, Price, ProductId, ProductSnapshot,
    UserId, UserRole,
};
use serde::{Deserialize, Serialize};

/// Marker used in order payloads for anonymous checkouts.
pub const GUEST_USER: &str = "invitado";

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "precio")]
    pub price: Price,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(rename = "destacado", default)]
    pub featured: bool,
    #[serde(rename = "tamanos", default)]
    pub sizes: Vec<SizeOption>,
}

/// A selectable size with its price factor (100 = base price).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOption {
    #[serde(rename = "etiqueta")]
    pub label: String,
    #[serde(rename = "factor")]
    pub factor: u32,
}

impl Product {
    /// Unit price for a chosen size label.
    ///
    /// Unknown or absent labels fall back to the base price.
    #[must_use]
    pub fn price_for_size(&self, size: Option<&str>) -> Price {
        size.and_then(|label| self.sizes.iter().find(|s| s.label == label))
            .map_or(self.price, |s| self.price.scaled(s.factor))
    }

    /// Capture the fields a cart line keeps, priced for the chosen size.
    #[must_use]
    pub fn snapshot(&self, size: Option<&str>) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id,
            name: self.name.clone(),
            unit_price: self.price_for_size(size),
            image: self.image.clone(),
        }
    }
}

/// A user record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "rol", default)]
    pub role: UserRole,
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Payload for `POST /auth/register`.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    #[serde(rename = "nombre")]
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// One line of an order payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "producto")]
    pub product_id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub unit_price: Price,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "tamano", default)]
    pub size: Option<String>,
    #[serde(rename = "mensaje", default)]
    pub message: Option<String>,
    #[serde(rename = "glaseado", default)]
    pub glaze: Option<String>,
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        let Personalization {
            size,
            message,
            glaze,
        } = line.personalization.clone();
        Self {
            product_id: line.product.id,
            name: line.product.name.clone(),
            unit_price: line.product.unit_price,
            quantity: line.quantity,
            size,
            message,
            glaze,
        }
    }
}

/// Order payload for `POST /pedidos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    /// Account email, or [`GUEST_USER`] for anonymous checkouts.
    #[serde(rename = "usuario")]
    pub user: String,
    #[serde(rename = "nombre")]
    pub customer_name: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "correo")]
    pub contact_email: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "fecha_entrega")]
    pub delivery_date: NaiveDate,
    pub items: Vec<OrderItem>,
    pub total: Price,
}

/// A placed order, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(rename = "usuario")]
    pub user: String,
    #[serde(rename = "nombre")]
    pub customer_name: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "correo", default)]
    pub contact_email: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "fecha_entrega")]
    pub delivery_date: NaiveDate,
    pub items: Vec<OrderItem>,
    pub total: Price,
    #[serde(rename = "estado", default)]
    pub status: OrderStatus,
    #[serde(rename = "creado", default)]
    pub created_at: Option<NaiveDate>,
}

/// A blog post teaser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: PostId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "resumen", default)]
    pub excerpt: String,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(rename = "fecha", default)]
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_spanish_fields() {
        let json = serde_json::json!({
            "id": 1,
            "nombre": "Torta de chocolate",
            "descripcion": "Bizcocho húmedo",
            "precio": 12500,
            "categoria": "TC",
            "imagen": "torta-chocolate.jpg",
            "destacado": true,
            "tamanos": [
                { "etiqueta": "10 personas", "factor": 100 },
                { "etiqueta": "20 personas", "factor": 180 }
            ]
        });

        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.name, "Torta de chocolate");
        assert_eq!(product.price, Price::new(12500));
        assert_eq!(product.sizes.len(), 2);
    }

    #[test]
    fn test_product_optional_fields_default() {
        let json = serde_json::json!({
            "id": 2,
            "nombre": "Marraqueta",
            "precio": 1800,
            "categoria": "PAN"
        });

        let product: Product = serde_json::from_value(json).unwrap();
        assert!(product.description.is_empty());
        assert!(product.image.is_none());
        assert!(!product.featured);
        assert!(product.sizes.is_empty());
    }

    #[test]
    fn test_price_for_size() {
        let product = Product {
            id: ProductId::new(1),
            name: "Torta".into(),
            description: String::new(),
            price: Price::new(10000),
            category: "TC".into(),
            image: None,
            featured: false,
            sizes: vec![SizeOption {
                label: "20 personas".into(),
                factor: 180,
            }],
        };

        assert_eq!(product.price_for_size(None), Price::new(10000));
        assert_eq!(
            product.price_for_size(Some("20 personas")),
            Price::new(18000)
        );
        // Unknown labels fall back to the base price
        assert_eq!(product.price_for_size(Some("99 personas")), Price::new(10000));
    }

    #[test]
    fn test_order_item_from_cart_line() {
        let line = CartLine {
            product: ProductSnapshot {
                id: ProductId::new(3),
                name: "Kuchen de nuez".into(),
                unit_price: Price::new(8000),
                image: None,
            },
            quantity: 2,
            personalization: Personalization {
                size: Some("familiar".into()),
                message: None,
                glaze: None,
            },
        };

        let item = OrderItem::from(&line);
        assert_eq!(item.product_id, ProductId::new(3));
        assert_eq!(item.quantity, 2);
        assert_eq!(item.size.as_deref(), Some("familiar"));
        assert!(item.message.is_none());
    }

    #[test]
    fn test_new_order_serializes_spanish_fields() {
        let order = NewOrder {
            user: GUEST_USER.to_string(),
            customer_name: "Ana Rojas".into(),
            phone: "987654321".into(),
            contact_email: "ana@example.com".into(),
            address: "Av. Siempreviva 742".into(),
            delivery_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            items: Vec::new(),
            total: Price::new(0),
        };

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["usuario"], "invitado");
        assert_eq!(value["nombre"], "Ana Rojas");
        assert_eq!(value["fecha_entrega"], "2025-07-01");
    }
}
