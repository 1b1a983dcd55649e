//! Wire types for the bakery backend's management surface.
//!
//! The backend speaks Spanish field names; serde renames keep the Rust
//! side idiomatic.

use chrono::NaiveDate;
use miga_core::{OrderId, OrderStatus, Price, ProductId, UserId, UserRole};
use serde::{Deserialize, Serialize};

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
}

/// Product fields for create (`POST`) and update (`PATCH`) calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPayload {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "precio")]
    pub price: Price,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "imagen", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "destacado")]
    pub featured: bool,
}

/// One line of an order.
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

/// A placed order.
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

/// Status patch for `PATCH /pedidos/{id}`.
#[derive(Debug, Serialize)]
pub struct StatusPatch {
    #[serde(rename = "estado")]
    pub status: OrderStatus,
}

/// A user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "rol", default)]
    pub role: UserRole,
}

/// Role patch for `PATCH /usuarios/{id}`.
#[derive(Debug, Serialize)]
pub struct RolePatch {
    #[serde(rename = "rol")]
    pub role: UserRole,
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Payload for `POST /auth/register` (used by the CLI bootstrap).
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    #[serde(rename = "nombre")]
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_payload_skips_absent_image() {
        let payload = ProductPayload {
            name: "Pan amasado".into(),
            description: String::new(),
            price: Price::new(1500),
            category: "PAN".into(),
            image: None,
            featured: false,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("imagen").is_none());
        assert_eq!(value["nombre"], "Pan amasado");
    }

    #[test]
    fn test_status_patch_wire_value() {
        let patch = StatusPatch {
            status: OrderStatus::Preparing,
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value["estado"], "preparando");
    }

    #[test]
    fn test_role_patch_wire_value() {
        let patch = RolePatch {
            role: UserRole::Admin,
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value["rol"], "admin");
    }
}
