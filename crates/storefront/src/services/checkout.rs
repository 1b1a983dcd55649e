//! Checkout form validation and order assembly.
//!
//! Validation runs entirely locally: a form that fails any field check is
//! bounced back with per-field messages and no request is made to the
//! backend. Only a fully valid form is assembled into an order payload.

use chrono::{Months, NaiveDate};
use serde::Deserialize;

use miga_core::{Cart, Email};

use crate::backend::{GUEST_USER, NewOrder, OrderItem};

/// Minimum number of digits a contact phone must contain.
pub const MIN_PHONE_DIGITS: usize = 8;

/// How far ahead a delivery may be scheduled.
const MAX_DELIVERY_MONTHS: u32 = 1;

/// Checkout form fields as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub delivery_date: String,
}

/// Per-field validation errors with user-facing messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub phone: Option<&'static str>,
    pub email: Option<&'static str>,
    pub address: Option<&'static str>,
    pub delivery_date: Option<&'static str>,
}

impl FieldErrors {
    /// Whether every field passed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.delivery_date.is_none()
    }
}

/// A checkout form that passed validation.
#[derive(Debug, Clone)]
pub struct ValidCheckout {
    pub name: String,
    pub phone: String,
    pub email: Email,
    pub address: String,
    pub delivery_date: NaiveDate,
}

/// Validate a checkout form against `today`.
///
/// # Errors
///
/// Returns the per-field messages when any check fails. Callers must not
/// issue a backend request in that case.
pub fn validate(form: &CheckoutForm, today: NaiveDate) -> Result<ValidCheckout, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = form.name.trim();
    if name.is_empty() {
        errors.name = Some("Ingresa tu nombre");
    } else if !name.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
        errors.name = Some("El nombre solo puede contener letras");
    }

    let digits = form.phone.chars().filter(char::is_ascii_digit).count();
    if digits < MIN_PHONE_DIGITS {
        errors.phone = Some("El teléfono debe tener al menos 8 dígitos");
    }

    let email = match Email::parse(form.email.trim()) {
        Ok(email) => Some(email),
        Err(_) => {
            errors.email = Some("Ingresa un correo válido");
            None
        }
    };

    let address = form.address.trim();
    if address.is_empty() {
        errors.address = Some("Ingresa la dirección de entrega");
    }

    let delivery_date = match form.delivery_date.parse::<NaiveDate>() {
        Ok(date) if date < today => {
            errors.delivery_date = Some("La fecha de entrega no puede estar en el pasado");
            None
        }
        Ok(date) if date > today + Months::new(MAX_DELIVERY_MONTHS) => {
            errors.delivery_date = Some("La fecha de entrega no puede superar un mes");
            None
        }
        Ok(date) => Some(date),
        Err(_) => {
            errors.delivery_date = Some("Ingresa una fecha de entrega válida");
            None
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // All fields checked above; the options are only None when an error was
    // recorded, and we just returned in that case.
    match (email, delivery_date) {
        (Some(email), Some(delivery_date)) => Ok(ValidCheckout {
            name: name.to_string(),
            phone: form.phone.trim().to_string(),
            email,
            address: address.to_string(),
            delivery_date,
        }),
        _ => Err(errors),
    }
}

/// Assemble the order payload from the cart and a validated form.
///
/// `account_email` is the logged-in user's email; anonymous checkouts are
/// tagged with the guest marker.
#[must_use]
pub fn build_order(cart: &Cart, checkout: &ValidCheckout, account_email: Option<&str>) -> NewOrder {
    NewOrder {
        user: account_email.map_or_else(|| GUEST_USER.to_string(), ToString::to_string),
        customer_name: checkout.name.clone(),
        phone: checkout.phone.clone(),
        contact_email: checkout.email.to_string(),
        address: checkout.address.clone(),
        delivery_date: checkout.delivery_date,
        items: cart.lines().iter().map(OrderItem::from).collect(),
        total: cart.subtotal(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use miga_core::{Personalization, Price, ProductId, ProductSnapshot};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            name: "Ana María Rojas".into(),
            phone: "+56 9 8765 4321".into(),
            email: "ana@example.com".into(),
            address: "Av. Siempreviva 742, Valdivia".into(),
            delivery_date: "2025-06-20".into(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let checkout = validate(&valid_form(), today()).unwrap();
        assert_eq!(checkout.name, "Ana María Rojas");
        assert_eq!(
            checkout.delivery_date,
            NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()
        );
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut form = valid_form();
        form.name = "   ".into();
        let errors = validate(&form, today()).unwrap_err();
        assert!(errors.name.is_some());
    }

    #[test]
    fn test_name_with_digits_rejected() {
        let mut form = valid_form();
        form.name = "Ana123".into();
        let errors = validate(&form, today()).unwrap_err();
        assert!(errors.name.is_some());
    }

    #[test]
    fn test_accented_name_accepted() {
        let mut form = valid_form();
        form.name = "José Ñuñez".into();
        assert!(validate(&form, today()).is_ok());
    }

    #[test]
    fn test_short_phone_rejected() {
        let mut form = valid_form();
        form.phone = "123-45".into();
        let errors = validate(&form, today()).unwrap_err();
        assert!(errors.phone.is_some());
    }

    #[test]
    fn test_phone_counts_digits_only() {
        let mut form = valid_form();
        // 8 digits spread across separators
        form.phone = "(12) 34-56.78".into();
        assert!(validate(&form, today()).is_ok());
    }

    #[test]
    fn test_malformed_email_rejected() {
        let mut form = valid_form();
        form.email = "not-an-email".into();
        let errors = validate(&form, today()).unwrap_err();
        assert!(errors.email.is_some());
    }

    #[test]
    fn test_empty_address_rejected() {
        let mut form = valid_form();
        form.address = String::new();
        let errors = validate(&form, today()).unwrap_err();
        assert!(errors.address.is_some());
    }

    #[test]
    fn test_past_delivery_date_rejected() {
        let mut form = valid_form();
        form.delivery_date = "2025-06-14".into();
        let errors = validate(&form, today()).unwrap_err();
        assert!(errors.delivery_date.is_some());
    }

    #[test]
    fn test_delivery_today_accepted() {
        let mut form = valid_form();
        form.delivery_date = "2025-06-15".into();
        assert!(validate(&form, today()).is_ok());
    }

    #[test]
    fn test_delivery_at_one_month_boundary_accepted() {
        let mut form = valid_form();
        form.delivery_date = "2025-07-15".into();
        assert!(validate(&form, today()).is_ok());
    }

    #[test]
    fn test_delivery_beyond_one_month_rejected() {
        let mut form = valid_form();
        form.delivery_date = "2025-07-16".into();
        let errors = validate(&form, today()).unwrap_err();
        assert!(errors.delivery_date.is_some());
    }

    #[test]
    fn test_unparseable_date_rejected() {
        let mut form = valid_form();
        form.delivery_date = "mañana".into();
        let errors = validate(&form, today()).unwrap_err();
        assert!(errors.delivery_date.is_some());
    }

    #[test]
    fn test_multiple_errors_reported_together() {
        let form = CheckoutForm {
            name: "Ana2".into(),
            phone: "12".into(),
            email: "x".into(),
            address: String::new(),
            delivery_date: "2020-01-01".into(),
        };
        let errors = validate(&form, today()).unwrap_err();
        assert!(errors.name.is_some());
        assert!(errors.phone.is_some());
        assert!(errors.email.is_some());
        assert!(errors.address.is_some());
        assert!(errors.delivery_date.is_some());
    }

    fn cart_with_line() -> Cart {
        let mut cart = Cart::new();
        cart.add(
            ProductSnapshot {
                id: ProductId::new(1),
                name: "Torta de chocolate".into(),
                unit_price: Price::new(1000),
                image: None,
            },
            5,
            Personalization::default(),
        );
        cart
    }

    #[test]
    fn test_build_order_for_account() {
        let checkout = validate(&valid_form(), today()).unwrap();
        let order = build_order(&cart_with_line(), &checkout, Some("ana@example.com"));

        assert_eq!(order.user, "ana@example.com");
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total, Price::new(5000));
    }

    #[test]
    fn test_build_order_for_guest() {
        let checkout = validate(&valid_form(), today()).unwrap();
        let order = build_order(&cart_with_line(), &checkout, None);

        assert_eq!(order.user, GUEST_USER);
    }
}
