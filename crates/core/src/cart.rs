//! Shopping cart state container.
//!
//! The cart is an ordered collection of lines keyed by base product plus
//! personalization signature. Adding an item whose key already exists
//! increments the existing line instead of appending a duplicate. All
//! derived values (subtotal, item count) are recomputed on read.
//!
//! The cart itself is pure state; callers own persistence (the storefront
//! keeps it in the session) and user-facing notifications.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Product fields captured into a cart line at add time.
///
/// A snapshot keeps the cart stable if the catalog changes while the
/// customer is still shopping. `unit_price` already includes any size
/// factor chosen on the product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub image: Option<String>,
}

/// Optional customization fields that distinguish otherwise-identical
/// product entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Personalization {
    /// Size label, e.g. "15 personas".
    pub size: Option<String>,
    /// Message written on the product.
    pub message: Option<String>,
    /// Glaze color.
    pub glaze: Option<String>,
}

impl Personalization {
    /// Whether no customization was chosen.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size.is_none() && self.message.is_none() && self.glaze.is_none()
    }

    /// Deterministic signature of the chosen fields.
    ///
    /// Two personalizations with the same field values produce the same
    /// signature; an empty personalization produces the empty string.
    #[must_use]
    pub fn signature(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!(
            "s={}|m={}|g={}",
            self.size.as_deref().unwrap_or(""),
            self.message.as_deref().unwrap_or(""),
            self.glaze.as_deref().unwrap_or("")
        )
    }
}

/// Identity of a cart line: base product plus personalization signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product: ProductId,
    pub signature: String,
}

impl LineKey {
    /// Build a key from a product id and its personalization.
    #[must_use]
    pub fn new(product: ProductId, personalization: &Personalization) -> Self {
        Self {
            product,
            signature: personalization.signature(),
        }
    }
}

/// One aggregated entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: ProductSnapshot,
    pub quantity: u32,
    pub personalization: Personalization,
}

impl CartLine {
    /// The identity of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product.id, &self.personalization)
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.unit_price * self.quantity
    }
}

/// The shopping cart: an ordered collection of [`CartLine`]s with at most
/// one line per [`LineKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find a line by its key.
    #[must_use]
    pub fn find(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.key() == *key)
    }

    /// Add `quantity` of a product with the given personalization.
    ///
    /// If a line with the same key already exists its quantity is
    /// incremented; otherwise a new line is appended. Quantity is assumed
    /// positive; callers validate it before calling.
    pub fn add(
        &mut self,
        snapshot: ProductSnapshot,
        quantity: u32,
        personalization: Personalization,
    ) {
        let key = LineKey::new(snapshot.id, &personalization);
        if let Some(line) = self.lines.iter_mut().find(|line| line.key() == key) {
            line.quantity += quantity;
        } else {
            self.lines.push(CartLine {
                product: snapshot,
                quantity,
                personalization,
            });
        }
    }

    /// Remove all lines whose base product matches `product`.
    ///
    /// Removing an id with no matching lines is a no-op. Returns whether
    /// any line was removed.
    pub fn remove_product(&mut self, product: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != product);
        self.lines.len() != before
    }

    /// Set the quantity of the line with the given key.
    ///
    /// A quantity of zero removes the line, matching explicit removal.
    /// Returns whether a matching line existed.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) -> bool {
        if quantity == 0 {
            let before = self.lines.len();
            self.lines.retain(|line| line.key() != *key);
            return self.lines.len() != before;
        }

        match self.lines.iter_mut().find(|line| line.key() == *key) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of items across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn snapshot(id: i32, pesos: i64) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(id),
            name: format!("Producto {id}"),
            unit_price: Price::new(pesos),
            image: None,
        }
    }

    fn sized(label: &str) -> Personalization {
        Personalization {
            size: Some(label.to_owned()),
            ..Personalization::default()
        }
    }

    #[test]
    fn test_add_merges_identical_signatures() {
        let mut cart = Cart::new();
        cart.add(snapshot(1, 1000), 2, Personalization::default());
        cart.add(snapshot(1, 1000), 3, Personalization::default());

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.subtotal(), Price::new(5000));
        assert_eq!(cart.subtotal().to_string(), "$5.000");
    }

    #[test]
    fn test_add_splits_distinct_signatures() {
        let mut cart = Cart::new();
        cart.add(snapshot(1, 1000), 1, Personalization::default());
        cart.add(snapshot(1, 1500), 1, sized("15 personas"));
        cart.add(snapshot(1, 2000), 1, sized("20 personas"));

        assert_eq!(cart.lines().len(), 3);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_remove_product_drops_all_variants() {
        let mut cart = Cart::new();
        cart.add(snapshot(1, 1000), 1, Personalization::default());
        cart.add(snapshot(1, 1500), 1, sized("15 personas"));
        cart.add(snapshot(2, 800), 1, Personalization::default());

        assert!(cart.remove_product(ProductId::new(1)));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].product.id, ProductId::new(2));
    }

    #[test]
    fn test_remove_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.add(snapshot(1, 1000), 1, Personalization::default());

        assert!(!cart.remove_product(ProductId::new(99)));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_set_quantity_zero_equals_removal() {
        let key = LineKey::new(ProductId::new(1), &Personalization::default());

        let mut via_zero = Cart::new();
        via_zero.add(snapshot(1, 1000), 3, Personalization::default());
        via_zero.set_quantity(&key, 0);

        let mut via_remove = Cart::new();
        via_remove.add(snapshot(1, 1000), 3, Personalization::default());
        via_remove.remove_product(ProductId::new(1));

        assert_eq!(via_zero, via_remove);
        assert!(via_zero.is_empty());
    }

    #[test]
    fn test_set_quantity_targets_one_variant() {
        let mut cart = Cart::new();
        cart.add(snapshot(1, 1000), 1, Personalization::default());
        cart.add(snapshot(1, 1500), 1, sized("15 personas"));

        let key = LineKey::new(ProductId::new(1), &sized("15 personas"));
        assert!(cart.set_quantity(&key, 4));

        // The plain line is untouched; only the sized variant changed.
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.lines()[1].quantity, 4);
    }

    #[test]
    fn test_set_quantity_unknown_key() {
        let mut cart = Cart::new();
        let key = LineKey::new(ProductId::new(9), &Personalization::default());
        assert!(!cart.set_quantity(&key, 2));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(snapshot(1, 1000), 2, Personalization::default());
        cart.add(snapshot(2, 500), 1, Personalization::default());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Price::ZERO);
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_signature_ignores_field_order_of_construction() {
        let a = Personalization {
            size: Some("15 personas".into()),
            message: Some("Feliz cumpleaños".into()),
            glaze: None,
        };
        let b = Personalization {
            glaze: None,
            message: Some("Feliz cumpleaños".into()),
            size: Some("15 personas".into()),
        };
        assert_eq!(a.signature(), b.signature());
        assert_eq!(Personalization::default().signature(), "");
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut cart = Cart::new();
        cart.add(snapshot(1, 1000), 2, sized("15 personas"));

        let json = serde_json::to_string(&cart).unwrap();
        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }
}
