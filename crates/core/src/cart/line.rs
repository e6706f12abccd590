//! Cart lines and the catalog product shape they are snapshotted from.

use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CartError;
use crate::types::{ItemId, Price};

/// A catalog product as handed to [`Command::AddItem`](super::Command::AddItem).
///
/// Fields are loose on purpose: this is whatever the catalog service or the
/// presentation layer supplied, and `add_item` is where it gets validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier. Must be non-empty.
    pub item_id: String,
    /// Display name.
    pub name: String,
    /// Current catalog price. Must be non-negative.
    pub price: Decimal,
    /// Image URL or path.
    #[serde(default)]
    pub image_ref: Option<String>,
    /// Category labels, in catalog order.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Whether the product was in stock when it was fetched.
    #[serde(default)]
    pub availability: Option<bool>,
}

impl Product {
    /// Create a product with only the required fields set.
    #[must_use]
    pub fn new(item_id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            item_id: item_id.into(),
            name: name.into(),
            price,
            image_ref: None,
            categories: Vec::new(),
            availability: None,
        }
    }
}

/// One row of the cart.
///
/// Name, price, image, categories and availability are frozen at the moment
/// the line is created; later catalog changes never reach an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    item_id: ItemId,
    name: String,
    unit_price: Price,
    image_ref: Option<String>,
    categories: Vec<String>,
    availability_at_add_time: bool,
    quantity: NonZeroU32,
}

impl CartLine {
    /// Snapshot a product into a fresh line with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidProduct`] if the product has no identifier,
    /// a negative price, or a price with more digits than the persisted
    /// record can carry.
    pub fn snapshot(product: &Product) -> Result<Self, CartError> {
        let item_id = ItemId::parse(&product.item_id)
            .map_err(|_| CartError::invalid_product("missing item id"))?;
        let unit_price =
            Price::new(product.price).map_err(|e| CartError::invalid_product(e.to_string()))?;
        if !unit_price.survives_json_number() {
            return Err(CartError::invalid_product(format!(
                "price {} has more precision than the cart can store",
                product.price
            )));
        }

        Ok(Self {
            item_id,
            name: product.name.clone(),
            unit_price,
            image_ref: product.image_ref.clone(),
            categories: product.categories.clone(),
            availability_at_add_time: product.availability.unwrap_or(false),
            quantity: NonZeroU32::MIN,
        })
    }

    pub(crate) const fn from_parts(
        item_id: ItemId,
        name: String,
        unit_price: Price,
        image_ref: Option<String>,
        categories: Vec<String>,
        availability_at_add_time: bool,
        quantity: NonZeroU32,
    ) -> Self {
        Self {
            item_id,
            name,
            unit_price,
            image_ref,
            categories,
            availability_at_add_time,
            quantity,
        }
    }

    #[must_use]
    pub const fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price captured when the line was created.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    #[must_use]
    pub fn image_ref(&self) -> Option<&str> {
        self.image_ref.as_deref()
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub const fn availability_at_add_time(&self) -> bool {
        self.availability_at_add_time
    }

    /// Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// `unit_price * quantity`.
    ///
    /// A [`CartState`](super::CartState) never holds a line whose total
    /// overflows; outside one this saturates at [`Price::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.checked_line_total().unwrap_or(Price::MAX)
    }

    pub(crate) fn checked_line_total(&self) -> Option<Price> {
        self.unit_price.checked_mul(self.quantity.get())
    }

    pub(crate) fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fern() -> Product {
        Product {
            image_ref: Some("https://cdn.example.com/fern.jpg".to_owned()),
            categories: vec!["Indoor".to_owned(), "Low Maintenance".to_owned()],
            availability: Some(true),
            ..Product::new("p1", "Fern", Decimal::from(199))
        }
    }

    #[test]
    fn test_snapshot_copies_product_fields() {
        let line = CartLine::snapshot(&fern()).unwrap();
        assert_eq!(line.item_id().as_str(), "p1");
        assert_eq!(line.name(), "Fern");
        assert_eq!(line.unit_price(), Price::from_major(199));
        assert_eq!(line.image_ref(), Some("https://cdn.example.com/fern.jpg"));
        assert_eq!(line.categories(), ["Indoor", "Low Maintenance"]);
        assert!(line.availability_at_add_time());
        assert_eq!(line.quantity(), 1);
    }

    #[test]
    fn test_snapshot_rejects_missing_id() {
        let product = Product::new("  ", "Fern", Decimal::from(199));
        assert!(matches!(
            CartLine::snapshot(&product),
            Err(CartError::InvalidProduct { .. })
        ));
    }

    #[test]
    fn test_snapshot_rejects_negative_price() {
        let product = Product::new("p1", "Fern", Decimal::from(-1));
        assert!(matches!(
            CartLine::snapshot(&product),
            Err(CartError::InvalidProduct { .. })
        ));
    }

    #[test]
    fn test_snapshot_defaults_availability_to_false() {
        let line = CartLine::snapshot(&Product::new("p1", "Fern", Decimal::ONE)).unwrap();
        assert!(!line.availability_at_add_time());
    }

    #[test]
    fn test_snapshot_rejects_price_too_precise_to_store() {
        let price: Decimal = "1234567890123456.78".parse().unwrap();
        let product = Product::new("p1", "Fern", price);
        let err = CartLine::snapshot(&product).unwrap_err();
        assert!(matches!(err, CartError::InvalidProduct { .. }));
        assert!(err.to_string().contains("precision"));
    }

    #[test]
    fn test_snapshot_accepts_ordinary_prices() {
        for price in ["19.99", "0.1", "349.95", "1999.99", "0"] {
            let product = Product::new("p1", "Fern", price.parse().unwrap());
            assert!(CartLine::snapshot(&product).is_ok(), "{price}");
        }
    }

    #[test]
    fn test_product_deserializes_camel_case() {
        let value = serde_json::json!({
            "itemId": "p1",
            "name": "Fern",
            "price": 199,
            "imageRef": "fern.jpg",
            "availability": true
        });
        let product: Product = serde_json::from_value(value).unwrap();
        assert_eq!(product.item_id, "p1");
        assert_eq!(product.price, Decimal::from(199));
        assert_eq!(product.image_ref.as_deref(), Some("fern.jpg"));
        assert!(product.categories.is_empty());
    }

    #[test]
    fn test_line_total() {
        let mut line = CartLine::snapshot(&fern()).unwrap();
        line.increment();
        line.increment();
        assert_eq!(line.line_total(), Price::from_major(597));
    }

    #[test]
    fn test_line_total_saturates_outside_a_cart() {
        let huge: Decimal = "50000000000000000000000000000".parse().unwrap();
        let mut line = CartLine::snapshot(&Product::new("p1", "Fern", huge)).unwrap();
        line.increment();
        assert_eq!(line.checked_line_total(), None);
        assert_eq!(line.line_total(), Price::MAX);
    }
}
