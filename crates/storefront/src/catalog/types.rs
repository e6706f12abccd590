//! Domain types for the catalog API.
//!
//! The API is loosely typed (prices arrive as numbers or strings, ids may be
//! missing), so plants are decoded from raw JSON and sanitized field by field
//! instead of through a strict derive.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use urvann_core::cart::Product;
use urvann_core::{ItemId, Price};

/// Pseudo-category meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All Categories";

/// Categories shown when the API has none to offer.
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Indoor",
    "Outdoor",
    "Succulent",
    "Air Purifying",
    "Home Decor",
    "Low Maintenance",
    "Flowering",
    "Medicinal",
];

// =============================================================================
// Response Envelope
// =============================================================================

/// The `{ success, data, error }` wrapper every endpoint responds with.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================================
// Plant Types
// =============================================================================

/// A catalog plant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    pub description: String,
    pub categories: Vec<String>,
    pub availability: bool,
    pub stock_count: u32,
    pub image: Option<String>,
    /// Review score, when the backend provides one.
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plant {
    /// Sanitize one raw plant record.
    ///
    /// Missing or malformed fields get the same fallbacks the storefront has
    /// always shown: a temporary id, "Unknown Plant", a zero price, no
    /// categories, and "now" for timestamps.
    #[must_use]
    pub fn from_raw(raw: &Value) -> Self {
        let now = Utc::now();

        let id = raw
            .get("_id")
            .and_then(value_as_text)
            .and_then(|id| ItemId::parse(&id).ok())
            .unwrap_or_else(temporary_id);

        let name = raw
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Unknown Plant")
            .to_string();

        let price = raw
            .get("price")
            .and_then(value_as_decimal)
            .and_then(|amount| Price::new(amount).ok())
            .unwrap_or(Price::ZERO);

        let categories = raw
            .get("categories")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let stock_count = raw
            .get("stockCount")
            .and_then(value_as_decimal)
            .and_then(|n| n.trunc().to_u32())
            .unwrap_or(0);

        Self {
            id,
            name,
            price,
            description: raw
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            categories,
            availability: raw.get("availability").is_some_and(is_truthy),
            stock_count,
            image: raw
                .get("image")
                .and_then(Value::as_str)
                .filter(|image| !image.is_empty())
                .map(str::to_string),
            rating: raw.get("rating").and_then(Value::as_f64),
            created_at: raw.get("createdAt").and_then(parse_timestamp).unwrap_or(now),
            updated_at: raw.get("updatedAt").and_then(parse_timestamp).unwrap_or(now),
        }
    }
}

impl From<&Plant> for Product {
    fn from(plant: &Plant) -> Self {
        Self {
            item_id: plant.id.to_string(),
            name: plant.name.clone(),
            price: plant.price.amount(),
            image_ref: plant.image.clone(),
            categories: plant.categories.clone(),
            availability: Some(plant.availability),
        }
    }
}

/// A plant to be created through `POST /plants`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlant {
    pub name: String,
    pub price: Price,
    pub description: String,
    pub stock_count: u32,
    pub availability: bool,
    pub categories: Vec<String>,
    /// Local image file to upload alongside the record.
    pub image: Option<std::path::PathBuf>,
}

// =============================================================================
// Helpers
// =============================================================================

fn temporary_id() -> ItemId {
    ItemId::with_prefix("temp", uuid::Uuid::new_v4())
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Loose truthiness, as a JS-backed API means it.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_raw_full_record() {
        let plant = Plant::from_raw(&json!({
            "_id": "64f1c0ab",
            "name": "Money Plant",
            "price": 249,
            "description": "Trailing vine",
            "categories": ["Indoor", "Air Purifying"],
            "availability": true,
            "stockCount": 12,
            "image": "https://cdn.example.com/money.jpg",
            "rating": 4.5,
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-02T10:00:00.000Z",
            "__v": 0
        }));
        assert_eq!(plant.id.as_str(), "64f1c0ab");
        assert_eq!(plant.name, "Money Plant");
        assert_eq!(plant.price, Price::from_major(249));
        assert_eq!(plant.categories, ["Indoor", "Air Purifying"]);
        assert!(plant.availability);
        assert_eq!(plant.stock_count, 12);
        assert_eq!(plant.rating, Some(4.5));
        assert_eq!(plant.created_at.to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }

    #[test]
    fn test_from_raw_fallbacks() {
        let plant = Plant::from_raw(&json!({
            "name": "",
            "price": "not a price",
            "categories": "Indoor",
            "availability": 0,
            "stockCount": -4,
            "image": ""
        }));
        assert!(plant.id.as_str().starts_with("temp-"));
        assert_eq!(plant.name, "Unknown Plant");
        assert_eq!(plant.price, Price::ZERO);
        assert!(plant.categories.is_empty());
        assert!(!plant.availability);
        assert_eq!(plant.stock_count, 0);
        assert!(plant.image.is_none());
        assert!(plant.rating.is_none());
    }

    #[test]
    fn test_from_raw_coerces_strings() {
        let plant = Plant::from_raw(&json!({
            "_id": 17,
            "name": "Jade",
            "price": "149.50",
            "availability": "yes",
            "stockCount": "3"
        }));
        assert_eq!(plant.id.as_str(), "17");
        assert_eq!(plant.price.to_string(), "₹149.50");
        assert!(plant.availability);
        assert_eq!(plant.stock_count, 3);
    }

    #[test]
    fn test_negative_price_falls_back_to_zero() {
        let plant = Plant::from_raw(&json!({ "_id": "p", "price": -10 }));
        assert!(plant.price.is_zero());
    }

    #[test]
    fn test_plant_to_product() {
        let plant = Plant::from_raw(&json!({
            "_id": "p1", "name": "Fern", "price": 199,
            "categories": ["Indoor"], "availability": true
        }));
        let product = Product::from(&plant);
        assert_eq!(product.item_id, "p1");
        assert_eq!(product.price, Decimal::from(199));
        assert_eq!(product.availability, Some(true));
        assert_eq!(product.categories, ["Indoor"]);
    }
}
