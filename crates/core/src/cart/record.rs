//! The persisted cart record.
//!
//! ```json
//! { "lines": [ { "itemId": "p1", "name": "Fern", "unitPrice": 199.0,
//!                "imageRef": null, "categories": ["Indoor"],
//!                "availabilityAtAddTime": true, "quantity": 2 } ] }
//! ```
//!
//! Records written by the earlier browser UI (`{ "items": [ { "id", "price",
//! "image", "availability", ... } ] }`) are accepted on read.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::{CartLine, CartState};
use crate::types::{ItemId, Price};

/// Storage key the cart lives under.
pub const CART_STORAGE_KEY: &str = "urvann-cart";

#[derive(Serialize)]
struct RecordRef<'a> {
    lines: &'a [CartLine],
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(default, alias = "items")]
    lines: Option<Vec<serde_json::Value>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLine {
    #[serde(alias = "id")]
    item_id: ItemId,
    #[serde(default)]
    name: Option<String>,
    #[serde(alias = "price")]
    unit_price: Price,
    #[serde(default, alias = "image")]
    image_ref: Option<String>,
    #[serde(default)]
    categories: Option<Vec<String>>,
    #[serde(default, alias = "availability")]
    availability_at_add_time: Option<bool>,
    quantity: NonZeroU32,
}

impl From<StoredLine> for CartLine {
    fn from(stored: StoredLine) -> Self {
        Self::from_parts(
            stored.item_id,
            stored.name.unwrap_or_default(),
            stored.unit_price,
            stored.image_ref.filter(|image| !image.is_empty()),
            stored.categories.unwrap_or_default(),
            stored.availability_at_add_time.unwrap_or(false),
            stored.quantity,
        )
    }
}

/// Result of decoding a persisted record.
#[derive(Debug)]
pub struct Hydrated {
    /// The recovered cart.
    pub state: CartState,
    /// Lines discarded because they were malformed, duplicated, or out of
    /// range.
    pub dropped: usize,
}

/// Serialize the cart's lines into the persisted record format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(state: &CartState) -> Result<String, serde_json::Error> {
    serde_json::to_string(&RecordRef {
        lines: state.lines(),
    })
}

/// Decode a persisted record.
///
/// Individual lines that fail validation (no id, negative or non-numeric
/// price, quantity that is not a positive integer, a total too large to
/// represent) are dropped; the rest of the record survives.
///
/// # Errors
///
/// Returns an error only if `raw` is not a JSON object with an optional
/// `lines` (or legacy `items`) array.
pub fn decode(raw: &str) -> Result<Hydrated, serde_json::Error> {
    let record: RawRecord = serde_json::from_str(raw)?;
    let values = record.lines.unwrap_or_default();
    let total = values.len();

    let valid = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<StoredLine>(value) {
            Ok(line) => Some(CartLine::from(line)),
            Err(e) => {
                tracing::debug!(error = %e, "Dropping malformed cart line");
                None
            }
        })
        .collect::<Vec<_>>();
    let malformed = total - valid.len();

    let (state, rejected) = CartState::from_lines(valid);
    Ok(Hydrated {
        state,
        dropped: malformed + rejected,
    })
}
