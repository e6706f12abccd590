//! Cart commands.

use super::{CartError, Product};
use crate::types::ItemId;

/// Every way the cart can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add one unit of a product, creating its line on first add.
    AddItem(Product),
    /// Drop a line entirely. Absent ids are a no-op.
    RemoveItem(ItemId),
    /// Set a line's quantity. Zero or below removes the line; a positive
    /// quantity for an absent line is a no-op.
    SetQuantity {
        /// Target line.
        item_id: ItemId,
        /// Exact new quantity.
        quantity: i64,
    },
    /// Empty the cart.
    Clear,
}

impl Command {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddItem(_) => "add_item",
            Self::RemoveItem(_) => "remove_item",
            Self::SetQuantity { .. } => "set_quantity",
            Self::Clear => "clear",
        }
    }
}

/// Parse a user-typed quantity.
///
/// Accepts any integer, including zero and negatives (which remove the line
/// when applied). Fractions, `NaN` and non-numeric text are rejected.
///
/// # Errors
///
/// Returns [`CartError::InvalidQuantity`] if `input` is not an integer.
///
/// ```
/// use urvann_core::cart::parse_quantity;
///
/// assert_eq!(parse_quantity(" 3 ").unwrap(), 3);
/// assert_eq!(parse_quantity("0").unwrap(), 0);
/// assert!(parse_quantity("2.5").is_err());
/// assert!(parse_quantity("NaN").is_err());
/// ```
pub fn parse_quantity(input: &str) -> Result<i64, CartError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| CartError::invalid_quantity(input))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity_accepts_signed_integers() {
        assert_eq!(parse_quantity("5").unwrap(), 5);
        assert_eq!(parse_quantity("-2").unwrap(), -2);
    }

    #[test]
    fn test_parse_quantity_rejects_non_integers() {
        for input in ["", "abc", "1.5", "NaN", "inf", "1e3"] {
            assert!(
                matches!(parse_quantity(input), Err(CartError::InvalidQuantity { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_command_names() {
        assert_eq!(Command::Clear.name(), "clear");
        let remove = Command::RemoveItem(ItemId::parse("p1").unwrap());
        assert_eq!(remove.name(), "remove_item");
    }
}
