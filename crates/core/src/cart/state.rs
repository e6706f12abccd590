//! Pure cart state and its transition function.

use std::num::NonZeroU32;

use super::{CartError, CartLine, Command};
use crate::types::{ItemId, Price};

/// The cart aggregate.
///
/// Lines are kept in insertion order and are never re-sorted. Every line has
/// a quantity of at least 1, no two lines share an item id, and the cart
/// total fits in a [`Price`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a state from already-validated lines, keeping the first line for
    /// each item id and skipping any line that would push the total past
    /// [`Price::MAX`].
    ///
    /// Returns the state and the number of lines discarded.
    pub(crate) fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> (Self, usize) {
        let mut state = Self::new();
        let mut total = Price::ZERO;
        let mut dropped = 0;
        for line in lines {
            if state.contains(line.item_id()) {
                dropped += 1;
                continue;
            }
            match line
                .checked_line_total()
                .and_then(|line_total| total.checked_add(line_total))
            {
                Some(next_total) => {
                    total = next_total;
                    state.lines.push(line);
                }
                None => {
                    tracing::debug!(
                        item_id = %line.item_id(),
                        "Dropping cart line with total out of range"
                    );
                    dropped += 1;
                }
            }
        }
        (state, dropped)
    }

    /// Apply a command, producing the next state.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidProduct`] for a malformed `AddItem` and
    /// [`CartError::InvalidQuantity`] for a `SetQuantity` that does not fit a
    /// line quantity. Either command is also rejected when it would push the
    /// cart total past [`Price::MAX`]. `self` is untouched either way.
    pub fn apply(&self, command: &Command) -> Result<Self, CartError> {
        match command {
            Command::AddItem(product) => {
                let line = CartLine::snapshot(product)?;
                let mut next = self.clone();
                match next.line_mut(line.item_id()) {
                    Some(existing) => existing.increment(),
                    None => next.lines.push(line),
                }
                next.within_range()
                    .ok_or_else(|| CartError::invalid_product("cart total out of range"))
            }
            Command::RemoveItem(item_id) => Ok(self.without(item_id)),
            Command::SetQuantity { item_id, quantity } => {
                if *quantity <= 0 {
                    return Ok(self.without(item_id));
                }
                let new_quantity = u32::try_from(*quantity)
                    .ok()
                    .and_then(NonZeroU32::new)
                    .ok_or_else(|| CartError::invalid_quantity(quantity))?;
                let mut next = self.clone();
                if let Some(line) = next.line_mut(item_id) {
                    line.set_quantity(new_quantity);
                }
                next.within_range()
                    .ok_or_else(|| CartError::invalid_quantity(quantity))
            }
            Command::Clear => Ok(Self::new()),
        }
    }

    /// This state with `item_id`'s line removed. Removal cannot fail.
    #[must_use]
    pub fn without(&self, item_id: &ItemId) -> Self {
        Self {
            lines: self
                .lines
                .iter()
                .filter(|line| line.item_id() != item_id)
                .cloned()
                .collect(),
        }
    }

    fn within_range(self) -> Option<Self> {
        self.checked_total().map(|_| self)
    }

    fn checked_total(&self) -> Option<Price> {
        self.lines.iter().try_fold(Price::ZERO, |total, line| {
            total.checked_add(line.checked_line_total()?)
        })
    }

    fn line_mut(&mut self, item_id: &ItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.item_id() == item_id)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a single line.
    #[must_use]
    pub fn line(&self, item_id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_id() == item_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines, not units.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity())).sum()
    }

    /// Sum of `unit_price * quantity` using the prices captured at add time.
    #[must_use]
    pub fn total_price(&self) -> Price {
        // Every transition keeps the total in range, so the fallback is never taken.
        self.checked_total().unwrap_or(Price::MAX)
    }

    /// The line's quantity, or 0 if the item is not in the cart.
    #[must_use]
    pub fn quantity_of(&self, item_id: &ItemId) -> u32 {
        self.line(item_id).map_or(0, CartLine::quantity)
    }

    #[must_use]
    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.line(item_id).is_some()
    }
}
