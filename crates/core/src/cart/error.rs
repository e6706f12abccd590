//! Cart error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced to callers of the cart commands.
///
/// A rejected command leaves the cart exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The product handed to `add_item` is malformed.
    #[error("invalid product: {reason}")]
    InvalidProduct {
        /// What was wrong with it.
        reason: String,
    },

    /// The quantity handed to `set_quantity` is not a usable integer.
    #[error("invalid quantity: {input:?}")]
    InvalidQuantity {
        /// The offending input, as received.
        input: String,
    },
}

impl CartError {
    pub(crate) fn invalid_product(reason: impl Into<String>) -> Self {
        Self::InvalidProduct {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_quantity(input: impl ToString) -> Self {
        Self::InvalidQuantity {
            input: input.to_string(),
        }
    }
}

/// Persistence failures.
///
/// These never reach the caller of a cart command; the store routes them to
/// its [`CartObserver`](super::CartObserver) and carries on in memory.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backend could not be read during hydration.
    #[error("failed to read persisted cart: {0}")]
    Read(#[source] StorageError),

    /// The persisted record is not a cart record.
    #[error("persisted cart is unreadable: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The backend rejected a write.
    #[error("failed to write cart: {0}")]
    Write(#[source] StorageError),

    /// The cart could not be serialized.
    #[error("failed to encode cart: {0}")]
    Encode(#[source] serde_json::Error),
}

impl PersistenceError {
    /// Returns `true` for failures that happened while hydrating.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        matches!(self, Self::Read(_) | Self::Corrupt(_))
    }
}
