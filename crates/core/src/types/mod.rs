//! Core types for the Urvann storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;

pub use id::{IdError, ItemId};
pub use price::{Price, PriceError};
