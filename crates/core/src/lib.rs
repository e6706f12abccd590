//! Urvann Core - shared types and cart state.
//!
//! This crate provides the pieces of the plant storefront that have real
//! invariants:
//! - [`types`] - Newtype wrappers for item ids and prices
//! - [`cart`] - The cart state machine and its persisting store
//! - [`storage`] - The key-value persistence seam and an in-memory backend
//!
//! # Architecture
//!
//! The core crate does no network or filesystem I/O. Backends that touch the
//! outside world live in `urvann-storefront` and plug in through
//! [`storage::KeyValueStore`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod storage;
pub mod types;

pub use types::*;
