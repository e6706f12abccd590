//! Shopping cart state.
//!
//! # Architecture
//!
//! - [`CartState`] is a plain value; [`CartState::apply`] is the only way to
//!   derive a new one from a [`Command`].
//! - [`CartStore`] owns the live state for a session, persists it through an
//!   injected [`KeyValueStore`](crate::storage::KeyValueStore) after every
//!   accepted command, and reports storage trouble to a [`CartObserver`].
//! - Prices are snapshotted when a line is created and never refreshed.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use rust_decimal::Decimal;
//! use urvann_core::cart::{CartStore, Product, TracingObserver};
//! use urvann_core::storage::MemoryStore;
//! use urvann_core::{ItemId, Price};
//!
//! let mut cart = CartStore::open(MemoryStore::new(), Arc::new(TracingObserver));
//! let fern = Product::new("p1", "Fern", Decimal::from(199));
//!
//! cart.add_item(fern.clone()).unwrap();
//! cart.add_item(fern).unwrap();
//! assert_eq!(cart.total_price(), Price::from_major(398));
//!
//! let p1 = ItemId::parse("p1").unwrap();
//! cart.set_quantity(&p1, 0).unwrap();
//! assert!(!cart.contains(&p1));
//! ```

mod command;
mod error;
mod line;
mod observer;
pub mod record;
mod state;
mod store;

pub use command::{Command, parse_quantity};
pub use error::{CartError, PersistenceError};
pub use line::{CartLine, Product};
pub use observer::{CartObserver, RecordingObserver, TracingObserver};
pub use record::CART_STORAGE_KEY;
pub use state::CartState;
pub use store::CartStore;
