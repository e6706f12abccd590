//! Urvann storefront services.
//!
//! Client-side application services for the plant storefront: configuration,
//! file-backed local storage, the catalog API client, catalog filtering, the
//! add-plant form, and the admin login gate. The cart itself lives in
//! `urvann-core`; [`state::AppState`] wires it to local storage.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
