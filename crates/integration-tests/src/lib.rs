//! Integration tests for the Urvann storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p urvann-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart reload through the file store, corrupt and
//!   legacy records, long command sequences
//! - `admin_session` - Admin login persistence and its independence from the
//!   cart
//!
//! The helpers here build throwaway profiles in temporary directories.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use rust_decimal::Decimal;
use tempfile::TempDir;

use urvann_core::cart::Product;
use urvann_storefront::config::StorefrontConfig;

/// A throwaway local profile.
pub struct TestProfile {
    pub dir: TempDir,
}

impl TestProfile {
    /// Create an empty profile directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp profile"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Default configuration pointed at this profile. The API URL is never
    /// contacted by these tests.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration is invalid.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        let dir = self.path().to_string_lossy().into_owned();
        StorefrontConfig::from_lookup(|key| (key == "URVANN_DATA_DIR").then(|| dir.clone()))
            .expect("default config")
    }
}

impl Default for TestProfile {
    fn default() -> Self {
        Self::new()
    }
}

/// A catalog product priced in whole rupees.
#[must_use]
pub fn product(id: &str, name: &str, rupees: u32) -> Product {
    Product::new(id, name, Decimal::from(rupees))
}
