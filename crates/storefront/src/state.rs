//! Application state shared by the presentation layer.

use std::sync::Arc;

use tracing::info;

use urvann_core::cart::{CartStore, Product, TracingObserver};
use urvann_core::storage::KeyValueStore;
use urvann_core::ItemId;

use crate::catalog::{CatalogClient, NewPlant, PlantForm};
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::services::auth::AdminGate;
use crate::storage::FileStore;

/// Everything a storefront session needs.
///
/// The cart and the admin session share one local storage backend, under
/// different keys.
pub struct AppState<S = Arc<FileStore>> {
    config: StorefrontConfig,
    catalog: CatalogClient,
    cart: CartStore<S>,
    admin: AdminGate<S>,
}

impl AppState<Arc<FileStore>> {
    /// Open local storage in the configured data directory and restore the
    /// saved cart and session.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the HTTP
    /// client cannot be built.
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        let storage = Arc::new(FileStore::open(&config.data_dir)?);
        Self::with_storage(config, storage)
    }
}

impl<S: KeyValueStore + Clone> AppState<S> {
    /// Build the state on an explicit storage backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_storage(config: StorefrontConfig, storage: S) -> Result<Self> {
        let catalog = CatalogClient::new(&config.api)?;
        let cart = CartStore::open(storage.clone(), Arc::new(TracingObserver));
        let admin = AdminGate::open(storage, config.admin.clone());
        info!(
            lines = cart.line_count(),
            admin = admin.is_admin(),
            "Storefront state ready"
        );

        Ok(Self {
            config,
            catalog,
            cart,
            admin,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore<S> {
        &mut self.cart
    }

    #[must_use]
    pub const fn admin(&self) -> &AdminGate<S> {
        &self.admin
    }

    pub const fn admin_mut(&mut self) -> &mut AdminGate<S> {
        &mut self.admin
    }

    /// Look up `item_id` in the catalog and add one unit of it to the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the catalog has no such plant, or the
    /// catalog/cart error otherwise.
    pub async fn add_to_cart(&mut self, item_id: &ItemId) -> Result<Product> {
        let plant = self
            .catalog
            .find_plant(item_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("plant {item_id}")))?;
        let product = Product::from(&plant);
        self.cart.add_item(product.clone())?;
        Ok(product)
    }

    /// Validate `form` and create the plant. Admin only.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthorized` unless an admin is logged in, the
    /// form errors if validation fails, or the catalog error if the API
    /// rejects the plant.
    pub async fn submit_plant(&self, form: &PlantForm) -> Result<NewPlant> {
        self.admin.require_admin()?;
        let plant = form.validate()?;
        self.catalog.add_plant(&plant).await?;
        Ok(plant)
    }
}

impl<S> std::fmt::Debug for AppState<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("admin", &self.admin)
            .finish_non_exhaustive()
    }
}
