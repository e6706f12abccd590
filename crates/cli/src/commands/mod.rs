//! Command implementations.
//!
//! Each command writes its human-readable output to the supplied writer;
//! diagnostics go through `tracing` to stderr.

pub mod cart;
pub mod plants;
pub mod session;

use thiserror::Error;

use urvann_storefront::error::AppError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The storefront rejected or failed the operation.
    #[error(transparent)]
    App(#[from] AppError),

    /// Output could not be written.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<urvann_core::cart::CartError> for CliError {
    fn from(e: urvann_core::cart::CartError) -> Self {
        Self::App(e.into())
    }
}

impl From<urvann_storefront::services::auth::AuthError> for CliError {
    fn from(e: urvann_storefront::services::auth::AuthError) -> Self {
        Self::App(e.into())
    }
}

impl From<urvann_storefront::catalog::CatalogError> for CliError {
    fn from(e: urvann_storefront::catalog::CatalogError) -> Self {
        Self::App(e.into())
    }
}
