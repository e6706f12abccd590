//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for the presentation layer. Failures
//! that point at the backend or the local machine are captured to Sentry by
//! [`AppError::report`] before they are shown.

use thiserror::Error;

use urvann_core::cart::CartError;
use urvann_core::storage::StorageError;

use crate::catalog::query::QueryParseError;
use crate::catalog::{CatalogError, PlantFormError};
use crate::config::ConfigError;
use crate::services::auth::AuthError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local storage could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A cart command was rejected.
    #[error("{0}")]
    Cart(#[from] CartError),

    /// Catalog API operation failed.
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Admin login or authorization failed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Add-plant form failed validation.
    #[error("Invalid plant: {0}")]
    Form(#[from] PlantFormError),

    /// Unrecognized filter or sort text.
    #[error("Bad request: {0}")]
    Query(#[from] QueryParseError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Does this error point at the backend or the local machine rather
    /// than at user input?
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Storage(_)
                | Self::Catalog(_)
                | Self::Auth(AuthError::Storage(_) | AuthError::Encode(_))
        )
    }

    /// Log the error, capturing internal failures to Sentry.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Command error"
            );
        } else {
            tracing::debug!(error = %self, "Rejected input");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context.
///
/// Call this after a successful login to associate errors with the user.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for a user action.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("item_id", "p1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
