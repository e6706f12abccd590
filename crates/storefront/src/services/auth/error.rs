//! Authentication error types.

use thiserror::Error;

use urvann_core::storage::StorageError;

/// Errors that can occur during admin login and logout.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password did not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The action needs a logged-in admin.
    #[error("Admin login required")]
    NotAuthorized,

    /// The session could not be saved or removed.
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),

    /// The session record could not be encoded.
    #[error("session encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}
