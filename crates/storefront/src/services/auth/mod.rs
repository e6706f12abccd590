//! Admin login gate.
//!
//! A single hardcoded admin account, checked against configuration. This
//! gates the add-plant screen in the UI; it is not an authentication system.
//! The logged-in user is kept in local storage under [`USER_STORAGE_KEY`] so
//! a session survives restarts.

mod error;

pub use error::AuthError;

use chrono::Utc;
use secrecy::ExposeSecret;
use tracing::{debug, info, warn};

use urvann_core::storage::KeyValueStore;

use crate::config::AdminConfig;
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::models::{AdminUser, UserRole};

/// Storage key of the persisted session.
pub const USER_STORAGE_KEY: &str = "urvann-user";

/// Admin session holder.
pub struct AdminGate<S> {
    storage: S,
    admin: AdminConfig,
    user: Option<AdminUser>,
}

impl<S: KeyValueStore> AdminGate<S> {
    /// Restore any saved session from `storage`.
    ///
    /// An unreadable backend means no session. An unparseable record is
    /// removed.
    pub fn open(storage: S, admin: AdminConfig) -> Self {
        let user = match storage.get(USER_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<AdminUser>(&raw) {
                Ok(user) => {
                    debug!(username = %user.username, "Restored admin session");
                    Some(user)
                }
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable session record");
                    if let Err(e) = storage.remove(USER_STORAGE_KEY) {
                        warn!(error = %e, "Failed to remove session record");
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read session record");
                None
            }
        };

        Self {
            storage,
            admin,
            user,
        }
    }

    /// Log in with the admin credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on a mismatch, or a storage
    /// error if the session cannot be saved. Nothing changes on error.
    pub fn login(&mut self, username: &str, password: &str) -> Result<&AdminUser, AuthError> {
        if username != self.admin.username || password != self.admin.password.expose_secret() {
            warn!(username, "Rejected admin login");
            return Err(AuthError::InvalidCredentials);
        }

        let user = AdminUser {
            id: 1,
            username: self.admin.username.clone(),
            email: self.admin.email.clone(),
            role: UserRole::Admin,
            login_time: Utc::now(),
        };
        self.storage
            .set(USER_STORAGE_KEY, &serde_json::to_string(&user)?)?;

        info!(username = %user.username, "Admin logged in");
        set_sentry_user(&user.id, Some(&user.email));
        Ok(&*self.user.insert(user))
    }

    /// End the session. The cart is left alone.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the saved record cannot be removed;
    /// the in-memory session is cleared regardless.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        if let Some(user) = self.user.take() {
            info!(username = %user.username, "Admin logged out");
        }
        clear_sentry_user();
        self.storage.remove(USER_STORAGE_KEY)?;
        Ok(())
    }

    /// The logged-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&AdminUser> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(AdminUser::is_admin)
    }

    /// The logged-in admin.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthorized` unless an admin is logged in.
    pub fn require_admin(&self) -> Result<&AdminUser, AuthError> {
        self.user
            .as_ref()
            .filter(|user| user.is_admin())
            .ok_or(AuthError::NotAuthorized)
    }
}

impl<S> std::fmt::Debug for AdminGate<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("admin", &self.admin)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}
