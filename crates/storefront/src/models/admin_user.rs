//! The logged-in admin, as persisted in local storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role carried by a stored user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    /// Any role this build does not know about.
    #[serde(other)]
    Other,
}

/// A logged-in user.
///
/// Stored as `{ id, username, email, role, loginTime }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: u32,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub login_time: DateTime<Utc>,
}

impl AdminUser {
    /// Does this user hold the admin role?
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_record_shape() {
        let user = AdminUser {
            id: 1,
            username: "admin".to_string(),
            email: "admin@urvann.com".to_string(),
            role: UserRole::Admin,
            login_time: "2024-05-01T10:00:00Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "admin");
        assert_eq!(json["loginTime"], "2024-05-01T10:00:00Z");
    }

    #[test]
    fn test_unknown_role_is_not_admin() {
        let user: AdminUser = serde_json::from_str(
            r#"{"id":2,"username":"ed","email":"ed@x.com","role":"editor","loginTime":"2024-05-01T10:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(user.role, UserRole::Other);
        assert!(!user.is_admin());
    }
}
