//! Integration tests for the admin session and its independence from the
//! cart.

#![allow(clippy::unwrap_used)]

use urvann_core::ItemId;
use urvann_integration_tests::{TestProfile, product};
use urvann_storefront::services::auth::{AuthError, USER_STORAGE_KEY};
use urvann_storefront::state::AppState;

#[test]
fn test_login_survives_restart() {
    let profile = TestProfile::new();
    {
        let mut state = AppState::open(profile.config()).unwrap();
        state.admin_mut().login("admin", "admin123").unwrap();
    }

    let state = AppState::open(profile.config()).unwrap();
    assert!(state.admin().is_admin());
    assert!(state.admin().require_admin().is_ok());
    assert!(profile.path().join(format!("{USER_STORAGE_KEY}.json")).exists());
}

#[test]
fn test_logout_keeps_cart() {
    let profile = TestProfile::new();
    let mut state = AppState::open(profile.config()).unwrap();
    state.admin_mut().login("admin", "admin123").unwrap();
    state
        .cart_mut()
        .add_item(product("p1", "Fern", 199))
        .unwrap();

    state.admin_mut().logout().unwrap();
    assert!(!state.admin().is_authenticated());
    assert_eq!(state.cart().line_count(), 1);

    let reopened = AppState::open(profile.config()).unwrap();
    assert!(!reopened.admin().is_authenticated());
    assert!(reopened.cart().contains(&ItemId::parse("p1").unwrap()));
}

#[test]
fn test_configured_credentials() {
    let profile = TestProfile::new();
    let dir = profile.path().to_string_lossy().into_owned();
    let config = urvann_storefront::config::StorefrontConfig::from_lookup(|key| match key {
        "URVANN_DATA_DIR" => Some(dir.clone()),
        "URVANN_ADMIN_USERNAME" => Some("gardener".to_string()),
        "URVANN_ADMIN_PASSWORD" => Some("s3cret".to_string()),
        _ => None,
    })
    .unwrap();

    let mut state = AppState::open(config).unwrap();
    assert!(matches!(
        state.admin_mut().login("admin", "admin123"),
        Err(AuthError::InvalidCredentials)
    ));
    let user = state.admin_mut().login("gardener", "s3cret").unwrap();
    assert_eq!(user.username, "gardener");
}

#[test]
fn test_corrupt_session_file_discarded() {
    let profile = TestProfile::new();
    std::fs::write(
        profile.path().join(format!("{USER_STORAGE_KEY}.json")),
        "not json",
    )
    .unwrap();

    let state = AppState::open(profile.config()).unwrap();
    assert!(!state.admin().is_authenticated());
    assert!(!profile.path().join(format!("{USER_STORAGE_KEY}.json")).exists());
}
