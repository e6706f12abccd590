//! Admin session commands.

use std::io::Write;

use urvann_core::storage::KeyValueStore;
use urvann_storefront::state::AppState;

use super::CliError;

pub fn login<S: KeyValueStore + Clone>(
    state: &mut AppState<S>,
    username: &str,
    password: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let user = state.admin_mut().login(username, password)?;
    writeln!(out, "Logged in as {} ({})", user.username, user.email)?;
    Ok(())
}

/// Log out. The cart is not touched.
pub fn logout<S: KeyValueStore + Clone>(
    state: &mut AppState<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    state.admin_mut().logout()?;
    writeln!(out, "Logged out")?;
    Ok(())
}

pub fn whoami<S: KeyValueStore + Clone>(
    state: &AppState<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match state.admin().current_user() {
        Some(user) => writeln!(
            out,
            "{} <{}>{} since {}",
            user.username,
            user.email,
            if user.is_admin() { " [admin]" } else { "" },
            user.login_time.format("%Y-%m-%d %H:%M UTC"),
        )?,
        None => writeln!(out, "Not logged in")?,
    }
    Ok(())
}
