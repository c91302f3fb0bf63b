use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Check a login/password pair against the employee store.
pub(crate) fn run_login(
    db: Option<PathBuf>,
    login: &str,
    password: Option<String>,
) -> Result<(), CliError> {
    if login.trim().is_empty() {
        return Err(CliError::invalid("Login and password must not be empty."));
    }
    let password = super::password_or_prompt(password)?;
    if password.is_empty() {
        return Err(CliError::invalid("Login and password must not be empty."));
    }

    let (conn, _) = super::open_catalog(db)?;
    let hasher = super::configured_hasher()?;

    if car_catalog_db::authenticate(&conn, hasher.as_ref(), login, &password)? {
        log::info!(
            "{} Authorization successful.",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        );
        Ok(())
    } else {
        Err(CliError::other("Invalid login or password."))
    }
}
