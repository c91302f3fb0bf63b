use std::path::PathBuf;

use car_catalog_db::OperationError;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Register a new employee.
pub(crate) fn run_user_add(
    db: Option<PathBuf>,
    name: &str,
    login: &str,
    password: Option<String>,
) -> Result<(), CliError> {
    let password = super::password_or_prompt(password)?;
    if name.trim().is_empty() || login.trim().is_empty() || password.is_empty() {
        return Err(CliError::invalid("All fields must be filled in."));
    }

    let (conn, _) = super::open_catalog(db)?;
    let hasher = super::configured_hasher()?;

    match car_catalog_db::add_user(&conn, hasher.as_ref(), name, login, &password) {
        Ok(id) => {
            log::info!(
                "{} User {} added (id {}).",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                login.if_supports_color(Stdout, |t| t.bold()),
                id,
            );
            Ok(())
        }
        Err(OperationError::DuplicateLogin(_)) => Err(CliError::other(
            "A user with this login already exists!",
        )),
        Err(e) => Err(CliError::database(format!(
            "Failed to add user, aborting: {e}"
        ))),
    }
}
