pub(crate) mod add;
pub(crate) mod choices;
pub(crate) mod config;
pub(crate) mod delete;
pub(crate) mod edit;
pub(crate) mod load;
pub(crate) mod login;
pub(crate) mod records;
pub(crate) mod search;
pub(crate) mod stats;
pub(crate) mod user;

use std::io::Write;
use std::path::PathBuf;

use car_catalog_core::settings::{self, Settings};
use car_catalog_db::{CredentialHasher, hasher_for};
use rusqlite::Connection;

use crate::CliError;

/// Load settings, turning a broken settings file into a CLI error.
pub(crate) fn load_settings() -> Result<Settings, CliError> {
    settings::load_settings().map_err(|e| CliError::config(e.to_string()))
}

/// Resolve the database path from the `--db` flag and settings.
pub(crate) fn resolve_db_path(db: Option<PathBuf>) -> Result<PathBuf, CliError> {
    let settings = load_settings()?;
    Ok(settings::resolve_db_path(db, &settings))
}

/// Open (creating if needed) the catalog database.
pub(crate) fn open_catalog(db: Option<PathBuf>) -> Result<(Connection, PathBuf), CliError> {
    let path = resolve_db_path(db)?;
    let conn = car_catalog_db::open_database(&path)?;
    Ok((conn, path))
}

/// The password hasher selected in settings.
pub(crate) fn configured_hasher() -> Result<Box<dyn CredentialHasher>, CliError> {
    Ok(hasher_for(load_settings()?.auth.hasher))
}

/// Use the given password or prompt for one on stdin.
pub(crate) fn password_or_prompt(password: Option<String>) -> Result<String, CliError> {
    if let Some(p) = password {
        return Ok(p);
    }
    print!("  Password: ");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Parse a record id argument.
pub(crate) fn record_id(input: &str) -> Result<i64, CliError> {
    car_catalog_core::parse_record_id(input).map_err(|e| CliError::invalid(e.to_string()))
}

/// Render an optional column for display.
pub(crate) fn show(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
