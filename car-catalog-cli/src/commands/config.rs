use std::path::PathBuf;

use car_catalog_core::settings;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Show the settings file and what it resolves to.
pub(crate) fn run_config_show(db: Option<PathBuf>) -> Result<(), CliError> {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "Car Catalog Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let loaded = super::load_settings()?;
    let source = if db.is_some() {
        "--db"
    } else if loaded.database.path.is_some() {
        "settings"
    } else {
        "default"
    };
    let db_path = settings::resolve_db_path(db, &loaded);
    log::info!("  Database:      {} ({})", db_path.display(), source);
    log::info!("  Hasher:        {:?}", loaded.auth.hasher);

    if let Some(contents) = settings::load_settings_string() {
        crate::log_blank();
        for line in contents.lines() {
            log::info!("    {}", line.if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    log::info!("{}", settings::settings_path().display());
    Ok(())
}

/// Store or clear the default database path.
pub(crate) fn run_config_set_db(path: Option<PathBuf>) -> Result<(), CliError> {
    let path = match path {
        Some(p) if p.is_relative() => Some(std::env::current_dir()?.join(p)),
        other => other,
    };
    settings::save_db_path(path.as_deref())
        .map_err(|e| CliError::config(format!("Failed to save settings: {e}")))?;

    match path {
        Some(p) => log::info!("Default database set to {}", p.display()),
        None => log::info!("Default database cleared"),
    }
    Ok(())
}
