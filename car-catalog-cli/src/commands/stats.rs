use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

pub(crate) fn run_stats(db: Option<PathBuf>) -> Result<(), CliError> {
    let db_path = super::resolve_db_path(db)?;

    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'car-catalog load <FILE>' to create one.");
        return Ok(());
    }

    let conn = car_catalog_db::open_database(&db_path)?;
    let stats = car_catalog_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Marks:           {:>8}", stats.marks);
    log::info!("  Models:          {:>8}", stats.models);
    log::info!("  Generations:     {:>8}", stats.generations);
    log::info!("  Specifications:  {:>8}", stats.specifications);
    log::info!("  Employees:       {:>8}", stats.employees);

    Ok(())
}
