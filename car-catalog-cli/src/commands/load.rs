use std::path::{Path, PathBuf};

use car_catalog_import::{FixedPrice, LoadProgress, LogProgress, PriceGenerator, RandomPrice};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Bulk-load a source document into the catalog.
pub(crate) fn run_load(db: Option<PathBuf>, file: &Path, price: Option<i64>) -> Result<(), CliError> {
    let brands = car_catalog_core::load_document(file)
        .map_err(|e| CliError::document(e.to_string()))?;

    let (conn, db_path) = super::open_catalog(db)?;

    let mut random = RandomPrice;
    let mut fixed;
    let prices: &mut dyn PriceGenerator = match price {
        Some(p) => {
            fixed = FixedPrice(p);
            &mut fixed
        }
        None => &mut random,
    };

    let progress = LogProgress;
    progress.on_phase(&format!(
        "Loading {} brand(s) from {}",
        brands.len(),
        file.display()
    ));

    let stats = car_catalog_import::load_catalog(&conn, &brands, prices, Some(&progress))
        .map_err(|e| CliError::database(format!("Load failed, nothing was written: {e}")))?;

    crate::log_blank();
    log::info!("{}", "Load complete".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Database:        {}", db_path.display());
    log::info!(
        "  Marks:           {:>8} new, {} existing",
        stats.marks_created,
        stats.marks_existing
    );
    log::info!("  Models:          {:>8}", stats.models);
    log::info!("  Generations:     {:>8}", stats.generations);
    log::info!("  Specifications:  {:>8}", stats.specifications);

    Ok(())
}
