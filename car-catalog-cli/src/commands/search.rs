use std::path::PathBuf;

use car_catalog_core::{FilterKey, SearchFilters, SearchRow};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::cli_types::SearchArgs;

fn to_filters(args: SearchArgs) -> SearchFilters {
    let mut filters = SearchFilters::new();
    let pairs = [
        (FilterKey::Brand, args.brand),
        (FilterKey::Model, args.model),
        (FilterKey::Country, args.country),
        (FilterKey::Class, args.class),
        (FilterKey::BodyType, args.body_type),
        (FilterKey::YearFrom, args.year_from),
        (FilterKey::YearTo, args.year_to),
    ];
    for (key, value) in pairs {
        if let Some(value) = value {
            filters.set(key, value);
        }
    }
    filters
}

/// Search the catalog and print each matching row with its labels.
pub(crate) fn run_search(db: Option<PathBuf>, args: SearchArgs) -> Result<(), CliError> {
    let filters = to_filters(args);
    let (conn, _) = super::open_catalog(db)?;
    let rows = car_catalog_db::search(&conn, &filters)?;

    if rows.is_empty() {
        log::info!("No cars match the search.");
        return Ok(());
    }

    log::info!(
        "{}",
        format!("Found {} car(s)", rows.len()).if_supports_color(Stdout, |t| t.bold()),
    );
    let width = SearchRow::LABELS.iter().map(|l| l.len()).max().unwrap_or(0);
    for (i, row) in rows.iter().enumerate() {
        crate::log_blank();
        log::info!(
            "{}",
            format!("#{}", i + 1).if_supports_color(Stdout, |t| t.cyan()),
        );
        for (label, value) in SearchRow::LABELS.iter().zip(row.fields()) {
            log::info!("  {:<width$}  {}", label, super::show(value));
        }
    }

    Ok(())
}
