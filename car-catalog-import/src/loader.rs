//! Flatten source documents into catalog rows.
//!
//! Traversal is depth-first. Each brand becomes (or reuses) a Mark, each
//! model a Model, each generation a Generation, and each modification of
//! each configuration a Specification attached to the model. The generation
//! a specification came from is not recorded.

use car_catalog_core::document::{SourceBrand, SourceModel, SourceSpecifications, SourceValue};
use car_catalog_core::types::NewSpecification;
use car_catalog_db::operations::{self, OperationError};
use rusqlite::Connection;
use thiserror::Error;

use crate::price::PriceGenerator;
use crate::progress::LoadProgress;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Statistics from a single load.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadStats {
    pub marks_created: u64,
    pub marks_existing: u64,
    pub models: u64,
    pub generations: u64,
    pub specifications: u64,
}

/// Load parsed brands into the catalog database in one transaction.
///
/// Missing leaves are stored as NULL. Marks are matched by name, so loading
/// the same document twice reuses its marks but inserts every model,
/// generation and specification again.
pub fn load_catalog(
    conn: &Connection,
    brands: &[SourceBrand],
    prices: &mut dyn PriceGenerator,
    progress: Option<&dyn LoadProgress>,
) -> Result<LoadStats, LoadError> {
    let mut stats = LoadStats::default();

    let tx = conn.unchecked_transaction()?;

    for (i, brand) in brands.iter().enumerate() {
        load_brand(&tx, brand, prices, &mut stats)?;

        if let Some(p) = progress {
            p.on_brand(i + 1, brands.len(), brand.name.as_deref().unwrap_or("(unnamed)"));
        }
    }

    tx.commit()?;

    let summary = format!(
        "Loaded {} brand(s): {} new mark(s), {} model(s), {} generation(s), {} specification(s)",
        brands.len(),
        stats.marks_created,
        stats.models,
        stats.generations,
        stats.specifications
    );
    match progress {
        Some(p) => p.on_complete(&summary),
        None => log::info!("{summary}"),
    }

    Ok(stats)
}

fn load_brand(
    conn: &Connection,
    brand: &SourceBrand,
    prices: &mut dyn PriceGenerator,
    stats: &mut LoadStats,
) -> Result<(), LoadError> {
    if brand.name.is_none() {
        log::warn!("Loading a brand without a name");
    }

    let (mark_id, created) =
        operations::insert_or_get_mark(conn, brand.name.as_deref(), brand.country.as_deref())?;
    if created {
        stats.marks_created += 1;
    } else {
        stats.marks_existing += 1;
    }

    for model in &brand.models {
        load_model(conn, mark_id, model, prices, stats)?;
    }
    Ok(())
}

fn load_model(
    conn: &Connection,
    mark_id: i64,
    model: &SourceModel,
    prices: &mut dyn PriceGenerator,
    stats: &mut LoadStats,
) -> Result<(), LoadError> {
    let year_from = text(&model.year_from);
    let year_to = text(&model.year_to);
    let model_id = operations::insert_model(
        conn,
        mark_id,
        model.name.as_deref(),
        model.class.as_deref(),
        year_from.as_deref(),
        year_to.as_deref(),
        model.first_body_type(),
    )?;
    stats.models += 1;

    for generation in &model.generations {
        let year_start = text(&generation.year_start);
        let year_stop = text(&generation.year_stop);
        operations::insert_generation(
            conn,
            model_id,
            generation.name.as_deref(),
            year_start.as_deref(),
            year_stop.as_deref(),
        )?;
        stats.generations += 1;

        for configuration in &generation.configurations {
            for modification in &configuration.modifications {
                let spec = to_new_specification(&modification.specifications, prices.generate());
                operations::insert_specification(conn, model_id, &spec)?;
                stats.specifications += 1;
            }
        }
    }
    Ok(())
}

fn to_new_specification(source: &SourceSpecifications, price: i64) -> NewSpecification {
    NewSpecification {
        engine_type: text(&source.engine_type),
        horse_power: text(&source.horse_power),
        transmission: text(&source.transmission),
        drive: text(&source.drive),
        volume: text(&source.volume),
        consumption_mixed: text(&source.consumption_mixed),
        max_speed: text(&source.max_speed),
        price: Some(price.to_string()),
    }
}

fn text(value: &Option<SourceValue>) -> Option<String> {
    value.as_ref().map(SourceValue::to_string)
}
