//! Write operations: the new-car workflow, field edits, and deletes.

use car_catalog_core::types::*;
use rusqlite::{Connection, params};
use thiserror::Error;

use crate::columns::CatalogColumn;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
    #[error("A user with login '{0}' already exists")]
    DuplicateLogin(String),
    #[error("{0}")]
    Validation(String),
    #[error("Password hashing failed: {0}")]
    Hash(String),
}

impl From<InvalidRecordId> for OperationError {
    fn from(e: InvalidRecordId) -> Self {
        Self::Validation(e.to_string())
    }
}

// ── Row Inserts ─────────────────────────────────────────────────────────────

/// Insert a mark unless one with the same name exists. Returns the mark id
/// and whether a row was created.
///
/// The first write wins: an existing mark keeps its country.
pub fn insert_or_get_mark(
    conn: &Connection,
    name: Option<&str>,
    country: Option<&str>,
) -> Result<(i64, bool), OperationError> {
    // Older stores may lack the unique index, so look before inserting.
    if let Some(name) = name {
        if let Some(id) = find_mark_by_name(conn, name)? {
            return Ok((id, false));
        }
    }

    let changed = conn.execute(
        "INSERT OR IGNORE INTO Marks (name, country) VALUES (?1, ?2)",
        params![name, country],
    )?;
    if changed == 1 {
        return Ok((conn.last_insert_rowid(), true));
    }

    // Only a non-NULL name can collide with the unique index.
    let id = match name {
        Some(name) => find_mark_by_name(conn, name)?,
        None => None,
    };
    id.map(|id| (id, false)).ok_or_else(|| OperationError::NotFound {
        entity_type: "mark".to_string(),
        id: name.unwrap_or_default().to_string(),
    })
}

/// Find a mark id by exact name. With repeated names, the oldest row.
pub fn find_mark_by_name(conn: &Connection, name: &str) -> Result<Option<i64>, OperationError> {
    let mut stmt = conn.prepare("SELECT id FROM Marks WHERE name = ?1 ORDER BY id LIMIT 1")?;
    let result = stmt.query_row(params![name], |row| row.get::<_, i64>(0));
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Insert a model under `mark_id`. Returns the generated ID.
pub fn insert_model(
    conn: &Connection,
    mark_id: i64,
    name: Option<&str>,
    class: Option<&str>,
    year_from: Option<&str>,
    year_to: Option<&str>,
    body_type: Option<&str>,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO Models (name, class, year_from, year_to, body_type, mark_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![name, class, year_from, year_to, body_type, mark_id],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a generation under `model_id`. Returns the generated ID.
pub fn insert_generation(
    conn: &Connection,
    model_id: i64,
    name: Option<&str>,
    year_start: Option<&str>,
    year_stop: Option<&str>,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO Generations (name, year_start, year_stop, model_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![name, year_start, year_stop, model_id],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert a specification under `model_id`. Returns the generated ID.
///
/// Specifications hang off the model, not the generation.
pub fn insert_specification(
    conn: &Connection,
    model_id: i64,
    spec: &NewSpecification,
) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO Specifications (engine_type, horse_power, transmission, drive, volume,
             consumption_mixed, max_speed, price, model_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            spec.engine_type,
            spec.horse_power,
            spec.transmission,
            spec.drive,
            spec.volume,
            spec.consumption_mixed,
            spec.max_speed,
            spec.price,
            model_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── New-Car Workflow ────────────────────────────────────────────────────────

/// IDs of the rows touched by [`create_car`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedCar {
    pub mark_id: i64,
    /// False when an existing mark with the same name was reused.
    pub mark_created: bool,
    pub model_id: i64,
    pub generation_id: i64,
    pub specification_id: i64,
}

/// Insert a complete car: mark (or existing match), model, one generation and
/// one specification, all in one transaction.
///
/// Only the brand and model names are validated, and they are stored trimmed.
/// Blank optional fields are stored as NULL.
pub fn create_car(conn: &Connection, car: &NewCar) -> Result<CreatedCar, OperationError> {
    let mark_name = car.mark.name.trim();
    if mark_name.is_empty() {
        return Err(OperationError::Validation(
            "The field \"Brand\" cannot be empty.".to_string(),
        ));
    }
    let model_name = car.model.name.trim();
    if model_name.is_empty() {
        return Err(OperationError::Validation(
            "The field \"Model\" cannot be empty.".to_string(),
        ));
    }

    let tx = conn.unchecked_transaction()?;

    let (mark_id, mark_created) =
        insert_or_get_mark(&tx, Some(mark_name), non_blank(&car.mark.country))?;
    let model_id = insert_model(
        &tx,
        mark_id,
        Some(model_name),
        non_blank(&car.model.class),
        non_blank(&car.model.year_from),
        non_blank(&car.model.year_to),
        non_blank(&car.model.body_type),
    )?;
    let generation_id = insert_generation(
        &tx,
        model_id,
        non_blank(&car.generation.name),
        non_blank(&car.generation.year_start),
        non_blank(&car.generation.year_stop),
    )?;
    let specification_id =
        insert_specification(&tx, model_id, &without_blanks(&car.specification))?;

    tx.commit()?;

    log::debug!(
        "Created car {mark_name} {model_name}: mark {mark_id} (new: {mark_created}), \
         model {model_id}, generation {generation_id}, specification {specification_id}"
    );

    Ok(CreatedCar {
        mark_id,
        mark_created,
        model_id,
        generation_id,
        specification_id,
    })
}

fn without_blanks(spec: &NewSpecification) -> NewSpecification {
    let keep = |v: &Option<String>| non_blank(v).map(str::to_string);
    NewSpecification {
        engine_type: keep(&spec.engine_type),
        horse_power: keep(&spec.horse_power),
        transmission: keep(&spec.transmission),
        drive: keep(&spec.drive),
        volume: keep(&spec.volume),
        consumption_mixed: keep(&spec.consumption_mixed),
        max_speed: keep(&spec.max_speed),
        price: keep(&spec.price),
    }
}

// ── Field Edits ─────────────────────────────────────────────────────────────

/// One pending column edit from the edit workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub column: CatalogColumn,
    pub value: String,
    /// Row id in `column.table()`.
    pub id: i64,
}

impl FieldEdit {
    pub fn new(column: CatalogColumn, value: impl Into<String>, id: i64) -> Self {
        Self {
            column,
            value: value.into(),
            id,
        }
    }
}

/// Write `value` into one column of one row.
///
/// Blank values are skipped and return `Ok(false)`. The value is stored
/// without type coercion.
pub fn update_field(
    conn: &Connection,
    column: CatalogColumn,
    value: &str,
    id: i64,
) -> Result<bool, OperationError> {
    if value.trim().is_empty() {
        return Ok(false);
    }

    let table = column.table();
    let sql = format!(
        "UPDATE {} SET {} = ?1 WHERE id = ?2",
        table.as_str(),
        column.column()
    );
    let changed = conn.execute(&sql, params![value, id])?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: table.as_str().to_string(),
            id: id.to_string(),
        });
    }
    log::debug!("Updated {column} = {value:?} for id {id}");
    Ok(true)
}

/// Apply several edits in one transaction. Returns how many were applied
/// (blank edits are skipped). A missing target rolls back the whole batch.
pub fn update_fields(conn: &Connection, edits: &[FieldEdit]) -> Result<usize, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let mut applied = 0;
    for edit in edits {
        if update_field(&tx, edit.column, &edit.value, edit.id)? {
            applied += 1;
        }
    }
    tx.commit()?;
    Ok(applied)
}

// ── Deletes ─────────────────────────────────────────────────────────────────

/// Delete exactly one specification. Its model and generations are kept.
pub fn delete_specification(conn: &Connection, id: i64) -> Result<(), OperationError> {
    let changed = conn.execute("DELETE FROM Specifications WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "specification".to_string(),
            id: id.to_string(),
        });
    }
    log::debug!("Deleted specification {id}");
    Ok(())
}
