//! Read queries for the catalog database.
//!
//! Provides choice-list lookups, the filtered catalog search, record
//! browsing for the edit cascade, and statistics.

use car_catalog_core::types::*;
use rusqlite::types::{ToSql, ValueRef};
use rusqlite::{Connection, params};

use crate::columns::CatalogColumn;
use crate::operations::OperationError;

// ── Choice Lists ────────────────────────────────────────────────────────────

/// Distinct values of one catalog column, in store order.
///
/// With `not_null` set, NULLs are excluded; otherwise a NULL shows up as `None`.
pub fn distinct_values(
    conn: &Connection,
    column: CatalogColumn,
    not_null: bool,
) -> Result<Vec<Option<String>>, OperationError> {
    let mut sql = format!(
        "SELECT DISTINCT {} FROM {}",
        column.column(),
        column.table().as_str()
    );
    if not_null {
        sql.push_str(&format!(" WHERE {} IS NOT NULL", column.column()));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| text_at(row, 0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// All brand names.
pub fn brand_names(conn: &Connection) -> Result<Vec<String>, OperationError> {
    non_null_values(conn, CatalogColumn::MarkName)
}

/// Countries, narrowed to the given brand when one is selected.
pub fn countries_for_brand(
    conn: &Connection,
    brand: Option<&str>,
) -> Result<Vec<String>, OperationError> {
    match brand.filter(|b| !b.trim().is_empty()) {
        Some(brand) => scoped_values(
            conn,
            "SELECT DISTINCT country FROM Marks WHERE name = ?1 AND country IS NOT NULL",
            brand,
        ),
        None => non_null_values(conn, CatalogColumn::MarkCountry),
    }
}

/// Model names, narrowed to the given brand when one is selected.
pub fn models_for_brand(
    conn: &Connection,
    brand: Option<&str>,
) -> Result<Vec<String>, OperationError> {
    match brand.filter(|b| !b.trim().is_empty()) {
        Some(brand) => scoped_values(
            conn,
            "SELECT DISTINCT Models.name
             FROM Models
             JOIN Marks ON Models.mark_id = Marks.id
             WHERE Marks.name = ?1 AND Models.name IS NOT NULL",
            brand,
        ),
        None => non_null_values(conn, CatalogColumn::ModelName),
    }
}

/// Car classes, narrowed to models with the given name when one is selected.
pub fn classes_for_model(
    conn: &Connection,
    model: Option<&str>,
) -> Result<Vec<String>, OperationError> {
    match model.filter(|m| !m.trim().is_empty()) {
        Some(model) => scoped_values(
            conn,
            "SELECT DISTINCT class FROM Models WHERE name = ?1 AND class IS NOT NULL",
            model,
        ),
        None => non_null_values(conn, CatalogColumn::ModelClass),
    }
}

/// Body types, narrowed to models with the given name when one is selected.
pub fn body_types_for_model(
    conn: &Connection,
    model: Option<&str>,
) -> Result<Vec<String>, OperationError> {
    match model.filter(|m| !m.trim().is_empty()) {
        Some(model) => scoped_values(
            conn,
            "SELECT DISTINCT body_type FROM Models WHERE name = ?1 AND body_type IS NOT NULL",
            model,
        ),
        None => non_null_values(conn, CatalogColumn::ModelBodyType),
    }
}

fn non_null_values(conn: &Connection, column: CatalogColumn) -> Result<Vec<String>, OperationError> {
    Ok(distinct_values(conn, column, true)?
        .into_iter()
        .flatten()
        .collect())
}

fn scoped_values(conn: &Connection, sql: &str, scope: &str) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params![scope], |row| text_at(row, 0))?;
    let values = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(values.into_iter().flatten().collect())
}

// ── Catalog Search ──────────────────────────────────────────────────────────

const SEARCH_SQL: &str = "SELECT
        Marks.name, Marks.country,
        Models.name, Models.class, Models.year_from, Models.year_to, Models.body_type,
        Generations.name, Generations.year_start, Generations.year_stop,
        Specifications.engine_type, Specifications.horse_power, Specifications.transmission,
        Specifications.drive, Specifications.volume, Specifications.consumption_mixed,
        Specifications.max_speed
    FROM Marks
    INNER JOIN Models ON Marks.id = Models.mark_id
    INNER JOIN Generations ON Models.id = Generations.model_id
    INNER JOIN Specifications ON Models.id = Specifications.model_id
    WHERE 1=1";

fn filter_clause(key: FilterKey) -> &'static str {
    match key {
        FilterKey::Brand => " AND Marks.name = ?",
        FilterKey::Model => " AND Models.name = ?",
        FilterKey::Country => " AND Marks.country = ?",
        FilterKey::Class => " AND Models.class = ?",
        FilterKey::BodyType => " AND Models.body_type = ?",
        FilterKey::YearFrom => " AND Generations.year_start >= ?",
        FilterKey::YearTo => " AND Generations.year_stop <= ?",
    }
}

/// Build the search statement and its positional parameters.
pub fn build_search_query(filters: &SearchFilters) -> (String, Vec<String>) {
    let mut sql = SEARCH_SQL.to_string();
    let mut values = Vec::new();
    for (key, value) in filters.active() {
        sql.push_str(filter_clause(key));
        values.push(value.to_string());
    }
    (sql, values)
}

/// Search the joined catalog.
///
/// Every model/generation/specification combination of a model yields a row,
/// and a model with no generations or no specifications never appears.
pub fn search(conn: &Connection, filters: &SearchFilters) -> Result<Vec<SearchRow>, OperationError> {
    let (sql, values) = build_search_query(filters);
    log::debug!("Catalog search with {} filter(s)", values.len());

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn ToSql> = values.iter().map(|v| v as &dyn ToSql).collect();
    let rows = stmt.query_map(params.as_slice(), |row| {
        let mut fields: [Option<String>; SEARCH_ROW_LEN] = Default::default();
        for (idx, slot) in fields.iter_mut().enumerate() {
            *slot = text_at(row, idx)?;
        }
        Ok(SearchRow::from_fields(fields))
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Record Browsing ─────────────────────────────────────────────────────────

/// All marks as `(id, name)`.
pub fn list_marks(conn: &Connection) -> Result<Vec<RecordChoice>, OperationError> {
    record_choices(conn, "SELECT id, name FROM Marks ORDER BY id", None)
}

/// Models of one mark as `(id, name)`.
pub fn models_for_mark(conn: &Connection, mark_id: i64) -> Result<Vec<RecordChoice>, OperationError> {
    record_choices(
        conn,
        "SELECT id, name FROM Models WHERE mark_id = ?1 ORDER BY id",
        Some(mark_id),
    )
}

/// Generations of one model as `(id, name)`.
pub fn generations_for_model(
    conn: &Connection,
    model_id: i64,
) -> Result<Vec<RecordChoice>, OperationError> {
    record_choices(
        conn,
        "SELECT id, name FROM Generations WHERE model_id = ?1 ORDER BY id",
        Some(model_id),
    )
}

/// Specifications of one model as `(id, engine_type)`.
pub fn specifications_for_model(
    conn: &Connection,
    model_id: i64,
) -> Result<Vec<RecordChoice>, OperationError> {
    record_choices(
        conn,
        "SELECT id, engine_type FROM Specifications WHERE model_id = ?1 ORDER BY id",
        Some(model_id),
    )
}

fn record_choices(
    conn: &Connection,
    sql: &str,
    parent_id: Option<i64>,
) -> Result<Vec<RecordChoice>, OperationError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = match parent_id {
        Some(id) => stmt.query_map(params![id], row_to_choice)?,
        None => stmt.query_map([], row_to_choice)?,
    };
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Look up one specification by id.
pub fn find_specification(
    conn: &Connection,
    id: i64,
) -> Result<Option<Specification>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, engine_type, horse_power, transmission, drive, volume,
                consumption_mixed, max_speed, price, model_id
         FROM Specifications WHERE id = ?1",
    )?;
    let result = stmt.query_row(params![id], |row| {
        Ok(Specification {
            id: row.get(0)?,
            engine_type: text_at(row, 1)?,
            horse_power: text_at(row, 2)?,
            transmission: text_at(row, 3)?,
            drive: text_at(row, 4)?,
            volume: text_at(row, 5)?,
            consumption_mixed: text_at(row, 6)?,
            max_speed: text_at(row, 7)?,
            price: text_at(row, 8)?,
            model_id: row.get(9)?,
        })
    });
    match result {
        Ok(spec) => Ok(Some(spec)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get overall catalog statistics.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let count = |table: &str| -> rusqlite::Result<i64> {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
    };

    Ok(CatalogStats {
        marks: count("Marks")?,
        models: count("Models")?,
        generations: count("Generations")?,
        specifications: count("Specifications")?,
        employees: count("Employees")?,
    })
}

/// Row counts for the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub marks: i64,
    pub models: i64,
    pub generations: i64,
    pub specifications: i64,
    pub employees: i64,
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_choice(row: &rusqlite::Row<'_>) -> rusqlite::Result<RecordChoice> {
    Ok(RecordChoice {
        id: row.get(0)?,
        label: text_at(row, 1)?,
    })
}

/// Read any column as display text. Columns are not type-checked on write,
/// so a numeric column may hold text and vice versa.
fn text_at(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(r) => Some(r.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
    })
}
