//! SQLite schema creation.

use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error creating {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Unsupported schema version: expected at most {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Create all tables and indexes if they don't exist.
///
/// Idempotent; safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    index_mark_names(conn)?;
    crate::credentials::initialize(conn)?;
    if get_schema_version(conn)? == 0 {
        set_schema_version(conn, CURRENT_VERSION)?;
    }
    Ok(())
}

/// Open or create a catalog database at the given path.
///
/// The returned connection is the session handle every data-access call
/// takes; dropping it closes the store.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SchemaError::Io {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(&conn)?;
    if version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: version,
        });
    }
    create_schema(&conn)?;
    log::debug!("Opened catalog database {}", path.display());

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Index Marks by name, unique unless the store already holds repeated
/// names. Mark lookups go by name either way, so repeats are tolerated and
/// the oldest row wins.
fn index_mark_names(conn: &Connection) -> Result<(), SchemaError> {
    let repeated: i64 = conn.query_row(
        "SELECT COUNT(*) FROM (
            SELECT name FROM Marks WHERE name IS NOT NULL GROUP BY name HAVING COUNT(*) > 1
        )",
        [],
        |row| row.get(0),
    )?;

    if repeated == 0 {
        conn.execute_batch("CREATE UNIQUE INDEX IF NOT EXISTS idx_marks_name ON Marks(name);")?;
    } else {
        log::warn!("{repeated} mark name(s) occur more than once; Marks(name) is left non-unique");
        conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_marks_name_lookup ON Marks(name);")?;
    }
    Ok(())
}

/// Get the current schema version, or 0 if no schema exists.
fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

// Column affinities follow the source data; values are not type-checked, so
// free text written by the edit workflow is stored as-is.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS Marks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    country TEXT
);

CREATE TABLE IF NOT EXISTS Models (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    class TEXT,
    year_from INTEGER,
    year_to INTEGER,
    body_type TEXT,
    mark_id INTEGER NOT NULL REFERENCES Marks(id)
);
CREATE INDEX IF NOT EXISTS idx_models_mark ON Models(mark_id);

CREATE TABLE IF NOT EXISTS Generations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    year_start INTEGER,
    year_stop INTEGER,
    model_id INTEGER NOT NULL REFERENCES Models(id)
);
CREATE INDEX IF NOT EXISTS idx_generations_model ON Generations(model_id);

CREATE TABLE IF NOT EXISTS Specifications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    engine_type TEXT,
    horse_power INTEGER,
    transmission TEXT,
    drive TEXT,
    volume REAL,
    consumption_mixed REAL,
    max_speed INTEGER,
    price REAL,
    model_id INTEGER NOT NULL REFERENCES Models(id)
);
CREATE INDEX IF NOT EXISTS idx_specifications_model ON Specifications(model_id);
"#;
