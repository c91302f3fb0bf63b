use car_catalog_db::open_memory;
use car_catalog_db::schema::{CURRENT_VERSION, SchemaError, create_schema, open_database};
use tempfile::TempDir;

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(version, CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    // Creating again should not error
    create_schema(&conn).unwrap();
    let versions: i32 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(versions, 1);
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    let tables = [
        "schema_version",
        "Marks",
        "Models",
        "Generations",
        "Specifications",
        "Employees",
    ];
    for table in tables {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table '{}' should exist", table);
    }
}

#[test]
fn open_database_creates_parent_dirs_and_reopens() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data").join("cars.db");

    {
        let conn = open_database(&path).unwrap();
        conn.execute("INSERT INTO Marks (name, country) VALUES ('Volvo', 'Sweden')", [])
            .unwrap();
    }

    let conn = open_database(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM Marks", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn newer_schema_version_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("cars.db");
    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [CURRENT_VERSION + 1],
        )
        .unwrap();
    }

    match open_database(&path) {
        Err(SchemaError::VersionMismatch { expected, found }) => {
            assert_eq!(expected, CURRENT_VERSION);
            assert_eq!(found, CURRENT_VERSION + 1);
        }
        other => panic!("expected version mismatch, got {other:?}"),
    }
}

#[test]
fn store_with_repeated_mark_names_still_opens() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cars.db");
    {
        let legacy = rusqlite::Connection::open(&path).unwrap();
        legacy
            .execute_batch(
                "CREATE TABLE Marks (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT,
                    country TEXT
                );
                INSERT INTO Marks (name, country) VALUES ('Kia', 'South Korea');
                INSERT INTO Marks (name, country) VALUES ('Kia', 'Slovakia');",
            )
            .unwrap();
    }

    let conn = open_database(&path).unwrap();
    let (id, created) =
        car_catalog_db::insert_or_get_mark(&conn, Some("Kia"), Some("Russia")).unwrap();
    assert!(!created);
    assert_eq!(id, 1);

    let kias: i64 = conn
        .query_row("SELECT COUNT(*) FROM Marks WHERE name = 'Kia'", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(kias, 2);
}

#[test]
fn fresh_store_enforces_unique_mark_names() {
    let conn = open_memory().unwrap();
    conn.execute("INSERT INTO Marks (name) VALUES ('Kia')", [])
        .unwrap();
    assert!(
        conn.execute("INSERT INTO Marks (name) VALUES ('Kia')", [])
            .is_err()
    );
}
