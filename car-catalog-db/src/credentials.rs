//! Employee credential store used to gate the application.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use car_catalog_core::settings::HasherKind;
use car_catalog_core::types::Employee;
use rusqlite::{Connection, ErrorCode, params};
use sha2::{Digest, Sha256};

use crate::operations::OperationError;

// ── Password Hashing ────────────────────────────────────────────────────────

/// Turns passwords into opaque stored strings and checks them again.
pub trait CredentialHasher {
    fn hash(&self, password: &str) -> Result<String, OperationError>;

    /// False for a wrong password and for a stored value this hasher can't read.
    fn verify(&self, password: &str, stored: &str) -> bool;
}

/// Salted argon2id, stored as a PHC string.
#[derive(Debug, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, OperationError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| OperationError::Hash(e.to_string()))
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

/// Unsalted single-pass SHA-256 as lowercase hex. Only for stores whose
/// Employees rows were written that way.
#[derive(Debug, Default)]
pub struct Sha256Hasher;

impl CredentialHasher for Sha256Hasher {
    fn hash(&self, password: &str) -> Result<String, OperationError> {
        Ok(format!("{:x}", Sha256::digest(password.as_bytes())))
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        format!("{:x}", Sha256::digest(password.as_bytes())) == stored
    }
}

/// The hasher configured in settings.
pub fn hasher_for(kind: HasherKind) -> Box<dyn CredentialHasher> {
    match kind {
        HasherKind::Argon2 => Box::new(Argon2Hasher),
        HasherKind::Sha256 => Box::new(Sha256Hasher),
    }
}

// ── Employees Table ─────────────────────────────────────────────────────────

/// Create the Employees table if absent. Idempotent.
///
/// Older stores keep the hash in a column named `password`; it is renamed to
/// `password_hash` in place.
pub fn initialize(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS Employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            login TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL
        );",
    )?;

    let columns = employee_columns(conn)?;
    let has = |name: &str| columns.iter().any(|c| c == name);
    if has("password") && !has("password_hash") {
        log::info!("Renaming Employees.password to Employees.password_hash");
        conn.execute_batch("ALTER TABLE Employees RENAME COLUMN password TO password_hash;")?;
    }
    Ok(())
}

fn employee_columns(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA table_info(Employees)")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(1))?;
    rows.collect()
}

/// Find an employee by login.
pub fn find_employee(conn: &Connection, login: &str) -> Result<Option<Employee>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, login, password_hash FROM Employees WHERE login = ?1 LIMIT 1",
    )?;
    let result = stmt.query_row(params![login], |row| {
        Ok(Employee {
            id: row.get(0)?,
            name: row.get(1)?,
            login: row.get(2)?,
            password_hash: row.get(3)?,
        })
    });
    match result {
        Ok(e) => Ok(Some(e)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Check a login/password pair.
///
/// Unknown logins and wrong passwords return `Ok(false)`; only store
/// failures are errors.
pub fn authenticate(
    conn: &Connection,
    hasher: &dyn CredentialHasher,
    login: &str,
    password: &str,
) -> Result<bool, OperationError> {
    let Some(employee) = find_employee(conn, login)? else {
        log::debug!("Login attempt for unknown user {login:?}");
        return Ok(false);
    };
    Ok(hasher.verify(password, &employee.password_hash))
}

/// Register a new employee. Returns the generated ID.
///
/// A login that is already taken is rejected before anything is written.
pub fn add_user(
    conn: &Connection,
    hasher: &dyn CredentialHasher,
    name: &str,
    login: &str,
    password: &str,
) -> Result<i64, OperationError> {
    if find_employee(conn, login)?.is_some() {
        return Err(OperationError::DuplicateLogin(login.to_string()));
    }

    let password_hash = hasher.hash(password)?;
    let result = conn.execute(
        "INSERT INTO Employees (name, login, password_hash) VALUES (?1, ?2, ?3)",
        params![name, login, password_hash],
    );
    match result {
        Ok(_) => {
            log::debug!("Registered user {login:?}");
            Ok(conn.last_insert_rowid())
        }
        // Lost a race with another writer between the check and the insert.
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            Err(OperationError::DuplicateLogin(login.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
