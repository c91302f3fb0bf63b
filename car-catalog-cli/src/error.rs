use car_catalog_db::{OperationError, SchemaError};
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The store could not be opened or a statement failed
    #[error("Database error: {0}")]
    Database(String),

    /// Bad user input (blank required field, malformed id, unknown column)
    #[error("{0}")]
    Invalid(String),

    /// Settings file error
    #[error("Config error: {0}")]
    Config(String),

    /// Source document error
    #[error("Document error: {0}")]
    Document(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn document(msg: impl Into<String>) -> Self {
        Self::Document(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::database(format!("Failed to open catalog database: {e}"))
    }
}

impl From<OperationError> for CliError {
    fn from(e: OperationError) -> Self {
        match e {
            OperationError::Validation(msg) => Self::Invalid(msg),
            OperationError::NotFound { .. } | OperationError::DuplicateLogin(_) => {
                Self::Other(e.to_string())
            }
            OperationError::Sqlite(_) | OperationError::Hash(_) => Self::Database(e.to_string()),
        }
    }
}
