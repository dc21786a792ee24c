//! Error types for the agenda core.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the persistent event store, named by the operation that failed.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not open event store at {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not delete {}: {source}", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not encode event {id}: {source}")]
    Encode {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur in agenda operations.
#[derive(Error, Debug)]
pub enum AgendaError {
    /// User-facing input problem (e.g. a blank title). Nothing was persisted.
    #[error("{0}")]
    Validation(String),

    #[error("No event form is open")]
    FormClosed,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid event id '{0}'. Expected YYYY-MM-DD-<suffix>")]
    InvalidId(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
