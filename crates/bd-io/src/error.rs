//! Error types for bd-io.

use std::path::PathBuf;

use thiserror::Error;

use bd_core::CoreError;
use bd_dispatch::DispatchError;
use bd_index::IndexError;

/// Errors raised while reading input files or a delivery log.  All of them
/// are fatal: a run never starts on partial data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{file}: {message}")]
    Parse { file: &'static str, message: String },

    #[error("{file}: required column {column:?} not found")]
    MissingColumn { file: &'static str, column: &'static str },

    #[error("{file} names unknown {kind} {name:?}")]
    UnknownId {
        file: &'static str,
        kind: &'static str,
        name: String,
    },

    #[error("solution log not found at {0}")]
    MissingSolution(PathBuf),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can occur when writing run output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;
