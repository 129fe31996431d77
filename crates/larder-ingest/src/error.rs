//! Error types for snapshot loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading an inventory snapshot.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    // === File System Errors ===
    /// Snapshot file not found.
    #[error("snapshot file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Extension is neither `.json` nor `.csv`.
    #[error("unsupported snapshot format for {path} (expected .json or .csv)")]
    UnsupportedFormat { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === JSON Errors ===
    /// Malformed JSON or a record that does not fit the schema.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Top-level value is neither an array nor an object with `records`.
    #[error("unexpected snapshot layout in {path}: {reason}")]
    SnapshotLayout { path: PathBuf, reason: String },

    // === CSV Errors ===
    /// Failed to read or decode a CSV row.
    #[error("failed to read CSV {path}: {source}")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Required cell is empty.
    #[error("missing {column} in {path}, row {row}")]
    MissingValue {
        path: PathBuf,
        row: usize,
        column: &'static str,
    },

    /// Cell value could not be interpreted.
    #[error("invalid {column} value '{value}' in {path}, row {row}: {reason}")]
    InvalidValue {
        path: PathBuf,
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },
}

/// Result type for snapshot loading.
pub type Result<T> = std::result::Result<T, IngestError>;
