//! Persistence error types surfaced to the shell

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while reading or writing catalog files.
///
/// Validation problems are never errors (devices fall back to defaults) and
/// lookups that miss return `None`, so this enum only covers disk I/O.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog file {path} (corrupted or invalid format): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize catalog for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported catalog format version {found} (expected {expected})")]
    UnsupportedFormat { found: u32, expected: u32 },

    #[error("Failed to write CSV export {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;
