use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while writing run outputs.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build output table: {0}")]
    Frame(#[from] polars::prelude::PolarsError),

    #[error("failed to serialize report to {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;
