//! Error types for confsync-updater

use std::path::PathBuf;

use crate::operator::BoxError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] confsync_fs::Error),

    #[error("Routing config not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to read routing config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse routing config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Operator '{name}' is registered more than once")]
    DuplicateOperator { name: String },

    #[error("Operator '{name}' was not found")]
    OperatorNotFound { name: String },

    #[error("Failed to read source file {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: confsync_fs::Error,
    },

    #[error("Operator '{operator}' rejected task for {file}: {source}")]
    SubmitFailed {
        operator: String,
        file: String,
        #[source]
        source: BoxError,
    },

    #[error("Operator '{operator}' failed to run: {source}")]
    OperatorFailed {
        operator: String,
        #[source]
        source: BoxError,
    },
}
