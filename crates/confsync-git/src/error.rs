//! Error types for confsync-git

use std::path::PathBuf;

/// Result type for confsync-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in confsync-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] confsync_fs::Error),

    #[error("Cannot inspect {path}: {source}")]
    Probe {
        path: PathBuf,
        #[source]
        source: confsync_fs::Error,
    },

    #[error("Failed to open repository at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Destination {path} is not empty and is not a git repository")]
    DestinationNotEmpty { path: PathBuf },

    #[error("Failed to clone {remote} into {path}: {source}")]
    CloneFailed {
        remote: String,
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Failed to fetch {remote} into {path}: {source}")]
    FetchFailed {
        remote: String,
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Remote '{name}' not found in {path}")]
    RemoteNotFound { name: String, path: PathBuf },

    #[error("Branch '{branch}' not found on remote '{remote}'")]
    RemoteBranchNotFound { remote: String, branch: String },

    #[error("HEAD of {path} is detached; cannot determine which branch to pull")]
    DetachedHead { path: PathBuf },

    #[error("Cannot fast-forward {path}: {message}")]
    CannotFastForward { path: PathBuf, message: String },

    #[error("Local changes in {path} would be overwritten by the update: {source}")]
    LocalChanges {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },
}
