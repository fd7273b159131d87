//! Error types for confsync-core

/// Result type for confsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors, tagged with the stage that failed
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cloning or pulling the working copy failed
    #[error("Sync failed: {0}")]
    Sync(#[from] confsync_git::Error),

    /// Loading the routing config or distributing files failed
    #[error("Update failed: {0}")]
    Update(#[from] confsync_updater::Error),
}
