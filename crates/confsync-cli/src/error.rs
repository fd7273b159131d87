//! Error types for confsync-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from the sync-then-update pipeline
    #[error(transparent)]
    Core(#[from] confsync_core::Error),

    /// Error from repository synchronization
    #[error(transparent)]
    Git(#[from] confsync_git::Error),

    /// Error from config loading or distribution
    #[error(transparent)]
    Updater(#[from] confsync_updater::Error),

    /// JSON output error
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
