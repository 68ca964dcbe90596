//! Error types for vendir-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Fs(#[from] vendir_fs::Error),

    #[error(transparent)]
    Manifest(#[from] vendir_manifest::Error),

    #[error(transparent)]
    Resolve(#[from] vendir_resolve::Error),

    #[error(transparent)]
    Sync(#[from] vendir_sync::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
