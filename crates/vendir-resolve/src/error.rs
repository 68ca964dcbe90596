//! Error types for vendir-resolve

use vendir_fs::ErrorKind;

/// Errors raised while resolving or planning an update.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid version constraint '{constraint}': {reason}")]
    InvalidConstraint { constraint: String, reason: String },

    #[error("no tag of {repository} satisfies '{constraint}' (dependency '{dependency}')")]
    NoMatchingTag {
        dependency: String,
        repository: String,
        constraint: String,
    },

    #[error("dependency '{dependency}' has multiple sources: {sources}")]
    MultipleSources { dependency: String, sources: String },

    /// A catalog or commit lookup failed. Usually a network or host problem.
    #[error("could not query {repository}: {message}")]
    Remote { repository: String, message: String },

    /// The remote answered but has no such branch or tag.
    #[error("'{reference}' not found on {repository}")]
    RefNotFound {
        repository: String,
        reference: String,
    },
}

impl Error {
    pub fn remote(repository: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            repository: repository.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConstraint { .. } => ErrorKind::NotParseable,
            Self::NoMatchingTag { .. } => ErrorKind::NoMatchingTag,
            Self::MultipleSources { .. } => ErrorKind::MultipleSources,
            Self::Remote { .. } => ErrorKind::NotResolvable,
            Self::RefNotFound { .. } => ErrorKind::NotFound,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
