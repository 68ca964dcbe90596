//! Error types for vendir-git

use vendir_fs::ErrorKind;

/// Result type for vendir-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to a remote
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Reference '{name}' not found on {url}")]
    RefNotFound { url: String, name: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Git(_) => ErrorKind::NotResolvable,
            Self::Io(_) => ErrorKind::Io,
            Self::RefNotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// Convert into the resolver's error for `url`.
    ///
    /// A missing ref is permanent and keeps that kind. Everything else is
    /// reported as a failed query.
    pub fn into_remote(self, url: &str) -> vendir_resolve::Error {
        match self {
            Self::RefNotFound { name, .. } => vendir_resolve::Error::RefNotFound {
                repository: url.to_string(),
                reference: name,
            },
            Self::Git(e) => vendir_resolve::Error::remote(url, e.message()),
            other => vendir_resolve::Error::remote(url, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::missing_ref(
        Error::RefNotFound { url: "u".into(), name: "nope".into() },
        ErrorKind::NotFound
    )]
    #[case::git_failure(Error::Git(git2::Error::from_str("timed out")), ErrorKind::NotResolvable)]
    #[case::io_failure(
        Error::Io(std::io::Error::other("disk full")),
        ErrorKind::NotResolvable
    )]
    fn test_into_remote_kind(#[case] error: Error, #[case] expected: ErrorKind) {
        assert_eq!(error.into_remote("https://example.com/r").kind(), expected);
    }

    #[test]
    fn test_missing_ref_names_repository() {
        let err = Error::RefNotFound {
            url: "ignored".into(),
            name: "feature".into(),
        }
        .into_remote("https://example.com/r");
        assert_eq!(err.to_string(), "'feature' not found on https://example.com/r");
    }
}
