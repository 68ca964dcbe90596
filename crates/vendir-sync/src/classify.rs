//! Reading `vendir sync` failures.
//!
//! Checked in order:
//!
//! 1. a git error block ending in `exit status 1` is transient
//! 2. vendir's warning about moving a manual directory into its staging
//!    dir is harmless
//! 3. anything else is a permanent problem with the manifest

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

static GIT_ERROR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)Error: .*: exit status 1").expect("Invalid git error regex"));

static MANUAL_SYNC_MOVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Error: .*Moving directory.*to staging dir.*")
        .expect("Invalid manual sync regex")
});

/// Why a sync run exited non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncFailure {
    /// Diagnostic lines from the first line of the git error on.
    GitError(String),
    ManualSyncMove,
    /// Trimmed stderr with the workspace path removed.
    Other(String),
}

pub fn classify_stderr(stderr: &str, workspace: &Path) -> SyncFailure {
    if GIT_ERROR.is_match(stderr) {
        return SyncFailure::GitError(git_error_lines(stderr));
    }
    if MANUAL_SYNC_MOVE.is_match(stderr) {
        return SyncFailure::ManualSyncMove;
    }
    SyncFailure::Other(sanitize(stderr, workspace))
}

/// Drop the lines before the first one that holds a whole git error.
/// The error may span lines, in which case everything is kept.
fn git_error_lines(stderr: &str) -> String {
    let lines: Vec<&str> = stderr
        .split_inclusive('\n')
        .skip_while(|line| !GIT_ERROR.is_match(line))
        .collect();
    if lines.is_empty() {
        stderr.to_string()
    } else {
        lines.concat()
    }
}

/// Remove every occurrence of the workspace path and trim.
pub fn sanitize(stderr: &str, workspace: &Path) -> String {
    let mut message = stderr.to_string();
    let mut paths = vec![workspace.to_string_lossy().into_owned()];
    if let Ok(canonical) = std::fs::canonicalize(workspace) {
        paths.push(canonical.to_string_lossy().into_owned());
    }
    // Longest first so a prefix never leaves a tail behind.
    paths.sort_by_key(|p| std::cmp::Reverse(p.len()));
    for path in paths.iter().filter(|p| !p.is_empty()) {
        message = message.replace(path.as_str(), "");
    }
    message.trim().to_string()
}
