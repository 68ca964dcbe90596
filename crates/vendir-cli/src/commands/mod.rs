//! Command implementations for vendir-bot

pub mod check;
pub mod list;
pub mod update;

use std::path::Path;

use vendir_fs::{DirectorySource, LockRequirement, ManifestFiles, REQUIRED_FILES_MESSAGE, fetch_files};
use vendir_manifest::{DependencyRecord, FileParser};

use crate::config::BotConfig;
use crate::error::{CliError, Result};

pub use check::run_check;
pub use list::run_list;
pub use update::run_update;

/// Fetch the manifest pair from `dir`.
pub(crate) fn load_files(
    dir: &Path,
    config: &BotConfig,
    lock: LockRequirement,
) -> Result<ManifestFiles> {
    let source = DirectorySource::new(dir)?;
    tracing::debug!(root = %source.root().display(), "Reading dependency files");
    match fetch_files(&source, &config.fetch_options(lock)) {
        Err(vendir_fs::Error::FileNotFound { path }) if lock == LockRequirement::Required => Err(
            CliError::user(format!("{REQUIRED_FILES_MESSAGE}: {path} not found")),
        ),
        result => Ok(result?),
    }
}

pub(crate) fn parse_records(files: &ManifestFiles) -> Result<Vec<DependencyRecord>> {
    Ok(FileParser::new(files).parse()?)
}

/// Short form of a locked version: commit SHAs are cut to 12 characters.
pub(crate) fn short_version(version: Option<&str>) -> String {
    match version {
        Some(v) if vendir_resolve::looks_like_commit_sha(v) && v.len() > 12 => v[..12].to_string(),
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}
