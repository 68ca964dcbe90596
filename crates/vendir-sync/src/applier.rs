//! Materializes planned updates and re-derives the lockfile.
//!
//! Each attempt gets a fresh scratch directory that is removed when the
//! attempt ends, whether it succeeded or not.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::TempDir;
use vendir_fs::{DependencyFile, io};
use vendir_manifest::{RefUpdate, rewrite_git_refs};
use vendir_resolve::PlannedUpdate;

use crate::classify::{SyncFailure, classify_stderr};
use crate::error::{Error, Result};
use crate::runner::{CommandRunner, SyncCommand};

/// Retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncOptions {
    pub command: SyncCommand,
    pub max_retries: u32,
    /// Extra environment for the tool, merged over `command.env`.
    pub env: BTreeMap<String, String>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            command: SyncCommand::default(),
            max_retries: DEFAULT_MAX_RETRIES,
            env: BTreeMap::new(),
        }
    }
}

impl SyncOptions {
    /// The command to run, with `env` applied.
    pub fn effective_command(&self) -> SyncCommand {
        let mut command = self.command.clone();
        command
            .env
            .extend(self.env.iter().map(|(k, v)| (k.clone(), v.clone())));
        command
    }
}

/// Manifest and lockfile as the sync tool left them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    pub manifest: String,
    pub lockfile: String,
    pub attempts: u32,
}

pub struct SyncApplier<'a> {
    runner: &'a dyn CommandRunner,
    options: SyncOptions,
}

impl<'a> SyncApplier<'a> {
    pub fn new(runner: &'a dyn CommandRunner, options: SyncOptions) -> Self {
        Self { runner, options }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Rewrite pinned refs, run the sync tool and return the regenerated
    /// files.
    ///
    /// A transient failure restarts the whole attempt from a new workspace,
    /// up to `max_retries` times, after which the last error is returned.
    pub fn apply(
        &self,
        manifest: &DependencyFile,
        lockfile: &DependencyFile,
        planned: &[PlannedUpdate],
    ) -> Result<SyncResult> {
        let updates: Vec<RefUpdate> = planned.iter().filter_map(PlannedUpdate::ref_update).collect();
        let manifest_content = rewrite_git_refs(manifest, &updates)?;
        let command = self.options.effective_command();

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.attempt(&command, manifest, &manifest_content, lockfile, planned) {
                Ok((manifest, lockfile)) => {
                    tracing::debug!(attempts, "Sync succeeded");
                    return Ok(SyncResult {
                        manifest,
                        lockfile,
                        attempts,
                    });
                }
                Err(e) if e.is_retryable() && attempts <= self.options.max_retries => {
                    tracing::warn!(
                        attempt = attempts,
                        max_retries = self.options.max_retries,
                        error = %e,
                        "Sync failed, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn attempt(
        &self,
        command: &SyncCommand,
        manifest: &DependencyFile,
        manifest_content: &str,
        lockfile: &DependencyFile,
        planned: &[PlannedUpdate],
    ) -> Result<(String, String)> {
        let workspace = TempDir::new()?;
        let root = workspace.path();

        io::write_text(&root.join(&manifest.name), manifest_content)?;
        io::write_text(&root.join(&lockfile.name), &lockfile.content)?;
        for update in planned {
            match update.directory.relative_path() {
                Some(relative) => io::ensure_dir(&root.join(relative))?,
                None => tracing::warn!(
                    dependency = %update.name,
                    "Skipping directory outside the workspace"
                ),
            }
        }

        tracing::debug!(command = %command.display(), "Running sync tool");
        let output = self.runner.run(command, root)?;
        if !output.success() {
            self.check_failure(&output.stderr, root, manifest)?;
        }

        Ok((
            io::read_text(&root.join(&manifest.name))?,
            io::read_text(&root.join(&lockfile.name))?,
        ))
    }

    fn check_failure(&self, stderr: &str, workspace: &Path, manifest: &DependencyFile) -> Result<()> {
        match classify_stderr(stderr, workspace) {
            SyncFailure::GitError(message) => Err(Error::NotResolvable { message }),
            SyncFailure::ManualSyncMove => {
                tracing::warn!("Ignoring vendir warning about moving a manual directory");
                Ok(())
            }
            SyncFailure::Other(message) => Err(Error::NotParseable {
                file: manifest.path().to_string(),
                message,
            }),
        }
    }
}
