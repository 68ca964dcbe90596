//! Produces the dependency files changed by an update.

use vendir_fs::{DependencyFile, ManifestFiles, NormalizedPath, VendirFile};
use vendir_resolve::PlannedUpdate;

use crate::applier::SyncApplier;
use crate::error::{Error, Result};

pub struct FileUpdater<'a> {
    files: &'a ManifestFiles,
    planned: &'a [PlannedUpdate],
    applier: &'a SyncApplier<'a>,
}

impl<'a> FileUpdater<'a> {
    pub fn new(
        files: &'a ManifestFiles,
        planned: &'a [PlannedUpdate],
        applier: &'a SyncApplier<'a>,
    ) -> Self {
        Self {
            files,
            planned,
            applier,
        }
    }

    /// Files whose content changed, manifest first.
    ///
    /// Only planned updates that need one are synced. Fails with
    /// [`Error::NoFilesChanged`] when the result equals the input.
    pub fn updated_dependency_files(&self) -> Result<Vec<DependencyFile>> {
        let lockfile = self.files.lock.as_ref().ok_or_else(|| vendir_fs::Error::FileNotFound {
            path: NormalizedPath::new(&self.files.manifest.directory)
                .join(VendirFile::Lock.as_str())
                .to_string(),
        })?;

        let needed: Vec<PlannedUpdate> = self
            .planned
            .iter()
            .filter(|p| p.update_needed)
            .cloned()
            .collect();
        if needed.is_empty() {
            tracing::info!("All dependencies are up to date");
            return Err(Error::NoFilesChanged);
        }

        let result = self.applier.apply(&self.files.manifest, lockfile, &needed)?;

        let mut updated = Vec::new();
        if result.manifest != self.files.manifest.content {
            updated.push(self.files.manifest.with_content(result.manifest));
        }
        if result.lockfile != lockfile.content {
            updated.push(lockfile.with_content(result.lockfile));
        }

        if updated.is_empty() {
            return Err(Error::NoFilesChanged);
        }
        for file in &updated {
            tracing::info!(file = %file.path(), "Updated dependency file");
        }
        Ok(updated)
    }
}
