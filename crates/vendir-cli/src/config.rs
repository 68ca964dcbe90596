//! Settings loaded from `vendir-bot.toml`

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vendir_fs::{ConfigStore, FetchOptions, LockRequirement, VendirFile};
use vendir_sync::{SyncCommand, SyncOptions, applier::DEFAULT_MAX_RETRIES};

use crate::error::{CliError, Result};

/// Settings file looked up in the target directory.
pub const FILE_NAME: &str = "vendir-bot.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub files: FilesConfig,
    pub sync: SyncConfig,
}

/// Names of the manifest and lockfile inside the target directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub manifest: String,
    pub lockfile: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            manifest: VendirFile::Manifest.as_str().to_string(),
            lockfile: VendirFile::Lock.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Program and arguments, e.g. `["vendir", "sync"]`.
    pub command: Vec<String>,
    pub max_retries: u32,
    pub env: BTreeMap<String, String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            command: vec!["vendir".into(), "sync".into()],
            max_retries: DEFAULT_MAX_RETRIES,
            env: BTreeMap::new(),
        }
    }
}

impl BotConfig {
    /// Load an explicit settings file, or `vendir-bot.toml` from `dir` when
    /// it exists.
    pub fn load(dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let store = ConfigStore::new();
        let config = match explicit {
            Some(path) => store.load(path)?,
            None => store.load_or_default(&dir.join(FILE_NAME))?,
        };
        tracing::debug!(?config, "Loaded settings");
        Ok(config)
    }

    pub fn fetch_options(&self, lock: LockRequirement) -> FetchOptions {
        FetchOptions {
            manifest_name: self.files.manifest.clone(),
            lockfile_name: self.files.lockfile.clone(),
            lock,
        }
    }

    pub fn sync_options(&self) -> Result<SyncOptions> {
        let command = SyncCommand::from_argv(&self.sync.command)
            .ok_or_else(|| CliError::user("sync.command must name a program"))?;
        Ok(SyncOptions {
            command,
            max_retries: self.sync.max_retries,
            env: self.sync.env.clone(),
        })
    }
}
