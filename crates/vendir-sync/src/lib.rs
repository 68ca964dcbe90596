//! Applies planned updates through the external `vendir sync` tool.
//!
//! [`SyncApplier`] writes the manifest pair into a scratch workspace, runs
//! the tool through a [`CommandRunner`], classifies failures and retries the
//! transient ones. [`FileUpdater`] wraps it and reports which files changed.

pub mod applier;
pub mod classify;
pub mod error;
pub mod runner;
pub mod updater;

pub use applier::{SyncApplier, SyncOptions, SyncResult};
pub use classify::{SyncFailure, classify_stderr};
pub use error::{Error, Result};
pub use runner::{CommandOutput, CommandRunner, ProcessRunner, SyncCommand};
pub use updater::FileUpdater;
