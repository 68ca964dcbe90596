//! Shared test utilities for the vendir-bot workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: `vendir.yml` / `vendir.lock.yml` documents
//! - [`git`]: local upstream repositories with commits and tags
//! - [`workspace`]: [`TestWorkspace`](workspace::TestWorkspace), a temp
//!   directory holding a manifest pair

pub mod fixtures;
pub mod git;
pub mod workspace;
