//! git2 access to the repositories vendored dependencies come from.
//!
//! [`RemoteRepository`] implements the resolver's
//! [`TagCatalog`](vendir_resolve::TagCatalog) and
//! [`CommitChecker`](vendir_resolve::CommitChecker) traits.

pub mod error;
pub mod remote;

pub use error::{Error, Result};
pub use remote::{RemoteRef, RemoteRepository, tags_from_refs};
