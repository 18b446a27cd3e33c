//! engine
//!
//! Turns a working tree into a commit and a pull request.
//!
//! # Architecture
//!
//! ```text
//! snapshot -> list(snapshot), list(base) -> diff -> build_commit -> publish -> auto-merge
//! ```
//!
//! - [`diff`]: snapshot the working tree and classify changes against a base
//! - [`commit`]: upload blobs, overlay the base tree, create the commit
//! - [`publish`]: create or force-update the head branch and reconcile the PR
//! - [`pipeline`]: the whole flow with its guards (base exists, changes
//!   present, head branch policy)
//!
//! # Invariants
//!
//! - Every step fails fast and the error reaches the caller unchanged
//! - No branch moves before the commit is fully built
//! - An ambiguous pull request lookup is an error, never a guess

pub mod commit;
pub mod diff;
pub mod pipeline;
pub mod publish;

use std::io;

use thiserror::Error;

use crate::forge::ForgeError;
use crate::git::GitError;

pub use commit::build_commit;
pub use diff::compute_diff_files;
pub use pipeline::{submit, SubmitOutcome, SubmitRequest};
pub use publish::{publish, PublishOutcome, PublishRequest, PullLookup};

/// Errors from the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The base branch is not in the local repository.
    #[error("base {0:?} doesn't exist locally")]
    BaseNotLocal(String),

    /// A reference could not be resolved by the object store.
    #[error("reference {0} not found")]
    ReferenceNotFound(String),

    /// More than one open pull request matches head and base.
    #[error("multiple pull requests found for {head} into {base}: {numbers:?}")]
    AmbiguousPullRequest {
        head: String,
        base: String,
        numbers: Vec<u64>,
    },

    /// The head branch exists and updating it was not allowed.
    #[error("head branch {0} already exists")]
    HeadExists(String),

    /// The working tree has no changes against the named base.
    #[error("no file changed from {0}")]
    NoChanges(String),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Forge(#[from] ForgeError),

    #[error("failed to read working tree: {0}")]
    Io(#[from] io::Error),
}
