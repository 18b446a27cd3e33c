//! engine::pipeline
//!
//! One full run: diff the working tree, build the commit, publish it.
//!
//! Guards run before anything is uploaded:
//!
//! 1. the base branch must exist locally
//! 2. the working tree must differ from the base
//! 3. an existing head branch is only touched when `upsert` is set

use tracing::{info, warn};

use super::commit::build_commit;
use super::diff::compute_diff_files;
use super::publish::{publish_with, PublishOutcome, PublishRequest};
use super::EngineError;
use crate::core::types::{BranchName, Oid, RefName};
use crate::forge::{MergeMethod, ObjectStore, PullRequests};
use crate::git::Git;

/// Everything a run needs besides the repository and the forge.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    /// Branch to create or update
    pub head: BranchName,
    /// Branch the pull request targets
    pub base: BranchName,
    /// Pull request title
    pub title: String,
    /// Pull request body
    pub body: Option<String>,
    /// Commit message
    pub message: String,
    /// Force-update the head branch if it already exists
    pub upsert: bool,
    /// Treat an unchanged working tree as success
    pub ignore_no_changes: bool,
    /// Enable auto-merge with this method after publishing
    pub auto_merge: Option<MergeMethod>,
    /// Maximum concurrent blob uploads
    pub concurrency: usize,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing to commit and `ignore_no_changes` was set.
    NoChanges,
    /// A commit was built and published.
    Published {
        commit: Oid,
        outcome: PublishOutcome,
        auto_merge: Option<MergeMethod>,
    },
}

/// Run the whole flow against `store` and `prs`.
///
/// `store` and `prs` are usually the same forge; they are separate so the
/// commit can be built in one place and published in another.
pub async fn submit(
    git: &Git,
    store: &dyn ObjectStore,
    prs: &dyn PullRequests,
    request: &SubmitRequest,
) -> Result<SubmitOutcome, EngineError> {
    let base_ref = RefName::for_branch(&request.base);
    let head_ref = RefName::for_branch(&request.head);

    if !git.ref_exists(base_ref.as_str()) {
        return Err(EngineError::BaseNotLocal(base_ref.to_string()));
    }

    let files = compute_diff_files(git, &base_ref)?;
    if files.is_empty() {
        if request.ignore_no_changes {
            warn!("no changes against {}, nothing to do", request.base);
            return Ok(SubmitOutcome::NoChanges);
        }
        return Err(EngineError::NoChanges(request.base.to_string()));
    }

    let head_exists = prs.ref_exists(&head_ref).await?;
    if head_exists && !request.upsert {
        return Err(EngineError::HeadExists(head_ref.to_string()));
    }

    let commit = build_commit(
        store,
        &base_ref,
        &files,
        &request.message,
        request.concurrency,
    )
    .await?;

    let outcome = publish_with(
        prs,
        &PublishRequest {
            head: request.head.clone(),
            base: request.base.clone(),
            commit: commit.clone(),
            title: request.title.clone(),
            body: request.body.clone(),
        },
        head_exists,
    )
    .await?;

    if let Some(method) = request.auto_merge {
        info!(number = outcome.pull().number, %method, "enable auto-merge");
        prs.enable_auto_merge(outcome.pull(), method).await?;
    }

    Ok(SubmitOutcome::Published {
        commit,
        outcome,
        auto_merge: request.auto_merge,
    })
}
