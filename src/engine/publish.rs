//! engine::publish
//!
//! Points the head branch at a built commit and reconciles its pull request.
//!
//! ```text
//! head missing: create ref -> create PR                      (BranchCreated)
//! head exists:  force-update ref -> list open PRs head/base
//!                 0 -> create PR                             (PullCreated)
//!                 1 -> update title/body                     (PullUpdated)
//!                 n -> AmbiguousPullRequest
//! ```

use tracing::{info, warn};

use super::EngineError;
use crate::core::types::{BranchName, Oid, RefName};
use crate::forge::{CreatePullRequest, PullRequest, PullRequests, UpdatePullRequest};

/// What to publish.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub head: BranchName,
    pub base: BranchName,
    pub commit: Oid,
    pub title: String,
    pub body: Option<String>,
}

/// How publishing ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The head branch was new; a pull request was opened for it.
    BranchCreated(PullRequest),
    /// The head branch was force-updated and no open pull request existed.
    PullCreated(PullRequest),
    /// The head branch was force-updated and its pull request rewritten.
    PullUpdated(PullRequest),
}

impl PublishOutcome {
    pub fn pull(&self) -> &PullRequest {
        match self {
            PublishOutcome::BranchCreated(pull)
            | PublishOutcome::PullCreated(pull)
            | PublishOutcome::PullUpdated(pull) => pull,
        }
    }
}

/// Result of looking up open pull requests for one head/base pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullLookup {
    NotFound,
    Found(PullRequest),
    Ambiguous(Vec<u64>),
}

impl PullLookup {
    pub fn from_pulls(mut pulls: Vec<PullRequest>) -> Self {
        match pulls.len() {
            0 => PullLookup::NotFound,
            1 => PullLookup::Found(pulls.remove(0)),
            _ => PullLookup::Ambiguous(pulls.iter().map(|p| p.number).collect()),
        }
    }
}

/// Publish `request.commit` on `request.head` and reconcile the pull request.
pub async fn publish(
    prs: &dyn PullRequests,
    request: &PublishRequest,
) -> Result<PublishOutcome, EngineError> {
    let head_ref = RefName::for_branch(&request.head);
    let exists = prs.ref_exists(&head_ref).await?;
    publish_with(prs, request, exists).await
}

/// Same as [`publish`] when the caller already knows whether the head exists.
pub(crate) async fn publish_with(
    prs: &dyn PullRequests,
    request: &PublishRequest,
    head_exists: bool,
) -> Result<PublishOutcome, EngineError> {
    let head_ref = RefName::for_branch(&request.head);

    if !head_exists {
        info!(commit = %request.commit.short(7), "create {}", head_ref);
        prs.create_ref(&head_ref, &request.commit).await?;
        let pull = create_pull(prs, request).await?;
        return Ok(PublishOutcome::BranchCreated(pull));
    }

    warn!(commit = %request.commit.short(7), "force-updating {}", head_ref);
    prs.update_ref(&head_ref, &request.commit, true).await?;

    let pulls = prs.list_open_pulls(&request.head, &request.base).await?;
    match PullLookup::from_pulls(pulls) {
        PullLookup::NotFound => {
            let pull = create_pull(prs, request).await?;
            Ok(PublishOutcome::PullCreated(pull))
        }
        PullLookup::Found(existing) => {
            info!(number = existing.number, "update pull request");
            let pull = prs
                .update_pull(UpdatePullRequest {
                    number: existing.number,
                    title: request.title.clone(),
                    body: request.body.clone(),
                })
                .await?;
            Ok(PublishOutcome::PullUpdated(pull))
        }
        PullLookup::Ambiguous(numbers) => Err(EngineError::AmbiguousPullRequest {
            head: request.head.to_string(),
            base: request.base.to_string(),
            numbers,
        }),
    }
}

async fn create_pull(
    prs: &dyn PullRequests,
    request: &PublishRequest,
) -> Result<PullRequest, EngineError> {
    info!("open pull request {} -> {}", request.head, request.base);
    let pull = prs
        .create_pull(CreatePullRequest {
            head: request.head.clone(),
            base: request.base.clone(),
            title: request.title.clone(),
            body: request.body.clone(),
        })
        .await?;
    info!(number = pull.number, url = %pull.url, "pull request opened");
    Ok(pull)
}
