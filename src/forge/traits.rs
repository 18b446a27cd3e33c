//! forge::traits
//!
//! Capabilities a remote (or local) host provides to the engine.
//!
//! # Design
//!
//! Two traits, because the engine uses them separately:
//!
//! - [`ObjectStore`] writes git objects: blobs, overlay trees, commits.
//!   The commit builder needs nothing else.
//! - [`PullRequests`] moves branch refs and reconciles pull requests.
//!
//! Both are async because implementations do network I/O. All methods
//! return `Result` and failures are propagated to the caller unchanged;
//! nothing here retries.
//!
//! # Example
//!
//! ```ignore
//! use stagepr::forge::{ObjectStore, ForgeError};
//!
//! async fn upload(store: &dyn ObjectStore) -> Result<(), ForgeError> {
//!     let blob = store.create_blob(b"hello\n").await?;
//!     println!("uploaded {}", blob.short(7));
//!     Ok(())
//! }
//! ```

use std::str::FromStr;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::tree::TreeOverlayEntry;
use crate::core::types::{BranchName, Oid, RefName};

/// Errors from forge operations.
///
/// These error types map to common failure modes when interacting
/// with remote hosting services like GitHub.
#[derive(Debug, Clone, Error)]
pub enum ForgeError {
    /// Authentication is required but not available.
    #[error("authentication required")]
    AuthRequired,

    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The local object database rejected an operation.
    #[error("repository error: {0}")]
    Repository(String),
}

/// Request to create a pull request.
#[derive(Debug, Clone)]
pub struct CreatePullRequest {
    /// Head branch (the branch with changes)
    pub head: BranchName,
    /// Base branch (the branch to merge into)
    pub base: BranchName,
    /// PR title
    pub title: String,
    /// PR body/description
    pub body: Option<String>,
}

/// Request to update the title and body of a pull request.
#[derive(Debug, Clone)]
pub struct UpdatePullRequest {
    /// PR number
    pub number: u64,
    /// New title
    pub title: String,
    /// New body
    pub body: Option<String>,
}

/// Pull request information returned from the forge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// PR URL (web URL for viewing)
    pub url: String,
    /// Head branch name
    pub head: String,
    /// Base branch name
    pub base: String,
    /// PR title
    pub title: String,
    /// PR body
    pub body: Option<String>,
    /// GraphQL node ID (for the auto-merge mutation)
    pub node_id: Option<String>,
}

/// Merge method used when auto-merge fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMethod {
    /// Create a merge commit
    Merge,
    /// Squash all commits and merge
    #[default]
    Squash,
    /// Rebase commits onto base branch
    Rebase,
}

impl MergeMethod {
    /// Name of the method in GitHub's GraphQL `PullRequestMergeMethod` enum.
    pub fn graphql_name(&self) -> &'static str {
        match self {
            MergeMethod::Merge => "MERGE",
            MergeMethod::Squash => "SQUASH",
            MergeMethod::Rebase => "REBASE",
        }
    }
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeMethod::Merge => write!(f, "merge"),
            MergeMethod::Squash => write!(f, "squash"),
            MergeMethod::Rebase => write!(f, "rebase"),
        }
    }
}

impl FromStr for MergeMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "merge" => Ok(MergeMethod::Merge),
            "squash" => Ok(MergeMethod::Squash),
            "rebase" => Ok(MergeMethod::Rebase),
            other => Err(format!(
                "unknown merge method '{}' (expected merge, squash or rebase)",
                other
            )),
        }
    }
}

/// Write access to a git object database.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; blob uploads run concurrently.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Get the store name for display.
    fn name(&self) -> &'static str;

    /// Store `content` as a blob and return its id.
    async fn create_blob(&self, content: &[u8]) -> Result<Oid, ForgeError>;

    /// Resolve a fully qualified ref to the commit it points at.
    ///
    /// # Errors
    ///
    /// `ForgeError::NotFound` if the ref does not exist.
    async fn resolve_ref(&self, refname: &RefName) -> Result<Oid, ForgeError>;

    /// Create a tree by applying `overlay` on top of the tree of `base`.
    ///
    /// `base` is the parent commit id. Overlay entries without an id remove
    /// their path.
    async fn create_tree(&self, base: &Oid, overlay: &[TreeOverlayEntry])
        -> Result<Oid, ForgeError>;

    /// Create a commit with a single parent. Does not move any ref.
    async fn create_commit(
        &self,
        parent: &Oid,
        tree: &Oid,
        message: &str,
    ) -> Result<Oid, ForgeError>;
}

/// Branch and pull request operations.
#[async_trait]
pub trait PullRequests: Send + Sync {
    /// Whether `refname` exists on the remote.
    async fn ref_exists(&self, refname: &RefName) -> Result<bool, ForgeError>;

    /// Create `refname` pointing at `oid`.
    async fn create_ref(&self, refname: &RefName, oid: &Oid) -> Result<(), ForgeError>;

    /// Move `refname` to `oid`. With `force`, non-fast-forward moves are allowed.
    async fn update_ref(&self, refname: &RefName, oid: &Oid, force: bool)
        -> Result<(), ForgeError>;

    /// Open pull requests from `head` into `base`.
    async fn list_open_pulls(
        &self,
        head: &BranchName,
        base: &BranchName,
    ) -> Result<Vec<PullRequest>, ForgeError>;

    /// Open a new pull request.
    async fn create_pull(&self, request: CreatePullRequest) -> Result<PullRequest, ForgeError>;

    /// Replace the title and body of an existing pull request.
    async fn update_pull(&self, request: UpdatePullRequest) -> Result<PullRequest, ForgeError>;

    /// Enable auto-merge on a pull request.
    async fn enable_auto_merge(
        &self,
        pull: &PullRequest,
        method: MergeMethod,
    ) -> Result<(), ForgeError>;
}
