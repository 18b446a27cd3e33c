//! forge
//!
//! Where commits are built and pull requests are opened.
//!
//! # Architecture
//!
//! The engine talks to two traits, never to a concrete host:
//!
//! - [`ObjectStore`]: create blobs, overlay trees and commits
//! - [`PullRequests`]: move branch refs, find/create/update pull requests,
//!   enable auto-merge
//!
//! # Modules
//!
//! - `traits`: The traits and request/response types
//! - [`github`]: GitHub implementation using REST and GraphQL APIs
//! - [`local`]: Object store over the local repository
//! - [`mock`]: In-memory implementation for deterministic testing
//!
//! # Example
//!
//! ```ignore
//! use stagepr::forge::github::GitHubForge;
//! use stagepr::forge::{CreatePullRequest, PullRequests};
//!
//! let forge = GitHubForge::new(Some(token), "owner", "repo");
//! let pr = forge.create_pull(CreatePullRequest {
//!     head: BranchName::new("bot/update")?,
//!     base: BranchName::new("main")?,
//!     title: "Update generated files".to_string(),
//!     body: None,
//! }).await?;
//!
//! println!("Created PR #{}: {}", pr.number, pr.url);
//! ```

pub mod github;
pub mod local;
pub mod mock;
mod traits;

pub use traits::*;
