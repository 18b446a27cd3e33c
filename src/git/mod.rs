//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. All repository reads and writes
//! flow through this interface. No other module should import `git2`, and
//! nothing shells out to the git CLI.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Working-directory snapshots (stage everything, write the index as a tree)
//! - Recursive tree listings
//! - Worktree content reads for changed paths ([`crate::core::diff::WorktreeReader`])
//! - Local object writes (blob, overlay tree, commit) without moving refs
//! - Remote URL parsing
//!
//! # Invariants
//!
//! - No other module calls git2 directly
//! - All operations return strong types (Oid, BranchName, TreeEntry)
//! - Snapshots never create commits or move refs
//!
//! # Example
//!
//! ```ignore
//! use stagepr::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let base = git.list_blobs("refs/heads/main")?;
//! ```

mod interface;

pub use interface::{Git, GitError};
