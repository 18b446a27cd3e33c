//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to all Git operations in
//! stagepr. Snapshots, tree listings, worktree reads and local object writes
//! all flow through [`Git`], which returns strong types and normalizes
//! errors into typed failure categories.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::RefNotFound`]: Requested ref or revision does not exist
//! - [`GitError::ObjectNotFound`]: Object id is not in the object database
//! - [`GitError::Malformed`]: A tree record could not be understood
//!
//! # Example
//!
//! ```ignore
//! use stagepr::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! if let Some(snapshot) = git.snapshot()? {
//!     for entry in git.list_blobs(snapshot.as_str())? {
//!         println!("{}", entry);
//!     }
//! }
//! ```

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::diff::WorktreeReader;
use crate::core::tree::{self, TreeEntry, TreeError, TreeOverlayEntry};
use crate::core::types::{BranchName, FileMode, ObjectType, Oid, TypeError};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// Requested ref or revision does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Object not found in repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The OID that was not found
        oid: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Invalid ref name format.
    #[error("invalid ref name: {message}")]
    InvalidRefName {
        /// Description of the problem
        message: String,
    },

    /// A tree walk produced a record we do not understand.
    #[error(transparent)]
    Malformed(#[from] TreeError),

    /// Permission or filesystem error.
    #[error("repository access error: {message}")]
    AccessError {
        /// Description of the error
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => {
                if context.starts_with("refs/") || context.contains("ref") {
                    GitError::RefNotFound {
                        refname: context.to_string(),
                    }
                } else {
                    GitError::ObjectNotFound {
                        oid: context.to_string(),
                    }
                }
            }
            git2::ErrorCode::InvalidSpec => GitError::InvalidOid {
                oid: context.to_string(),
            },
            git2::ErrorCode::Locked => GitError::AccessError {
                message: format!("repository is locked: {}", err.message()),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }

    /// Like [`GitError::from_git2`], but any lookup failure is a missing revision.
    fn from_revparse(err: git2::Error, rev: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound
            | git2::ErrorCode::InvalidSpec
            | git2::ErrorCode::Ambiguous => GitError::RefNotFound {
                refname: rev.to_string(),
            },
            _ => GitError::from_git2(err, rev),
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => GitError::RefNotFound {
                refname: err.message().to_string(),
            },
            git2::ErrorCode::InvalidSpec => GitError::InvalidOid {
                oid: err.message().to_string(),
            },
            _ => GitError::Internal {
                message: err.message().to_string(),
            },
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
            TypeError::InvalidRefName(msg) => GitError::InvalidRefName { message: msg },
            TypeError::InvalidBranchName(msg) => GitError::InvalidRefName { message: msg },
            other => GitError::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// The Git interface.
///
/// Wraps a `git2::Repository` with a working directory.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover` to find the repository root,
    /// so `path` can be any directory within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Get direct access to the .git directory path.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Root of the working directory.
    pub fn work_dir(&self) -> Result<&Path, GitError> {
        self.repo.workdir().ok_or(GitError::BareRepo)
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// Capture the working directory as a tree object.
    ///
    /// Stages every change, untracked files and deletions included, honouring
    /// `.gitignore` (the equivalent of `git add -A`). If nothing differs from
    /// `HEAD` afterwards, returns `Ok(None)`. Otherwise writes the index as a
    /// tree and returns its id. The tree is not referenced by any ref or
    /// commit, and no tracked or untracked file is touched.
    ///
    /// Calling this twice without edits in between returns the same id.
    pub fn snapshot(&self) -> Result<Option<Oid>, GitError> {
        let mut index = self
            .repo
            .index()
            .map_err(|e| GitError::from_git2(e, "index"))?;

        index
            .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
            .map_err(|e| GitError::from_git2(e, "add all"))?;
        index
            .update_all(["*"], None)
            .map_err(|e| GitError::from_git2(e, "update all"))?;
        index
            .write()
            .map_err(|e| GitError::from_git2(e, "index write"))?;

        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);
        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(|e| GitError::from_git2(e, "status"))?;

        if statuses.is_empty() {
            debug!("worktree matches HEAD, no snapshot");
            return Ok(None);
        }

        let tree = index
            .write_tree()
            .map_err(|e| GitError::from_git2(e, "write tree"))?;
        debug!(tree = %tree, changed = statuses.len(), "snapshot written");

        Ok(Some(Oid::new(tree.to_string())?))
    }

    // =========================================================================
    // Tree Listing
    // =========================================================================

    /// List every entry reachable from `rev`, recursively.
    ///
    /// `rev` is anything that peels to a tree: a ref, a commit id or a tree
    /// id. Entries come in pre-order with full paths.
    ///
    /// # Errors
    ///
    /// - [`GitError::RefNotFound`] if `rev` does not resolve
    /// - [`GitError::Malformed`] if an entry has an unknown mode or type,
    ///   or a non-UTF-8 path
    pub fn list_tree(&self, rev: &str) -> Result<Vec<TreeEntry>, GitError> {
        let tree = self
            .repo
            .revparse_single(rev)
            .and_then(|object| object.peel_to_tree())
            .map_err(|e| GitError::from_revparse(e, rev))?;

        let mut entries = Vec::new();
        let mut failure: Option<TreeError> = None;

        let walked = tree.walk(git2::TreeWalkMode::PreOrder, |root, entry| {
            let mut path = root.as_bytes().to_vec();
            path.extend_from_slice(entry.name_bytes());

            let object_type = match entry.kind() {
                Some(git2::ObjectType::Blob) => Some(ObjectType::Blob),
                Some(git2::ObjectType::Tree) => Some(ObjectType::Tree),
                Some(git2::ObjectType::Commit) => Some(ObjectType::Commit),
                _ => None,
            };
            let raw_mode = u32::try_from(entry.filemode()).unwrap_or(0);

            match TreeEntry::from_raw(raw_mode, object_type, &entry.id().to_string(), &path) {
                Ok(parsed) => {
                    entries.push(parsed);
                    git2::TreeWalkResult::Ok
                }
                Err(e) => {
                    failure = Some(e);
                    git2::TreeWalkResult::Abort
                }
            }
        });

        if let Some(e) = failure {
            return Err(e.into());
        }
        walked.map_err(|e| GitError::from_git2(e, rev))?;

        debug!(rev, entries = entries.len(), "listed tree");
        Ok(entries)
    }

    /// List only the blob entries (files and symlinks) of `rev`.
    pub fn list_blobs(&self, rev: &str) -> Result<Vec<TreeEntry>, GitError> {
        Ok(tree::blobs_only(self.list_tree(rev)?))
    }

    // =========================================================================
    // Ref Resolution
    // =========================================================================

    /// Resolve a ref to its target commit.
    ///
    /// # Errors
    ///
    /// - [`GitError::RefNotFound`] if the ref doesn't exist
    pub fn resolve_ref(&self, refname: &str) -> Result<Oid, GitError> {
        let reference = self
            .repo
            .find_reference(refname)
            .map_err(|e| GitError::from_git2(e, refname))?;

        let oid = reference
            .peel_to_commit()
            .map_err(|e| GitError::from_git2(e, refname))?
            .id();

        Oid::new(oid.to_string()).map_err(|e| e.into())
    }

    /// Check if a ref exists.
    pub fn ref_exists(&self, refname: &str) -> bool {
        self.repo.find_reference(refname).is_ok()
    }

    /// Get the current branch name, if on a branch.
    ///
    /// Returns `None` if HEAD is detached or unborn.
    pub fn current_branch(&self) -> Result<Option<BranchName>, GitError> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            if let Some(name) = head.shorthand() {
                return Ok(Some(BranchName::new(name)?));
            }
        }

        Ok(None)
    }

    // =========================================================================
    // Object Writes
    // =========================================================================

    /// Write content as a blob and return its OID.
    pub fn write_blob(&self, content: &[u8]) -> Result<Oid, GitError> {
        let oid = self.repo.blob(content).map_err(|e| GitError::Internal {
            message: e.message().to_string(),
        })?;

        Oid::new(oid.to_string()).map_err(|e| e.into())
    }

    /// Compute the blob id of `content` without writing it anywhere.
    pub fn hash_blob(content: &[u8]) -> Result<Oid, GitError> {
        let oid = git2::Oid::hash_object(git2::ObjectType::Blob, content)?;
        Oid::new(oid.to_string()).map_err(|e| e.into())
    }

    /// Write a tree that applies `overlay` on top of the tree of `base`.
    ///
    /// `base` may name a commit or a tree. Entries with an id are added or
    /// replaced; entries without one are removed. Directories left empty
    /// disappear.
    ///
    /// Removals are applied in a pass of their own before any upsert, so a
    /// path may switch between file and directory within one overlay.
    pub fn build_tree(&self, base: &Oid, overlay: &[TreeOverlayEntry]) -> Result<Oid, GitError> {
        let base_tree = self
            .repo
            .find_object(to_git2(base)?, None)
            .and_then(|object| object.peel_to_tree())
            .map_err(|e| GitError::from_git2(e, base.as_str()))?;

        let (upserts, removals): (Vec<_>, Vec<_>) =
            overlay.iter().partition(|entry| entry.oid.is_some());

        let pruned = if removals.is_empty() {
            base_tree
        } else {
            let mut builder = git2::build::TreeUpdateBuilder::new();
            for entry in &removals {
                builder.remove(entry.path.as_str());
            }
            let oid = builder
                .create_updated(&self.repo, &base_tree)
                .map_err(|e| GitError::from_git2(e, "tree update"))?;
            self.repo.find_tree(oid)?
        };

        let mut builder = git2::build::TreeUpdateBuilder::new();
        for entry in &upserts {
            if let Some(oid) = &entry.oid {
                builder.upsert(entry.path.as_str(), to_git2(oid)?, git2_mode(entry.mode));
            }
        }
        let tree = builder
            .create_updated(&self.repo, &pruned)
            .map_err(|e| GitError::from_git2(e, "tree update"))?;

        Oid::new(tree.to_string()).map_err(|e| e.into())
    }

    /// Write a commit with a single parent. No ref is moved.
    pub fn write_commit(&self, parent: &Oid, tree: &Oid, message: &str) -> Result<Oid, GitError> {
        let parent_commit = self
            .repo
            .find_commit(to_git2(parent)?)
            .map_err(|e| GitError::from_git2(e, parent.as_str()))?;
        let tree_object = self
            .repo
            .find_tree(to_git2(tree)?)
            .map_err(|e| GitError::from_git2(e, tree.as_str()))?;

        let signature = self
            .repo
            .signature()
            .or_else(|_| git2::Signature::now("stagepr", "stagepr@localhost"))?;

        let oid = self
            .repo
            .commit(
                None,
                &signature,
                &signature,
                message,
                &tree_object,
                &[&parent_commit],
            )
            .map_err(|e| GitError::from_git2(e, "commit"))?;

        Oid::new(oid.to_string()).map_err(|e| e.into())
    }

    // =========================================================================
    // Remote Operations
    // =========================================================================

    /// Get the URL for a remote.
    ///
    /// Returns `None` if the remote doesn't exist.
    pub fn remote_url(&self, name: &str) -> Result<Option<String>, GitError> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(String::from)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::Internal {
                message: e.message().to_string(),
            }),
        }
    }

    /// Parse a remote URL into owner/repo.
    ///
    /// Handles HTTPS, scp-style SSH and `ssh://` URLs on any host, so GitHub
    /// Enterprise remotes work too:
    /// - `https://github.com/owner/repo.git` -> `Some(("owner", "repo"))`
    /// - `git@github.example.com:owner/repo` -> `Some(("owner", "repo"))`
    ///
    /// # Example
    ///
    /// ```
    /// use stagepr::git::Git;
    ///
    /// assert_eq!(
    ///     Git::parse_remote("git@github.com:owner/repo.git"),
    ///     Some(("owner".to_string(), "repo".to_string()))
    /// );
    /// assert_eq!(Git::parse_remote("not-a-url"), None);
    /// ```
    pub fn parse_remote(url: &str) -> Option<(String, String)> {
        let path = if let Some((_, rest)) = url.split_once("://") {
            // https://host/owner/repo, ssh://git@host/owner/repo
            rest.split_once('/')?.1
        } else {
            // git@host:owner/repo
            let (host, rest) = url.split_once(':')?;
            if host.contains('/') {
                return None;
            }
            rest
        };

        Self::parse_owner_repo(path)
    }

    /// Parse "owner/repo.git" or "owner/repo" into (owner, repo).
    fn parse_owner_repo(path: &str) -> Option<(String, String)> {
        let path = path.trim_end_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        let (owner, repo) = path.split_once('/')?;

        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }

        Some((owner.to_string(), repo.to_string()))
    }
}

impl WorktreeReader for Git {
    fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.worktree_path(path)?)
    }

    fn read_symlink(&self, path: &str) -> io::Result<Vec<u8>> {
        let target = std::fs::read_link(self.worktree_path(path)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::ffi::OsStrExt;
            Ok(target.as_os_str().as_bytes().to_vec())
        }
        #[cfg(not(unix))]
        {
            Ok(target.to_string_lossy().replace('\\', "/").into_bytes())
        }
    }
}

impl Git {
    fn worktree_path(&self, path: &str) -> io::Result<PathBuf> {
        let root = self
            .repo
            .workdir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "bare repository"))?;
        Ok(root.join(path))
    }
}

fn to_git2(oid: &Oid) -> Result<git2::Oid, GitError> {
    git2::Oid::from_str(oid.as_str()).map_err(|e| GitError::from_git2(e, oid.as_str()))
}

fn git2_mode(mode: FileMode) -> git2::FileMode {
    match mode {
        FileMode::Regular => git2::FileMode::Blob,
        FileMode::Executable => git2::FileMode::BlobExecutable,
        FileMode::Directory => git2::FileMode::Tree,
        FileMode::Gitlink => git2::FileMode::Commit,
        FileMode::Symlink => git2::FileMode::Link,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod git_error {
        use super::*;

        #[test]
        fn malformed_wraps_tree_error() {
            let err: GitError = "garbage".parse::<TreeEntry>().unwrap_err().into();
            assert!(matches!(err, GitError::Malformed(_)));
            assert!(err.to_string().contains("garbage"));
        }

        #[test]
        fn revparse_failures_are_missing_refs() {
            let err = GitError::from_revparse(
                git2::Error::new(
                    git2::ErrorCode::NotFound,
                    git2::ErrorClass::Reference,
                    "not found",
                ),
                "deadbeef",
            );
            assert!(matches!(err, GitError::RefNotFound { refname } if refname == "deadbeef"));
        }

        #[test]
        fn type_errors_map() {
            let err: GitError = TypeError::InvalidOid("xyz".into()).into();
            assert!(matches!(err, GitError::InvalidOid { .. }));

            let err: GitError = TypeError::InvalidMode("1".into()).into();
            assert!(matches!(err, GitError::Internal { .. }));
        }
    }

    mod hash_blob {
        use super::*;

        #[test]
        fn matches_git_hash_object() {
            // printf 'test' | git hash-object --stdin
            assert_eq!(
                Git::hash_blob(b"test").unwrap().as_str(),
                "30d74d258442c7c65512eafab474568dd706c430"
            );
            // the empty blob
            assert_eq!(
                Git::hash_blob(b"").unwrap().as_str(),
                "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391"
            );
        }
    }

    mod parse_remote {
        use super::*;

        fn pair(owner: &str, repo: &str) -> Option<(String, String)> {
            Some((owner.to_string(), repo.to_string()))
        }

        #[test]
        fn https_url() {
            assert_eq!(
                Git::parse_remote("https://github.com/owner/repo.git"),
                pair("owner", "repo")
            );
            assert_eq!(
                Git::parse_remote("https://github.com/owner/repo"),
                pair("owner", "repo")
            );
        }

        #[test]
        fn scp_style_ssh_url() {
            assert_eq!(
                Git::parse_remote("git@github.com:owner/repo.git"),
                pair("owner", "repo")
            );
        }

        #[test]
        fn ssh_scheme_url() {
            assert_eq!(
                Git::parse_remote("ssh://git@github.com/owner/repo.git"),
                pair("owner", "repo")
            );
        }

        #[test]
        fn enterprise_host() {
            assert_eq!(
                Git::parse_remote("https://github.example.com/team/service"),
                pair("team", "service")
            );
        }

        #[test]
        fn malformed_returns_none() {
            assert_eq!(Git::parse_remote("not-a-url"), None);
            assert_eq!(Git::parse_remote("https://github.com/"), None);
            assert_eq!(Git::parse_remote("https://github.com/owner"), None);
            assert_eq!(Git::parse_remote("/srv/git/a/b/c"), None);
        }
    }
}
