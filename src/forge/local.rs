//! forge::local
//!
//! [`ObjectStore`] over the local repository's object database.
//!
//! Builds the same blob, tree and commit graph the GitHub store builds, but
//! through [`Git`]. Nothing is pushed and no ref moves. Used by
//! `stagepr commit` to preview a commit, and by tests that check a built
//! commit against the working tree.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::traits::{ForgeError, ObjectStore};
use crate::core::tree::TreeOverlayEntry;
use crate::core::types::{Oid, RefName};
use crate::git::{Git, GitError};

/// Local object store.
///
/// `git2::Repository` is not `Sync`, so access is serialized.
#[derive(Debug)]
pub struct LocalStore {
    git: Mutex<Git>,
}

impl LocalStore {
    pub fn new(git: Git) -> Self {
        Self {
            git: Mutex::new(git),
        }
    }

    /// Give the repository handle back.
    pub fn into_inner(self) -> Git {
        self.git.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn git(&self) -> MutexGuard<'_, Git> {
        self.git.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<GitError> for ForgeError {
    fn from(err: GitError) -> Self {
        match err {
            GitError::RefNotFound { refname } => ForgeError::NotFound(refname),
            GitError::ObjectNotFound { oid } => ForgeError::NotFound(oid),
            other => ForgeError::Repository(other.to_string()),
        }
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn create_blob(&self, content: &[u8]) -> Result<Oid, ForgeError> {
        Ok(self.git().write_blob(content)?)
    }

    async fn resolve_ref(&self, refname: &RefName) -> Result<Oid, ForgeError> {
        Ok(self.git().resolve_ref(refname.as_str())?)
    }

    async fn create_tree(
        &self,
        base: &Oid,
        overlay: &[TreeOverlayEntry],
    ) -> Result<Oid, ForgeError> {
        Ok(self.git().build_tree(base, overlay)?)
    }

    async fn create_commit(
        &self,
        parent: &Oid,
        tree: &Oid,
        message: &str,
    ) -> Result<Oid, ForgeError> {
        Ok(self.git().write_commit(parent, tree, message)?)
    }
}
