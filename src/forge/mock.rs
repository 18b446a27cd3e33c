//! forge::mock
//!
//! Mock forge implementation for deterministic testing.
//!
//! # Design
//!
//! The mock forge implements both [`ObjectStore`] and [`PullRequests`] in
//! memory. It keeps a small object database (blobs, flattened trees,
//! commits), a ref table and a pull request table, records every call, and
//! can be configured to fail a chosen operation.
//!
//! Blob ids are real git blob ids, so a mock commit can be compared against
//! a local listing. Tree and commit ids are deterministic digests of their
//! content, stable across runs.
//!
//! # Example
//!
//! ```ignore
//! use stagepr::forge::mock::MockForge;
//! use stagepr::forge::ObjectStore;
//!
//! let forge = MockForge::new();
//! let base = forge.seed_branch("main", &[("test", FileMode::Regular, "test")])?;
//! let blob = forge.create_blob(b"hello").await?;
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::traits::{
    CreatePullRequest, ForgeError, MergeMethod, ObjectStore, PullRequest, PullRequests,
    UpdatePullRequest,
};
use crate::core::tree::{TreeEntry, TreeOverlayEntry};
use crate::core::types::{BranchName, FileMode, ObjectType, Oid, RefName};
use crate::git::Git;

/// Mock forge for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockForge {
    inner: Arc<Mutex<MockForgeInner>>,
}

/// A commit stored by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCommit {
    pub parents: Vec<Oid>,
    pub tree: Oid,
    pub message: String,
}

type FlatTree = BTreeMap<String, (FileMode, Oid)>;

#[derive(Debug, Default)]
struct MockForgeInner {
    blobs: HashMap<Oid, Vec<u8>>,
    trees: HashMap<Oid, FlatTree>,
    commits: HashMap<Oid, MockCommit>,
    refs: HashMap<String, Oid>,
    pulls: BTreeMap<u64, PullRequest>,
    auto_merge: HashMap<u64, MergeMethod>,
    fail_on: Option<FailOn>,
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    CreateBlob(ForgeError),
    ResolveRef(ForgeError),
    CreateTree(ForgeError),
    CreateCommit(ForgeError),
    RefExists(ForgeError),
    CreateRef(ForgeError),
    UpdateRef(ForgeError),
    ListOpenPulls(ForgeError),
    CreatePull(ForgeError),
    UpdatePull(ForgeError),
    EnableAutoMerge(ForgeError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    CreateBlob {
        size: usize,
    },
    ResolveRef {
        refname: String,
    },
    CreateTree {
        base: Oid,
        overlay: Vec<TreeOverlayEntry>,
    },
    CreateCommit {
        parent: Oid,
        tree: Oid,
        message: String,
    },
    RefExists {
        refname: String,
    },
    CreateRef {
        refname: String,
        oid: Oid,
    },
    UpdateRef {
        refname: String,
        oid: Oid,
        force: bool,
    },
    ListOpenPulls {
        head: String,
        base: String,
    },
    CreatePull {
        head: String,
        base: String,
        title: String,
    },
    UpdatePull {
        number: u64,
        title: String,
    },
    EnableAutoMerge {
        number: u64,
        method: MergeMethod,
    },
}

impl MockOperation {
    /// Short operation name, matching the trait method.
    pub fn name(&self) -> &'static str {
        match self {
            MockOperation::CreateBlob { .. } => "create_blob",
            MockOperation::ResolveRef { .. } => "resolve_ref",
            MockOperation::CreateTree { .. } => "create_tree",
            MockOperation::CreateCommit { .. } => "create_commit",
            MockOperation::RefExists { .. } => "ref_exists",
            MockOperation::CreateRef { .. } => "create_ref",
            MockOperation::UpdateRef { .. } => "update_ref",
            MockOperation::ListOpenPulls { .. } => "list_open_pulls",
            MockOperation::CreatePull { .. } => "create_pull",
            MockOperation::UpdatePull { .. } => "update_pull",
            MockOperation::EnableAutoMerge { .. } => "enable_auto_merge",
        }
    }
}

fn unprocessable(message: impl Into<String>) -> ForgeError {
    ForgeError::ApiError {
        status: 422,
        message: message.into(),
    }
}

/// Existing path that keeps `path` from being added to a flat tree: a blob
/// at one of its parent directories, or a blob nested below `path` itself.
fn path_conflict(tree: &FlatTree, path: &str) -> Option<String> {
    let parent = path
        .match_indices('/')
        .map(|(i, _)| &path[..i])
        .find(|dir| tree.contains_key(*dir));
    if let Some(dir) = parent {
        return Some(dir.to_string());
    }

    let prefix = format!("{}/", path);
    tree.range(prefix.clone()..)
        .next()
        .filter(|(existing, _)| existing.starts_with(&prefix))
        .map(|(existing, _)| existing.clone())
}

fn digest(content: &[u8]) -> Result<Oid, ForgeError> {
    Git::hash_blob(content).map_err(|e| ForgeError::Repository(e.to_string()))
}

impl MockForge {
    /// Create a new empty mock forge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock to fail on a specific operation.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.state().fail_on = Some(fail_on);
        self
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        self.state().fail_on = None;
    }

    fn state(&self) -> MutexGuard<'_, MockForgeInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Seeding and inspection
    // =========================================================================

    /// Create `refs/heads/<branch>` at a root commit holding `files`.
    ///
    /// Returns the commit id.
    pub fn seed_branch(
        &self,
        branch: &str,
        files: &[(&str, FileMode, &str)],
    ) -> Result<Oid, ForgeError> {
        let mut state = self.state();

        let mut tree = FlatTree::new();
        for (path, mode, content) in files {
            let oid = digest(content.as_bytes())?;
            state.blobs.insert(oid.clone(), content.as_bytes().to_vec());
            tree.insert(path.to_string(), (*mode, oid));
        }
        let tree_oid = state.store_tree(tree)?;
        let commit = state.store_commit(Vec::new(), tree_oid, format!("seed {}", branch))?;
        state.refs.insert(format!("refs/heads/{}", branch), commit.clone());

        Ok(commit)
    }

    /// Add a pull request as if it had been opened elsewhere.
    ///
    /// Unlike [`PullRequests::create_pull`], duplicates for the same head and
    /// base are allowed.
    pub fn insert_pull(&self, head: &str, base: &str, title: &str) -> PullRequest {
        let mut state = self.state();
        let number = state.next_pull_number();
        let pull = PullRequest {
            number,
            url: format!("https://github.com/mock/repo/pull/{}", number),
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            body: None,
            node_id: Some(format!("PR_{}", number)),
        };
        state.pulls.insert(number, pull.clone());
        pull
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.state().operations.clone()
    }

    /// Names of the recorded operations, in call order.
    pub fn operation_names(&self) -> Vec<&'static str> {
        self.state().operations.iter().map(MockOperation::name).collect()
    }

    /// Clear recorded operations.
    pub fn clear_operations(&self) {
        self.state().operations.clear();
    }

    /// Current target of a ref.
    pub fn ref_target(&self, refname: &str) -> Option<Oid> {
        self.state().refs.get(refname).cloned()
    }

    /// Stored blob content.
    pub fn blob(&self, oid: &Oid) -> Option<Vec<u8>> {
        self.state().blobs.get(oid).cloned()
    }

    /// Stored commit.
    pub fn commit(&self, oid: &Oid) -> Option<MockCommit> {
        self.state().commits.get(oid).cloned()
    }

    /// Blob listing of a commit's tree.
    ///
    /// Byte order of full paths is git tree order for a recursive blob
    /// listing, so this matches `Git::list_blobs`.
    pub fn list_commit(&self, commit: &Oid) -> Option<Vec<TreeEntry>> {
        let state = self.state();
        let tree = state.commits.get(commit)?.tree.clone();
        let entries = state.trees.get(&tree)?;
        Some(
            entries
                .iter()
                .map(|(path, (mode, oid))| TreeEntry {
                    path: path.clone(),
                    mode: *mode,
                    object_type: ObjectType::Blob,
                    oid: oid.clone(),
                })
                .collect(),
        )
    }

    /// All pull requests, ordered by number.
    pub fn pulls(&self) -> Vec<PullRequest> {
        self.state().pulls.values().cloned().collect()
    }

    /// Merge method auto-merge was enabled with, if any.
    pub fn auto_merge(&self, number: u64) -> Option<MergeMethod> {
        self.state().auto_merge.get(&number).copied()
    }

    /// Record an operation and return the configured failure for it, if any.
    fn enter(&self, op: MockOperation) -> Result<(), ForgeError> {
        let mut state = self.state();
        let failure = match (&state.fail_on, &op) {
            (Some(FailOn::CreateBlob(e)), MockOperation::CreateBlob { .. })
            | (Some(FailOn::ResolveRef(e)), MockOperation::ResolveRef { .. })
            | (Some(FailOn::CreateTree(e)), MockOperation::CreateTree { .. })
            | (Some(FailOn::CreateCommit(e)), MockOperation::CreateCommit { .. })
            | (Some(FailOn::RefExists(e)), MockOperation::RefExists { .. })
            | (Some(FailOn::CreateRef(e)), MockOperation::CreateRef { .. })
            | (Some(FailOn::UpdateRef(e)), MockOperation::UpdateRef { .. })
            | (Some(FailOn::ListOpenPulls(e)), MockOperation::ListOpenPulls { .. })
            | (Some(FailOn::CreatePull(e)), MockOperation::CreatePull { .. })
            | (Some(FailOn::UpdatePull(e)), MockOperation::UpdatePull { .. })
            | (Some(FailOn::EnableAutoMerge(e)), MockOperation::EnableAutoMerge { .. }) => {
                Some(e.clone())
            }
            _ => None,
        };
        state.operations.push(op);

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl MockForgeInner {
    fn next_pull_number(&self) -> u64 {
        self.pulls.keys().next_back().map_or(1, |n| n + 1)
    }

    fn store_tree(&mut self, tree: FlatTree) -> Result<Oid, ForgeError> {
        let mut listing = Vec::from(&b"tree\n"[..]);
        for (path, (mode, oid)) in &tree {
            listing.extend_from_slice(format!("{} {}\t{}\0", mode, oid, path).as_bytes());
        }
        let oid = digest(&listing)?;
        self.trees.insert(oid.clone(), tree);
        Ok(oid)
    }

    fn store_commit(
        &mut self,
        parents: Vec<Oid>,
        tree: Oid,
        message: String,
    ) -> Result<Oid, ForgeError> {
        let mut raw = format!("commit\ntree {}\n", tree);
        for parent in &parents {
            raw.push_str(&format!("parent {}\n", parent));
        }
        raw.push('\n');
        raw.push_str(&message);

        let oid = digest(raw.as_bytes())?;
        self.commits.insert(
            oid.clone(),
            MockCommit {
                parents,
                tree,
                message,
            },
        );
        Ok(oid)
    }

    /// Whether `ancestor` is reachable from `descendant` through first parents.
    fn is_ancestor(&self, ancestor: &Oid, descendant: &Oid) -> bool {
        let mut current = Some(descendant);
        while let Some(oid) = current {
            if oid == ancestor {
                return true;
            }
            current = self.commits.get(oid).and_then(|c| c.parents.first());
        }
        false
    }
}

#[async_trait]
impl ObjectStore for MockForge {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn create_blob(&self, content: &[u8]) -> Result<Oid, ForgeError> {
        self.enter(MockOperation::CreateBlob {
            size: content.len(),
        })?;

        let oid = digest(content)?;
        self.state().blobs.insert(oid.clone(), content.to_vec());
        Ok(oid)
    }

    async fn resolve_ref(&self, refname: &RefName) -> Result<Oid, ForgeError> {
        self.enter(MockOperation::ResolveRef {
            refname: refname.to_string(),
        })?;

        self.state()
            .refs
            .get(refname.as_str())
            .cloned()
            .ok_or_else(|| ForgeError::NotFound(refname.to_string()))
    }

    async fn create_tree(
        &self,
        base: &Oid,
        overlay: &[TreeOverlayEntry],
    ) -> Result<Oid, ForgeError> {
        self.enter(MockOperation::CreateTree {
            base: base.clone(),
            overlay: overlay.to_vec(),
        })?;

        let mut state = self.state();
        let base_tree = match state.commits.get(base) {
            Some(commit) => commit.tree.clone(),
            None => base.clone(),
        };
        let mut tree = state
            .trees
            .get(&base_tree)
            .cloned()
            .ok_or_else(|| ForgeError::NotFound(format!("tree {}", base)))?;

        for entry in overlay.iter().filter(|entry| entry.oid.is_none()) {
            if tree.remove(&entry.path).is_none() {
                return Err(unprocessable(format!(
                    "cannot delete missing path {}",
                    entry.path
                )));
            }
        }

        for entry in overlay {
            let Some(oid) = &entry.oid else { continue };
            if !state.blobs.contains_key(oid) {
                return Err(unprocessable(format!("unknown blob {}", oid)));
            }
            if let Some(conflict) = path_conflict(&tree, &entry.path) {
                return Err(unprocessable(format!(
                    "{} conflicts with existing {}",
                    entry.path, conflict
                )));
            }
            tree.insert(entry.path.clone(), (entry.mode, oid.clone()));
        }

        state.store_tree(tree)
    }

    async fn create_commit(
        &self,
        parent: &Oid,
        tree: &Oid,
        message: &str,
    ) -> Result<Oid, ForgeError> {
        self.enter(MockOperation::CreateCommit {
            parent: parent.clone(),
            tree: tree.clone(),
            message: message.to_string(),
        })?;

        let mut state = self.state();
        if !state.commits.contains_key(parent) {
            return Err(unprocessable(format!("unknown parent {}", parent)));
        }
        if !state.trees.contains_key(tree) {
            return Err(unprocessable(format!("unknown tree {}", tree)));
        }

        state.store_commit(vec![parent.clone()], tree.clone(), message.to_string())
    }
}

#[async_trait]
impl PullRequests for MockForge {
    async fn ref_exists(&self, refname: &RefName) -> Result<bool, ForgeError> {
        self.enter(MockOperation::RefExists {
            refname: refname.to_string(),
        })?;

        Ok(self.state().refs.contains_key(refname.as_str()))
    }

    async fn create_ref(&self, refname: &RefName, oid: &Oid) -> Result<(), ForgeError> {
        self.enter(MockOperation::CreateRef {
            refname: refname.to_string(),
            oid: oid.clone(),
        })?;

        let mut state = self.state();
        if state.refs.contains_key(refname.as_str()) {
            return Err(unprocessable("Reference already exists"));
        }
        if !state.commits.contains_key(oid) {
            return Err(unprocessable(format!("unknown object {}", oid)));
        }
        state.refs.insert(refname.to_string(), oid.clone());
        Ok(())
    }

    async fn update_ref(
        &self,
        refname: &RefName,
        oid: &Oid,
        force: bool,
    ) -> Result<(), ForgeError> {
        self.enter(MockOperation::UpdateRef {
            refname: refname.to_string(),
            oid: oid.clone(),
            force,
        })?;

        let mut state = self.state();
        let current = state
            .refs
            .get(refname.as_str())
            .cloned()
            .ok_or_else(|| unprocessable("Reference does not exist"))?;
        if !state.commits.contains_key(oid) {
            return Err(unprocessable(format!("unknown object {}", oid)));
        }
        if !force && !state.is_ancestor(&current, oid) {
            return Err(unprocessable("Update is not a fast forward"));
        }
        state.refs.insert(refname.to_string(), oid.clone());
        Ok(())
    }

    async fn list_open_pulls(
        &self,
        head: &BranchName,
        base: &BranchName,
    ) -> Result<Vec<PullRequest>, ForgeError> {
        self.enter(MockOperation::ListOpenPulls {
            head: head.to_string(),
            base: base.to_string(),
        })?;

        Ok(self
            .state()
            .pulls
            .values()
            .filter(|p| p.head == head.as_str() && p.base == base.as_str())
            .cloned()
            .collect())
    }

    async fn create_pull(&self, request: CreatePullRequest) -> Result<PullRequest, ForgeError> {
        self.enter(MockOperation::CreatePull {
            head: request.head.to_string(),
            base: request.base.to_string(),
            title: request.title.clone(),
        })?;

        let mut state = self.state();
        let duplicate = state
            .pulls
            .values()
            .any(|p| p.head == request.head.as_str() && p.base == request.base.as_str());
        if duplicate {
            return Err(unprocessable(format!(
                "A pull request already exists for {}",
                request.head
            )));
        }

        let number = state.next_pull_number();
        let pull = PullRequest {
            number,
            url: format!("https://github.com/mock/repo/pull/{}", number),
            head: request.head.to_string(),
            base: request.base.to_string(),
            title: request.title,
            body: request.body,
            node_id: Some(format!("PR_{}", number)),
        };
        state.pulls.insert(number, pull.clone());
        Ok(pull)
    }

    async fn update_pull(&self, request: UpdatePullRequest) -> Result<PullRequest, ForgeError> {
        self.enter(MockOperation::UpdatePull {
            number: request.number,
            title: request.title.clone(),
        })?;

        let mut state = self.state();
        let pull = state
            .pulls
            .get_mut(&request.number)
            .ok_or_else(|| ForgeError::NotFound(format!("PR #{}", request.number)))?;
        pull.title = request.title;
        pull.body = request.body;
        Ok(pull.clone())
    }

    async fn enable_auto_merge(
        &self,
        pull: &PullRequest,
        method: MergeMethod,
    ) -> Result<(), ForgeError> {
        self.enter(MockOperation::EnableAutoMerge {
            number: pull.number,
            method,
        })?;

        let mut state = self.state();
        if !state.pulls.contains_key(&pull.number) {
            return Err(ForgeError::NotFound(format!("PR #{}", pull.number)));
        }
        state.auto_merge.insert(pull.number, method);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(name: &str) -> BranchName {
        BranchName::new(name).unwrap()
    }

    fn main_ref() -> RefName {
        RefName::new("refs/heads/main").unwrap()
    }

    #[tokio::test]
    async fn blob_ids_are_git_ids() {
        let forge = MockForge::new();
        let oid = forge.create_blob(b"test").await.unwrap();
        assert_eq!(oid.as_str(), "30d74d258442c7c65512eafab474568dd706c430");
        assert_eq!(forge.blob(&oid).unwrap(), b"test");
    }

    #[tokio::test]
    async fn overlay_tree_applies_upserts_and_removals() {
        let forge = MockForge::new();
        let base = forge
            .seed_branch(
                "main",
                &[
                    ("keep", FileMode::Regular, "keep"),
                    ("gone", FileMode::Regular, "gone"),
                ],
            )
            .unwrap();

        let hello = forge.create_blob(b"hello").await.unwrap();
        let tree = forge
            .create_tree(
                &base,
                &[
                    TreeOverlayEntry::upsert("hello", FileMode::Executable, hello.clone()),
                    TreeOverlayEntry::remove("gone", FileMode::Regular),
                ],
            )
            .await
            .unwrap();
        let commit = forge.create_commit(&base, &tree, "msg").await.unwrap();

        let listing = forge.list_commit(&commit).unwrap();
        let paths: Vec<_> = listing.iter().map(|e| (e.path.as_str(), e.mode)).collect();
        assert_eq!(
            paths,
            vec![("hello", FileMode::Executable), ("keep", FileMode::Regular)]
        );
        assert_eq!(forge.commit(&commit).unwrap().parents, vec![base]);
    }

    #[tokio::test]
    async fn removing_missing_path_is_rejected() {
        let forge = MockForge::new();
        let base = forge.seed_branch("main", &[]).unwrap();

        let err = forge
            .create_tree(&base, &[TreeOverlayEntry::remove("nope", FileMode::Regular)])
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::ApiError { status: 422, .. }));
    }

    #[tokio::test]
    async fn file_and_directory_may_swap_in_one_overlay() {
        let forge = MockForge::new();
        let base = forge
            .seed_branch("main", &[("a", FileMode::Regular, "file")])
            .unwrap();
        let nested = forge.create_blob(b"nested").await.unwrap();

        let tree = forge
            .create_tree(
                &base,
                &[
                    TreeOverlayEntry::upsert("a/b", FileMode::Regular, nested),
                    TreeOverlayEntry::remove("a", FileMode::Regular),
                ],
            )
            .await
            .unwrap();
        let commit = forge.create_commit(&base, &tree, "msg").await.unwrap();

        let paths: Vec<_> = forge
            .list_commit(&commit)
            .unwrap()
            .into_iter()
            .map(|e| e.path)
            .collect();
        assert_eq!(paths, vec!["a/b"]);
    }

    #[tokio::test]
    async fn upsert_colliding_with_existing_path_is_rejected() {
        let forge = MockForge::new();
        let base = forge
            .seed_branch(
                "main",
                &[
                    ("file", FileMode::Regular, "file"),
                    ("dir/inner", FileMode::Regular, "inner"),
                ],
            )
            .unwrap();
        let blob = forge.create_blob(b"x").await.unwrap();

        for path in ["file/below", "dir"] {
            let err = forge
                .create_tree(
                    &base,
                    &[TreeOverlayEntry::upsert(path, FileMode::Regular, blob.clone())],
                )
                .await
                .unwrap_err();
            assert!(matches!(err, ForgeError::ApiError { status: 422, .. }), "{}", path);
        }
    }

    #[tokio::test]
    async fn resolve_missing_ref_is_not_found() {
        let forge = MockForge::new();
        let err = forge.resolve_ref(&main_ref()).await.unwrap_err();
        assert!(matches!(err, ForgeError::NotFound(_)));
    }

    #[tokio::test]
    async fn non_forced_update_must_fast_forward() {
        let forge = MockForge::new();
        let first = forge.seed_branch("main", &[]).unwrap();
        let other = forge.seed_branch("other", &[("x", FileMode::Regular, "x")]).unwrap();

        let err = forge
            .update_ref(&main_ref(), &other, false)
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::ApiError { status: 422, .. }));
        assert_eq!(forge.ref_target("refs/heads/main"), Some(first));

        forge.update_ref(&main_ref(), &other, true).await.unwrap();
        assert_eq!(forge.ref_target("refs/heads/main"), Some(other));
    }

    #[tokio::test]
    async fn duplicate_pull_creation_is_rejected() {
        let forge = MockForge::new();
        let request = CreatePullRequest {
            head: branch("feature"),
            base: branch("main"),
            title: "One".into(),
            body: None,
        };

        let first = forge.create_pull(request.clone()).await.unwrap();
        assert_eq!(first.number, 1);
        assert!(forge.create_pull(request).await.is_err());
    }

    #[tokio::test]
    async fn list_open_pulls_matches_head_and_base() {
        let forge = MockForge::new();
        forge.insert_pull("feature", "main", "a");
        forge.insert_pull("feature", "develop", "b");
        forge.insert_pull("other", "main", "c");

        let pulls = forge
            .list_open_pulls(&branch("feature"), &branch("main"))
            .await
            .unwrap();
        assert_eq!(pulls.len(), 1);
        assert_eq!(pulls[0].title, "a");
    }

    #[tokio::test]
    async fn fail_on_is_recorded_and_returned() {
        let forge = MockForge::new().fail_on(FailOn::CreateBlob(ForgeError::RateLimited));

        let err = forge.create_blob(b"x").await.unwrap_err();
        assert!(matches!(err, ForgeError::RateLimited));
        assert_eq!(forge.operation_names(), vec!["create_blob"]);

        forge.clear_fail_on();
        assert!(forge.create_blob(b"x").await.is_ok());
    }
}
