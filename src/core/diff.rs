//! core::diff
//!
//! Whole-file classification of two tree listings.
//!
//! # Algorithm
//!
//! Entries are compared by `(oid, mode)` only; content is never diffed. A
//! path whose pair is unchanged is skipped without reading it. Every other
//! path in the new listing is added-or-modified and its current content is
//! read through a [`WorktreeReader`]. Paths present in the base listing but
//! missing from the new one are deletions and carry
//! [`FileContent::Absent`].
//!
//! Output order is observable by API consumers that apply entries in
//! sequence: added-or-modified entries in new-listing order, then deletions
//! in base-listing order.
//!
//! Renames are not inferred. A moved file is one deletion plus one addition.

use std::collections::{HashMap, HashSet};
use std::io;

use super::tree::TreeEntry;
use super::types::FileMode;

/// New content of a changed path.
#[derive(Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Full content of an added or modified path (link target for symlinks)
    Bytes(Vec<u8>),
    /// The path was deleted
    Absent,
}

impl FileContent {
    pub fn is_absent(&self) -> bool {
        matches!(self, FileContent::Absent)
    }

    /// Content bytes, or `None` for a deletion.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FileContent::Bytes(bytes) => Some(bytes),
            FileContent::Absent => None,
        }
    }
}

// File content can be large; print the size only.
impl std::fmt::Debug for FileContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileContent::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            FileContent::Absent => write!(f, "Absent"),
        }
    }
}

/// One classified change between a base tree and the working snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffFile {
    /// Path relative to the repository root
    pub path: String,
    /// New mode; for deletions, the mode the path had in the base
    pub mode: FileMode,
    /// New content, or `Absent` for deletions
    pub content: FileContent,
}

impl DiffFile {
    pub fn is_deletion(&self) -> bool {
        self.content.is_absent()
    }
}

/// Source of working-tree content for changed paths.
///
/// Implemented by [`crate::git::Git`] over the repository's working
/// directory. Tests substitute in-memory readers.
pub trait WorktreeReader {
    /// Raw bytes of a regular or executable file.
    fn read_file(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Target of a symbolic link, as bytes. Must not follow the link.
    fn read_symlink(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// Classify every path of `new` against `base`.
///
/// Non-blob entries in either listing are ignored.
///
/// # Errors
///
/// Propagates the first read failure from `reader`.
pub fn compute_diff(
    new: &[TreeEntry],
    base: &[TreeEntry],
    reader: &dyn WorktreeReader,
) -> io::Result<Vec<DiffFile>> {
    let base_by_path: HashMap<&str, &TreeEntry> = base
        .iter()
        .filter(|e| e.is_blob())
        .map(|e| (e.path.as_str(), e))
        .collect();
    let new_paths: HashSet<&str> = new
        .iter()
        .filter(|e| e.is_blob())
        .map(|e| e.path.as_str())
        .collect();

    let mut files = Vec::new();

    for entry in new.iter().filter(|e| e.is_blob()) {
        let unchanged = base_by_path
            .get(entry.path.as_str())
            .is_some_and(|old| old.oid == entry.oid && old.mode == entry.mode);
        if unchanged {
            continue;
        }

        let content = if entry.mode.is_symlink() {
            reader.read_symlink(&entry.path)?
        } else {
            reader.read_file(&entry.path)?
        };
        files.push(DiffFile {
            path: entry.path.clone(),
            mode: entry.mode,
            content: FileContent::Bytes(content),
        });
    }

    for entry in base.iter().filter(|e| e.is_blob()) {
        if !new_paths.contains(entry.path.as_str()) {
            files.push(DiffFile {
                path: entry.path.clone(),
                mode: entry.mode,
                content: FileContent::Absent,
            });
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ObjectType, Oid};
    use std::cell::RefCell;

    /// In-memory worktree that records which paths were read.
    #[derive(Default)]
    struct FakeWorktree {
        files: HashMap<String, Vec<u8>>,
        links: HashMap<String, Vec<u8>>,
        reads: RefCell<Vec<String>>,
    }

    impl FakeWorktree {
        fn file(mut self, path: &str, content: &str) -> Self {
            self.files.insert(path.into(), content.as_bytes().to_vec());
            self
        }

        fn link(mut self, path: &str, target: &str) -> Self {
            self.links.insert(path.into(), target.as_bytes().to_vec());
            self
        }
    }

    impl WorktreeReader for FakeWorktree {
        fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
            self.reads.borrow_mut().push(path.to_string());
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
        }

        fn read_symlink(&self, path: &str) -> io::Result<Vec<u8>> {
            self.reads.borrow_mut().push(path.to_string());
            self.links
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
        }
    }

    fn oid(c: char) -> Oid {
        Oid::new(c.to_string().repeat(40)).unwrap()
    }

    fn blob(path: &str, mode: FileMode, id: char) -> TreeEntry {
        TreeEntry {
            path: path.into(),
            mode,
            object_type: ObjectType::Blob,
            oid: oid(id),
        }
    }

    #[test]
    fn identical_entries_are_skipped_without_reading() {
        let listing = vec![
            blob("a", FileMode::Regular, 'a'),
            blob("b", FileMode::Executable, 'b'),
        ];
        let worktree = FakeWorktree::default();

        let files = compute_diff(&listing, &listing, &worktree).unwrap();

        assert!(files.is_empty());
        assert!(worktree.reads.borrow().is_empty());
    }

    #[test]
    fn mode_change_is_reported() {
        let base = vec![blob("script", FileMode::Regular, 'a')];
        let new = vec![blob("script", FileMode::Executable, 'a')];
        let worktree = FakeWorktree::default().file("script", "echo hi");

        let files = compute_diff(&new, &base, &worktree).unwrap();

        assert_eq!(
            files,
            vec![DiffFile {
                path: "script".into(),
                mode: FileMode::Executable,
                content: FileContent::Bytes(b"echo hi".to_vec()),
            }]
        );
    }

    #[test]
    fn deletion_is_absent_not_empty() {
        let base = vec![
            blob("gone", FileMode::Regular, 'a'),
            blob("empty", FileMode::Regular, 'b'),
        ];
        let new = vec![blob("empty", FileMode::Regular, 'e')];
        let worktree = FakeWorktree::default().file("empty", "");

        let files = compute_diff(&new, &base, &worktree).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "empty");
        assert_eq!(files[0].content, FileContent::Bytes(vec![]));
        assert!(!files[0].is_deletion());
        assert_eq!(files[1].path, "gone");
        assert!(files[1].is_deletion());
        assert_eq!(files[1].mode, FileMode::Regular);
    }

    #[test]
    fn symlink_content_is_target() {
        let new = vec![blob("link", FileMode::Symlink, 'c')];
        let worktree = FakeWorktree::default()
            .file("link", "bytes of the pointed-to file")
            .link("link", "./test");

        let files = compute_diff(&new, &[], &worktree).unwrap();

        assert_eq!(files[0].content.as_bytes(), Some(&b"./test"[..]));
        assert_eq!(files[0].mode, FileMode::Symlink);
    }

    #[test]
    fn type_change_is_a_modification() {
        let base = vec![blob("thing", FileMode::Regular, 'a')];
        let new = vec![blob("thing", FileMode::Symlink, 'b')];
        let worktree = FakeWorktree::default().link("thing", "elsewhere");

        let files = compute_diff(&new, &base, &worktree).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].mode, FileMode::Symlink);
        assert_eq!(files[0].content.as_bytes(), Some(&b"elsewhere"[..]));
    }

    #[test]
    fn rename_is_delete_plus_add() {
        let base = vec![blob("old", FileMode::Regular, 'a')];
        let new = vec![blob("new", FileMode::Regular, 'a')];
        let worktree = FakeWorktree::default().file("new", "same");

        let files = compute_diff(&new, &base, &worktree).unwrap();

        let summary: Vec<_> = files
            .iter()
            .map(|f| (f.path.as_str(), f.is_deletion()))
            .collect();
        assert_eq!(summary, vec![("new", false), ("old", true)]);
    }

    #[test]
    fn changes_precede_deletions_in_listing_order() {
        let base = vec![
            blob("dir/test", FileMode::Regular, 'd'),
            blob("test", FileMode::Regular, 't'),
        ];
        let new = vec![
            blob("hello", FileMode::Regular, 'h'),
            blob("symlink", FileMode::Symlink, 's'),
            blob("test", FileMode::Executable, 'f'),
        ];
        let worktree = FakeWorktree::default()
            .file("hello", "Hello, World!")
            .file("test", "foobar")
            .link("symlink", "./test");

        let files = compute_diff(&new, &base, &worktree).unwrap();

        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["hello", "symlink", "test", "dir/test"]);
    }

    #[test]
    fn non_blob_entries_are_ignored() {
        let tree = TreeEntry {
            path: "dir".into(),
            mode: FileMode::Directory,
            object_type: ObjectType::Tree,
            oid: oid('1'),
        };
        let submodule = TreeEntry {
            path: "vendor".into(),
            mode: FileMode::Gitlink,
            object_type: ObjectType::Commit,
            oid: oid('2'),
        };

        let files =
            compute_diff(&[tree], &[submodule], &FakeWorktree::default()).unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn read_failure_propagates() {
        let new = vec![blob("missing", FileMode::Regular, 'a')];
        let err = compute_diff(&new, &[], &FakeWorktree::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
