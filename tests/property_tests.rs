//! Property-based tests for the diff algorithm.
//!
//! Listings are generated as path -> (mode, content) maps; blob ids are real
//! git ids of the content, so equal content means equal id.

use std::collections::{BTreeMap, HashMap};
use std::io;

use proptest::prelude::*;

use stagepr::core::diff::{compute_diff, DiffFile, FileContent, WorktreeReader};
use stagepr::core::tree::TreeEntry;
use stagepr::core::types::{FileMode, ObjectType};
use stagepr::git::Git;

type Listing = BTreeMap<String, (FileMode, String)>;

struct MapWorktree<'a>(&'a Listing);

impl WorktreeReader for MapWorktree<'_> {
    fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        match self.0.get(path) {
            Some((mode, content)) if !mode.is_symlink() => Ok(content.as_bytes().to_vec()),
            _ => Err(io::Error::new(io::ErrorKind::NotFound, path.to_string())),
        }
    }

    fn read_symlink(&self, path: &str) -> io::Result<Vec<u8>> {
        match self.0.get(path) {
            Some((mode, content)) if mode.is_symlink() => Ok(content.as_bytes().to_vec()),
            _ => Err(io::Error::new(io::ErrorKind::InvalidInput, path.to_string())),
        }
    }
}

fn entries(listing: &Listing) -> Vec<TreeEntry> {
    listing
        .iter()
        .map(|(path, (mode, content))| TreeEntry {
            path: path.clone(),
            mode: *mode,
            object_type: ObjectType::Blob,
            oid: Git::hash_blob(content.as_bytes()).unwrap(),
        })
        .collect()
}

fn apply(base: &Listing, files: &[DiffFile]) -> Listing {
    let mut result = base.clone();
    for file in files {
        match &file.content {
            FileContent::Bytes(bytes) => {
                let content = String::from_utf8(bytes.clone()).unwrap();
                result.insert(file.path.clone(), (file.mode, content));
            }
            FileContent::Absent => {
                result.remove(&file.path);
            }
        }
    }
    result
}

fn mode() -> impl Strategy<Value = FileMode> {
    prop_oneof![
        Just(FileMode::Regular),
        Just(FileMode::Executable),
        Just(FileMode::Symlink),
    ]
}

fn listing() -> impl Strategy<Value = Listing> {
    prop::collection::btree_map("[a-d](/[a-d]){0,2}", (mode(), "[xy]{0,3}"), 0..12)
}

proptest! {
    #[test]
    fn diff_against_self_is_empty(base in listing()) {
        let listed = entries(&base);
        let files = compute_diff(&listed, &listed, &MapWorktree(&base)).unwrap();
        prop_assert!(files.is_empty());
    }

    #[test]
    fn applying_diff_reproduces_new(base in listing(), new in listing()) {
        let files = compute_diff(&entries(&new), &entries(&base), &MapWorktree(&new)).unwrap();
        prop_assert_eq!(apply(&base, &files), new);
    }

    #[test]
    fn only_changed_paths_are_reported(base in listing(), new in listing()) {
        let files = compute_diff(&entries(&new), &entries(&base), &MapWorktree(&new)).unwrap();

        let reported: HashMap<&str, &DiffFile> =
            files.iter().map(|f| (f.path.as_str(), f)).collect();
        prop_assert_eq!(reported.len(), files.len());

        for (path, value) in &new {
            let changed = base.get(path) != Some(value);
            prop_assert_eq!(reported.contains_key(path.as_str()), changed);
        }
        for (path, (mode, _)) in &base {
            if !new.contains_key(path) {
                let file = reported.get(path.as_str()).copied();
                prop_assert!(file.is_some_and(|f| f.is_deletion() && f.mode == *mode));
            }
        }
    }

    #[test]
    fn deletions_come_after_changes_in_listing_order(base in listing(), new in listing()) {
        let files = compute_diff(&entries(&new), &entries(&base), &MapWorktree(&new)).unwrap();

        let first_deletion = files.iter().position(|f| f.is_deletion()).unwrap_or(files.len());
        prop_assert!(files[first_deletion..].iter().all(|f| f.is_deletion()));

        let changes: Vec<&str> = files[..first_deletion].iter().map(|f| f.path.as_str()).collect();
        let mut sorted = changes.clone();
        sorted.sort();
        prop_assert_eq!(changes, sorted);
    }
}
