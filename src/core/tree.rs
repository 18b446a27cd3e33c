//! core::tree
//!
//! Tree listing entries.
//!
//! A listing is the flattened, recursive content of a tree-like object: one
//! [`TreeEntry`] per path, carrying the entry's mode, object type and object
//! id. The text form of an entry is the one `git ls-tree` prints:
//!
//! ```text
//! 100644 blob 30d74d258442c7c65512eafab474568dd706c430	test
//! ```
//!
//! Records that do not parse are a hard error ([`TreeError::MalformedEntry`]).
//! An unexpected listing format means the object store is not what we think
//! it is, and skipping entries would silently drop files from a commit.

use std::str::FromStr;

use thiserror::Error;

use super::types::{FileMode, ObjectType, Oid};

/// Errors from parsing tree listings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    /// A listing record is not `<mode> <type> <oid><sep><path>`.
    #[error("unrecognized tree listing entry '{record}': {reason}")]
    MalformedEntry {
        /// The offending record, lossily decoded
        record: String,
        /// What failed to parse
        reason: String,
    },
}

impl TreeError {
    fn malformed(record: impl Into<String>, reason: impl Into<String>) -> Self {
        TreeError::MalformedEntry {
            record: record.into(),
            reason: reason.into(),
        }
    }
}

/// One object in a tree listing.
///
/// Entries are immutable values. Two entries with equal `(oid, mode)` refer
/// to byte-identical content, whatever their path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeEntry {
    /// Full POSIX-style path relative to the tree root
    pub path: String,
    /// Entry mode
    pub mode: FileMode,
    /// Type of the referenced object
    pub object_type: ObjectType,
    /// Id of the referenced object
    pub oid: Oid,
}

impl TreeEntry {
    /// Build an entry from the raw parts of a tree walk.
    ///
    /// Applies the same validation as the text parser so that every source of
    /// listings fails the same way on data it does not understand.
    ///
    /// # Errors
    ///
    /// [`TreeError::MalformedEntry`] if the mode is unknown, the object type
    /// is missing, the id is not a digest or the path is not UTF-8.
    pub fn from_raw(
        raw_mode: u32,
        object_type: Option<ObjectType>,
        oid: &str,
        path: &[u8],
    ) -> Result<Self, TreeError> {
        let describe = || {
            format!(
                "{:06o} {} {}\t{}",
                raw_mode,
                object_type.map(|t| t.as_str()).unwrap_or("?"),
                oid,
                String::from_utf8_lossy(path)
            )
        };

        let mode = FileMode::from_raw(raw_mode)
            .ok_or_else(|| TreeError::malformed(describe(), format!("unknown mode {raw_mode:o}")))?;
        let object_type =
            object_type.ok_or_else(|| TreeError::malformed(describe(), "unknown object type"))?;
        let oid = Oid::new(oid).map_err(|e| TreeError::malformed(describe(), e.to_string()))?;
        let path = std::str::from_utf8(path)
            .map_err(|_| TreeError::malformed(describe(), "path is not valid UTF-8"))?;
        if path.is_empty() {
            return Err(TreeError::malformed(describe(), "empty path"));
        }

        Ok(Self {
            path: path.to_string(),
            mode,
            object_type,
            oid,
        })
    }

    /// Whether this entry is a file or symlink (the only entries that diff).
    pub fn is_blob(&self) -> bool {
        self.object_type == ObjectType::Blob
    }
}

impl FromStr for TreeEntry {
    type Err = TreeError;

    /// Parse one listing record.
    ///
    /// The path is everything after the object id and its separator, which
    /// may be a tab (`ls-tree` default) or a single space (`--format`
    /// output). Paths may themselves contain spaces, tabs and newlines.
    fn from_str(record: &str) -> Result<Self, Self::Err> {
        let (mode, rest) = record
            .split_once(' ')
            .ok_or_else(|| TreeError::malformed(record, "missing object type"))?;
        let (object_type, rest) = rest
            .split_once(' ')
            .ok_or_else(|| TreeError::malformed(record, "missing object id"))?;
        let sep = rest
            .find(['\t', ' '])
            .ok_or_else(|| TreeError::malformed(record, "missing path"))?;
        let (oid, path) = (&rest[..sep], &rest[sep + 1..]);

        if mode.is_empty() || !mode.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TreeError::malformed(record, "mode is not numeric"));
        }
        if path.is_empty() {
            return Err(TreeError::malformed(record, "empty path"));
        }

        Ok(Self {
            path: path.to_string(),
            mode: mode
                .parse()
                .map_err(|e: super::types::TypeError| TreeError::malformed(record, e.to_string()))?,
            object_type: object_type
                .parse()
                .map_err(|e: super::types::TypeError| TreeError::malformed(record, e.to_string()))?,
            oid: Oid::new(oid).map_err(|e| TreeError::malformed(record, e.to_string()))?,
        })
    }
}

impl std::fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}\t{}",
            self.mode, self.object_type, self.oid, self.path
        )
    }
}

/// One entry of a tree overlay applied on top of a base tree.
///
/// `oid: None` removes the path from the base; `Some` adds or replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeOverlayEntry {
    pub path: String,
    pub mode: FileMode,
    pub oid: Option<Oid>,
}

impl TreeOverlayEntry {
    pub fn upsert(path: impl Into<String>, mode: FileMode, oid: Oid) -> Self {
        Self {
            path: path.into(),
            mode,
            oid: Some(oid),
        }
    }

    pub fn remove(path: impl Into<String>, mode: FileMode) -> Self {
        Self {
            path: path.into(),
            mode,
            oid: None,
        }
    }
}

/// Parse a NUL-terminated listing (`git ls-tree -r -z` output).
///
/// A trailing empty record (after the final NUL) is ignored; an empty record
/// anywhere else is malformed.
pub fn parse_listing(raw: &[u8]) -> Result<Vec<TreeEntry>, TreeError> {
    let mut records: Vec<&[u8]> = raw.split(|b| *b == 0).collect();
    if records.last().is_some_and(|r| r.is_empty()) {
        records.pop();
    }

    records
        .into_iter()
        .map(|record| {
            let text = std::str::from_utf8(record).map_err(|_| {
                TreeError::malformed(String::from_utf8_lossy(record), "record is not valid UTF-8")
            })?;
            text.parse()
        })
        .collect()
}

/// Keep only blob entries (regular files, executables, symlinks).
pub fn blobs_only(entries: Vec<TreeEntry>) -> Vec<TreeEntry> {
    entries.into_iter().filter(TreeEntry::is_blob).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const OID: &str = "30d74d258442c7c65512eafab474568dd706c430";

    #[test]
    fn parses_tab_separated_record() {
        let entry: TreeEntry = format!("100644 blob {OID}\tdir/test").parse().unwrap();
        assert_eq!(entry.path, "dir/test");
        assert_eq!(entry.mode, FileMode::Regular);
        assert_eq!(entry.object_type, ObjectType::Blob);
        assert_eq!(entry.oid.as_str(), OID);
    }

    #[test]
    fn parses_space_separated_record_with_spaces_in_path() {
        let entry: TreeEntry = format!("120000 blob {OID} my link name").parse().unwrap();
        assert_eq!(entry.path, "my link name");
        assert_eq!(entry.mode, FileMode::Symlink);
    }

    #[test]
    fn path_may_contain_newline() {
        let entry: TreeEntry = format!("100755 blob {OID}\tline\nbreak").parse().unwrap();
        assert_eq!(entry.path, "line\nbreak");
        assert_eq!(entry.mode, FileMode::Executable);
    }

    #[test]
    fn display_matches_ls_tree() {
        let line = format!("160000 commit {OID}\tvendor/lib");
        let entry: TreeEntry = line.parse().unwrap();
        assert_eq!(entry.to_string(), line);
    }

    #[test]
    fn malformed_records_are_errors() {
        for record in [
            String::new(),
            "100644".to_string(),
            "100644 blob".to_string(),
            format!("100644 blob {OID}"),
            format!("100644 blob {OID}\t"),
            format!("abc blob {OID}\tpath"),
            format!("100664 blob {OID}\tpath"),
            format!("100644 tag {OID}\tpath"),
            "100644 blob nothex\tpath".to_string(),
        ] {
            let result = record.parse::<TreeEntry>();
            assert!(
                matches!(result, Err(TreeError::MalformedEntry { .. })),
                "expected malformed for {record:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn parse_listing_ignores_trailing_terminator() {
        let raw = format!("100644 blob {OID}\ta\u{0}040000 tree {OID}\tdir\u{0}");
        let entries = parse_listing(raw.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].object_type, ObjectType::Tree);
    }

    #[test]
    fn parse_listing_rejects_empty_middle_record() {
        let raw = format!("100644 blob {OID}\ta\u{0}\u{0}100644 blob {OID}\tb\u{0}");
        assert!(parse_listing(raw.as_bytes()).is_err());
    }

    #[test]
    fn parse_listing_empty_input() {
        assert!(parse_listing(b"").unwrap().is_empty());
    }

    #[test]
    fn blobs_only_drops_trees_and_gitlinks() {
        let raw = format!(
            "100644 blob {OID}\ta\u{0}040000 tree {OID}\tdir\u{0}160000 commit {OID}\tsub\u{0}120000 blob {OID}\tlink\u{0}"
        );
        let blobs = blobs_only(parse_listing(raw.as_bytes()).unwrap());
        let paths: Vec<_> = blobs.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["a", "link"]);
    }

    #[test]
    fn from_raw_validates() {
        let ok = TreeEntry::from_raw(0o100755, Some(ObjectType::Blob), OID, b"bin/run").unwrap();
        assert_eq!(ok.mode, FileMode::Executable);

        assert!(TreeEntry::from_raw(0o100664, Some(ObjectType::Blob), OID, b"x").is_err());
        assert!(TreeEntry::from_raw(0o100644, None, OID, b"x").is_err());
        assert!(TreeEntry::from_raw(0o100644, Some(ObjectType::Blob), OID, b"\xff").is_err());
        assert!(TreeEntry::from_raw(0o100644, Some(ObjectType::Blob), "zz", b"x").is_err());
    }
}
