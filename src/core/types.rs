//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`BranchName`] - Validated Git branch name
//! - [`RefName`] - Validated, fully qualified Git reference name
//! - [`Oid`] - Git object identifier (SHA-1 or SHA-256 hex)
//! - [`FileMode`] - Tree entry mode (`100644`, `100755`, `040000`, `160000`, `120000`)
//! - [`ObjectType`] - Tree entry object type (blob, tree, commit)
//!
//! # Validation
//!
//! These types enforce validity at construction time. A listing line or an
//! API response that does not fit them is rejected at the boundary instead
//! of flowing into the diff engine.
//!
//! # Examples
//!
//! ```
//! use stagepr::core::types::{BranchName, FileMode, Oid, RefName};
//!
//! let branch = BranchName::new("bot/update-deps").unwrap();
//! let refname = RefName::for_branch(&branch);
//! assert_eq!(refname.as_str(), "refs/heads/bot/update-deps");
//!
//! let mode: FileMode = "100755".parse().unwrap();
//! assert_eq!(mode, FileMode::Executable);
//!
//! assert!(Oid::new("not-a-sha").is_err());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid object id: {0}")]
    InvalidOid(String),

    #[error("invalid ref name: {0}")]
    InvalidRefName(String),

    #[error("invalid file mode: {0}")]
    InvalidMode(String),

    #[error("invalid object type: {0}")]
    InvalidObjectType(String),
}

/// Check the rules shared by branch and ref names (see `git check-ref-format`).
///
/// Returns a description of the first violated rule.
fn refname_violation(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("cannot be empty".into());
    }
    if name == "@" {
        return Some("cannot be '@' (reserved)".into());
    }
    if name.starts_with('/') || name.ends_with('/') {
        return Some("cannot start or end with '/'".into());
    }
    if name.ends_with(".lock") {
        return Some("cannot end with '.lock'".into());
    }
    for sequence in ["..", "@{", "//"] {
        if name.contains(sequence) {
            return Some(format!("cannot contain '{sequence}'"));
        }
    }

    const INVALID_CHARS: [char; 8] = [' ', '~', '^', ':', '\\', '?', '*', '['];
    if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
        return Some(format!("cannot contain '{c}'"));
    }
    if name.chars().any(|c| c.is_ascii_control()) {
        return Some("cannot contain control characters".into());
    }

    for component in name.split('/') {
        if component.starts_with('.') {
            return Some("path component cannot start with '.'".into());
        }
        if component.ends_with(".lock") {
            return Some("path component cannot end with '.lock'".into());
        }
    }

    None
}

/// A validated Git branch name (the part after `refs/heads/`).
///
/// # Example
///
/// ```
/// use stagepr::core::types::BranchName;
///
/// assert!(BranchName::new("feature/my-branch").is_ok());
/// assert!(BranchName::new("-flag").is_err());
/// assert!(BranchName::new("has space").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name violates Git's refname rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.starts_with('-') {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot start with '-'".into(),
            ));
        }
        if let Some(reason) = refname_violation(&name) {
            return Err(TypeError::InvalidBranchName(format!(
                "branch name {reason}"
            )));
        }
        Ok(Self(name))
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated, fully qualified Git reference name (`refs/...`).
///
/// # Example
///
/// ```
/// use stagepr::core::types::{BranchName, RefName};
///
/// let branch = BranchName::new("main").unwrap();
/// let refname = RefName::for_branch(&branch);
/// assert_eq!(refname.as_str(), "refs/heads/main");
/// assert_eq!(refname.api_path(), "heads/main");
/// assert_eq!(refname.branch(), Some("main"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RefName(String);

impl RefName {
    /// Create a new validated ref name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRefName` if the name is not under `refs/`
    /// or violates Git's refname rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if !name.starts_with("refs/") {
            return Err(TypeError::InvalidRefName(format!(
                "'{name}' is not fully qualified (expected refs/...)"
            )));
        }
        if let Some(reason) = refname_violation(&name) {
            return Err(TypeError::InvalidRefName(format!("ref name {reason}")));
        }
        Ok(Self(name))
    }

    /// Create a ref name for a branch (`refs/heads/<branch>`).
    pub fn for_branch(branch: &BranchName) -> Self {
        Self(format!("refs/heads/{}", branch.as_str()))
    }

    /// Branch name if this is a `refs/heads/` ref.
    pub fn branch(&self) -> Option<&str> {
        self.0.strip_prefix("refs/heads/")
    }

    /// The ref without its `refs/` prefix, as used in REST paths
    /// (`git/ref/heads/main`).
    pub fn api_path(&self) -> &str {
        self.0.strip_prefix("refs/").unwrap_or(&self.0)
    }

    /// Get the ref name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RefName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RefName> for String {
    fn from(name: RefName) -> Self {
        name.0
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Git object identifier (SHA-1 or SHA-256).
///
/// OIDs are normalized to lowercase so that two ids compare equal exactly
/// when they name the same object.
///
/// # Example
///
/// ```
/// use stagepr::core::types::Oid;
///
/// let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
/// assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
/// assert_eq!(oid.short(7), "abc123d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Oid(String);

impl Oid {
    /// Create a new validated object id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` if the string is not a 40 or 64
    /// character hex digest.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();
        if oid.len() != 40 && oid.len() != 64 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 or 64 hex characters, got {}",
                oid.len()
            )));
        }
        if !oid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid(format!(
                "'{oid}' is not hexadecimal"
            )));
        }
        Ok(Self(oid))
    }

    /// Get an abbreviated form of the OID.
    pub fn short(&self, len: usize) -> &str {
        &self.0[..len.min(self.0.len())]
    }

    /// Get the object id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Oid {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Oid> for String {
    fn from(oid: Oid) -> Self {
        oid.0
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mode of a tree entry.
///
/// Mode is part of an entry's identity: the same bytes with a different mode
/// are a different entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FileMode {
    /// `100644`
    Regular,
    /// `100755`
    Executable,
    /// `040000`
    Directory,
    /// `160000` (submodule)
    Gitlink,
    /// `120000`
    Symlink,
}

impl FileMode {
    /// The six-digit mode string used by tree listings and the REST API.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileMode::Regular => "100644",
            FileMode::Executable => "100755",
            FileMode::Directory => "040000",
            FileMode::Gitlink => "160000",
            FileMode::Symlink => "120000",
        }
    }

    /// Map a raw numeric mode (as stored in tree objects) to a `FileMode`.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0o100644 => Some(FileMode::Regular),
            0o100755 => Some(FileMode::Executable),
            0o040000 => Some(FileMode::Directory),
            0o160000 => Some(FileMode::Gitlink),
            0o120000 => Some(FileMode::Symlink),
            _ => None,
        }
    }

    /// The numeric mode as stored in tree objects.
    pub fn raw(&self) -> u32 {
        match self {
            FileMode::Regular => 0o100644,
            FileMode::Executable => 0o100755,
            FileMode::Directory => 0o040000,
            FileMode::Gitlink => 0o160000,
            FileMode::Symlink => 0o120000,
        }
    }

    pub fn is_symlink(&self) -> bool {
        matches!(self, FileMode::Symlink)
    }
}

impl FromStr for FileMode {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // git prints directories as "040000" in ls-tree but "40000" in tree objects
        match s {
            "100644" => Ok(FileMode::Regular),
            "100755" => Ok(FileMode::Executable),
            "040000" | "40000" => Ok(FileMode::Directory),
            "160000" => Ok(FileMode::Gitlink),
            "120000" => Ok(FileMode::Symlink),
            other => Err(TypeError::InvalidMode(other.to_string())),
        }
    }
}

impl TryFrom<String> for FileMode {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<FileMode> for String {
    fn from(mode: FileMode) -> Self {
        mode.as_str().to_string()
    }
}

impl std::fmt::Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object type of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }
}

impl FromStr for ObjectType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            other => Err(TypeError::InvalidObjectType(other.to_string())),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod branch_name {
        use super::*;

        #[test]
        fn valid_branch_names() {
            assert!(BranchName::new("main").is_ok());
            assert!(BranchName::new("feature/foo").is_ok());
            assert!(BranchName::new("user@feature").is_ok());
            assert!(BranchName::new("with.dot").is_ok());
        }

        #[test]
        fn invalid_branch_names() {
            assert!(BranchName::new("").is_err());
            assert!(BranchName::new(".hidden").is_err());
            assert!(BranchName::new("foo/.hidden").is_err());
            assert!(BranchName::new("-flag").is_err());
            assert!(BranchName::new("branch.lock").is_err());
            assert!(BranchName::new("branch/").is_err());
            assert!(BranchName::new("bad..path").is_err());
            assert!(BranchName::new("foo@{bar").is_err());
            assert!(BranchName::new("foo//bar").is_err());
            assert!(BranchName::new("@").is_err());
            assert!(BranchName::new("has space").is_err());
            assert!(BranchName::new("has:colon").is_err());
            assert!(BranchName::new("has\ttab").is_err());
        }

        #[test]
        fn serde_roundtrip() {
            let name = BranchName::new("feature/test").unwrap();
            let json = serde_json::to_string(&name).unwrap();
            let parsed: BranchName = serde_json::from_str(&json).unwrap();
            assert_eq!(name, parsed);
        }
    }

    mod ref_name {
        use super::*;

        #[test]
        fn must_be_fully_qualified() {
            assert!(RefName::new("refs/heads/main").is_ok());
            assert!(RefName::new("heads/main").is_err());
            assert!(RefName::new("main").is_err());
        }

        #[test]
        fn branch_and_api_path() {
            let refname = RefName::new("refs/heads/feature/foo").unwrap();
            assert_eq!(refname.branch(), Some("feature/foo"));
            assert_eq!(refname.api_path(), "heads/feature/foo");

            let tag = RefName::new("refs/tags/v1.0").unwrap();
            assert_eq!(tag.branch(), None);
            assert_eq!(tag.api_path(), "tags/v1.0");
        }

        #[test]
        fn rejects_git_rule_violations() {
            assert!(RefName::new("refs/heads/").is_err());
            assert!(RefName::new("refs/heads/main.lock").is_err());
            assert!(RefName::new("refs//heads/main").is_err());
            assert!(RefName::new("refs/heads/bad..name").is_err());
        }
    }

    mod oid {
        use super::*;

        #[test]
        fn valid_lengths() {
            assert!(Oid::new("abc123def4567890abc123def4567890abc12345").is_ok());
            assert!(Oid::new("a".repeat(64)).is_ok());
            assert!(Oid::new("abc123").is_err());
        }

        #[test]
        fn normalizes_to_lowercase() {
            let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
            assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
        }

        #[test]
        fn non_hex_rejected() {
            assert!(Oid::new("xyz123def4567890abc123def4567890abc12345").is_err());
        }

        #[test]
        fn short_form() {
            let oid = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
            assert_eq!(oid.short(7), "abc123d");
            assert_eq!(oid.short(100), oid.as_str());
        }
    }

    mod file_mode {
        use super::*;

        #[test]
        fn parses_all_modes() {
            assert_eq!("100644".parse::<FileMode>().unwrap(), FileMode::Regular);
            assert_eq!("100755".parse::<FileMode>().unwrap(), FileMode::Executable);
            assert_eq!("040000".parse::<FileMode>().unwrap(), FileMode::Directory);
            assert_eq!("40000".parse::<FileMode>().unwrap(), FileMode::Directory);
            assert_eq!("160000".parse::<FileMode>().unwrap(), FileMode::Gitlink);
            assert_eq!("120000".parse::<FileMode>().unwrap(), FileMode::Symlink);
        }

        #[test]
        fn rejects_unknown_mode() {
            assert_eq!(
                "100664".parse::<FileMode>(),
                Err(TypeError::InvalidMode("100664".into()))
            );
        }

        #[test]
        fn raw_roundtrip() {
            for mode in [
                FileMode::Regular,
                FileMode::Executable,
                FileMode::Directory,
                FileMode::Gitlink,
                FileMode::Symlink,
            ] {
                assert_eq!(FileMode::from_raw(mode.raw()), Some(mode));
            }
            assert_eq!(FileMode::from_raw(0o100664), None);
        }

        #[test]
        fn serializes_as_mode_string() {
            let json = serde_json::to_string(&FileMode::Symlink).unwrap();
            assert_eq!(json, "\"120000\"");
        }
    }

    #[test]
    fn object_type_parse() {
        assert_eq!("blob".parse::<ObjectType>().unwrap(), ObjectType::Blob);
        assert_eq!("tree".parse::<ObjectType>().unwrap(), ObjectType::Tree);
        assert_eq!("commit".parse::<ObjectType>().unwrap(), ObjectType::Commit);
        assert!("tag".parse::<ObjectType>().is_err());
    }
}
