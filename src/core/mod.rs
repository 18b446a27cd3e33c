//! core
//!
//! Core domain types and the tree-diff algorithm.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, Oid, RefName, FileMode, ObjectType
//! - [`tree`] - Tree listing entries and overlay entries
//! - [`diff`] - Whole-file classification of two listings
//! - [`config`] - Configuration schema and loading
//!
//! Nothing here touches git or the network. Listings come in, classified
//! changes come out.

pub mod config;
pub mod diff;
pub mod tree;
pub mod types;
