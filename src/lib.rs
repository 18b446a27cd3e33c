//! stagepr - commit a working tree onto a remote branch and open a pull request
//!
//! stagepr snapshots the working directory, compares it against a base branch
//! by object id and mode, and rebuilds the changed files as a single commit
//! in the remote object store. The head branch is then created or
//! force-updated and the matching pull request opened or rewritten.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Diff, commit building and publishing
//! - [`core`] - Domain types, tree listings, the diff algorithm, config
//! - [`git`] - Single interface for all local Git operations
//! - [`forge`] - Remote object store and pull request hosts (GitHub, mock, local)
//! - [`ui`] - Output formatting
//!
//! # Correctness Invariants
//!
//! 1. Files are compared by object id and mode only, never by content
//! 2. Deleted files and empty files are distinct
//! 3. No branch moves until its commit is fully built
//! 4. An ambiguous pull request lookup is an error, never a guess

pub mod cli;
pub mod core;
pub mod engine;
pub mod forge;
pub mod git;
pub mod ui;
