//! cli::commands::ls_tree
//!
//! Recursive blob listing in `git ls-tree -r` text format.

use anyhow::Result;

use super::open_repo;
use crate::cli::Context;

/// Run the ls-tree command.
pub fn ls_tree(ctx: &Context, rev: &str) -> Result<()> {
    let (git, _) = open_repo(ctx)?;
    for entry in git.list_blobs(rev)? {
        println!("{}", entry);
    }
    Ok(())
}
