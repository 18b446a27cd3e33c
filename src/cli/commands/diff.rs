//! cli::commands::diff
//!
//! Print the changes submit would commit.
//!
//! Output is one line per change, `<status> <mode> <path>`, where status is
//! `A` (path absent from the base), `M` (content or mode changed) or `D`.

use std::collections::HashSet;

use anyhow::Result;

use super::{open_repo, resolve_base};
use crate::cli::Context;
use crate::engine;
use crate::ui::output;

/// Run the diff command.
pub fn diff(ctx: &Context, base: Option<&str>) -> Result<()> {
    let (git, config) = open_repo(ctx)?;
    let (_, base_ref) = resolve_base(&git, &config, base)?;

    let files = engine::compute_diff_files(&git, &base_ref)?;
    if files.is_empty() {
        output::info("No changes.", ctx.verbosity);
        return Ok(());
    }

    let base_listing = git.list_blobs(base_ref.as_str())?;
    let in_base: HashSet<&str> = base_listing.iter().map(|e| e.path.as_str()).collect();

    for file in &files {
        let status = if file.is_deletion() {
            'D'
        } else if in_base.contains(file.path.as_str()) {
            'M'
        } else {
            'A'
        };
        println!("{}", output::format_change(status, file.mode, &file.path));
    }
    Ok(())
}
