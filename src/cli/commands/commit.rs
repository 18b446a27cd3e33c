//! cli::commands::commit
//!
//! Build the submit commit in the local object database.
//!
//! Uses [`LocalStore`] in place of the remote forge, so the result can be
//! inspected with plain git before anything is uploaded. No ref moves.

use anyhow::{bail, Result};

use super::{open_repo, resolve_base};
use crate::cli::Context;
use crate::engine::{self, EngineError};
use crate::forge::local::LocalStore;
use crate::ui::output;

/// Run the commit command.
pub fn commit(ctx: &Context, message: &str, base: Option<&str>) -> Result<()> {
    let (git, config) = open_repo(ctx)?;
    let (base_branch, base_ref) = resolve_base(&git, &config, base)?;

    let files = engine::compute_diff_files(&git, &base_ref)?;
    if files.is_empty() {
        bail!(EngineError::NoChanges(base_branch.to_string()));
    }

    let store = LocalStore::new(git);
    let rt = tokio::runtime::Runtime::new()?;
    let commit = rt.block_on(engine::build_commit(
        &store,
        &base_ref,
        &files,
        message,
        config.upload_concurrency(),
    ))?;

    output::debug(format!("{} file(s) changed", files.len()), ctx.verbosity);
    println!("{}", commit);
    Ok(())
}
