//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens the repository and loads configuration
//! 2. Resolves flags against config defaults
//! 3. Calls the engine
//! 4. Formats and displays output
//!
//! # Async Commands
//!
//! `submit` and `commit` drive the async engine. Their handlers are sync
//! wrappers that build a tokio runtime and `block_on` the async body.

mod commit;
mod diff;
mod ls_tree;
mod submit;

pub use commit::commit;
pub use diff::diff;
pub use ls_tree::ls_tree;
pub use submit::{submit, SubmitArgs};

use anyhow::{Context as _, Result};
use tracing::debug;

use super::args::Command;
use super::Context;
use crate::core::config::Config;
use crate::core::types::{BranchName, RefName};
use crate::engine::EngineError;
use crate::git::Git;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Submit {
            branch,
            title,
            body,
            message,
            base,
            upsert,
            ignore_no_changes,
            auto_merge,
            merge_method,
            token,
            owner,
            repo,
            api_base,
            concurrency,
        } => submit::submit(
            ctx,
            SubmitArgs {
                branch,
                title,
                body,
                message,
                base,
                upsert,
                ignore_no_changes,
                auto_merge,
                merge_method,
                token,
                owner,
                repo,
                api_base,
                concurrency,
            },
        ),
        Command::Diff { base } => diff::diff(ctx, base.as_deref()),
        Command::LsTree { rev } => ls_tree::ls_tree(ctx, &rev),
        Command::Commit { message, base } => commit::commit(ctx, &message, base.as_deref()),
    }
}

/// Open the repository around the working directory and load its config.
pub(crate) fn open_repo(ctx: &Context) -> Result<(Git, Config)> {
    let cwd = ctx.cwd()?;
    let git = Git::open(&cwd)?;
    let config = Config::load(Some(git.git_dir()))?.config;

    if let Some(path) = config.global_config_loaded_from() {
        debug!("loaded global config from {}", path.display());
    }
    if let Some(path) = config.repo_config_loaded_from() {
        debug!("loaded repo config from {}", path.display());
    }

    Ok((git, config))
}

/// Pick the base branch: flag, then config, then the current branch.
///
/// Fails if the chosen branch does not exist in the local repository.
pub(crate) fn resolve_base(
    git: &Git,
    config: &Config,
    flag: Option<&str>,
) -> Result<(BranchName, RefName)> {
    let base = match flag.or(config.base()) {
        Some(name) => BranchName::new(name)?,
        None => git
            .current_branch()?
            .context("HEAD is detached; pass --base")?,
    };

    let base_ref = RefName::for_branch(&base);
    if !git.ref_exists(base_ref.as_str()) {
        return Err(EngineError::BaseNotLocal(base_ref.to_string()).into());
    }
    Ok((base, base_ref))
}
