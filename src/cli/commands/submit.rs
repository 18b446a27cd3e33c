//! cli::commands::submit
//!
//! Commit the working tree on GitHub and open or update a pull request.
//!
//! # Algorithm
//!
//! 1. Resolve base, head, owner/repo, token and pull settings from flags,
//!    environment and config
//! 2. Run [`crate::engine::submit`] with the GitHub forge as both object
//!    store and pull request host
//! 3. Report the outcome
//!
//! # Example
//!
//! ```bash
//! stagepr submit --branch bot/regen --title 'Regenerate' -m 'regenerate' --upsert
//! ```

use anyhow::{bail, Context as _, Result};
use tracing::debug;

use super::{open_repo, resolve_base};
use crate::cli::Context;
use crate::core::config::Config;
use crate::core::types::BranchName;
use crate::engine::{self, PublishOutcome, SubmitOutcome, SubmitRequest};
use crate::forge::github::GitHubForge;
use crate::forge::{ForgeError, MergeMethod};
use crate::git::Git;
use crate::ui::output;

/// Submit options parsed from CLI arguments.
#[derive(Debug, Default)]
pub struct SubmitArgs {
    pub branch: String,
    pub title: String,
    pub body: Option<String>,
    pub message: String,
    pub base: Option<String>,
    pub upsert: bool,
    pub ignore_no_changes: bool,
    pub auto_merge: bool,
    pub merge_method: Option<MergeMethod>,
    pub token: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub api_base: Option<String>,
    pub concurrency: Option<usize>,
}

/// Run the submit command.
///
/// This is a synchronous wrapper that uses tokio to run the async engine.
pub fn submit(ctx: &Context, args: SubmitArgs) -> Result<()> {
    let (git, config) = open_repo(ctx)?;
    let (base, _) = resolve_base(&git, &config, args.base.as_deref())?;
    let head = BranchName::new(args.branch.as_str())?;

    let (owner, repo) = forge_repo(&git, &config, &args)?;
    let token = args
        .token
        .clone()
        .or_else(|| config.token().map(str::to_string))
        .ok_or(ForgeError::AuthRequired)
        .context("set GITHUB_TOKEN, pass --token or add a token to the config file")?;
    let api_base = args.api_base.as_deref().unwrap_or(config.api_base());
    debug!(%owner, %repo, api_base, "using GitHub repository");

    let concurrency = args.concurrency.unwrap_or(config.upload_concurrency());
    if concurrency == 0 {
        bail!("--concurrency must be at least 1");
    }

    let auto_merge = (args.auto_merge || config.auto_merge())
        .then(|| args.merge_method.unwrap_or(config.merge_method()));

    let request = SubmitRequest {
        head,
        base,
        title: args.title,
        body: args.body,
        message: args.message,
        upsert: args.upsert || config.upsert(),
        ignore_no_changes: args.ignore_no_changes,
        auto_merge,
        concurrency,
    };

    let forge = GitHubForge::with_api_base(Some(token), owner, repo, api_base);

    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt.block_on(engine::submit(&git, &forge, &forge, &request))?;

    report(ctx, &outcome);
    Ok(())
}

/// Owner and repository: flags, then config, then the remote URL.
fn forge_repo(git: &Git, config: &Config, args: &SubmitArgs) -> Result<(String, String)> {
    if let (Some(owner), Some(repo)) = (&args.owner, &args.repo) {
        return Ok((owner.clone(), repo.clone()));
    }
    if let Some((owner, repo)) = config.forge_repo() {
        return Ok((owner.to_string(), repo.to_string()));
    }

    let remote = config.remote();
    let url = git
        .remote_url(remote)?
        .with_context(|| format!("no '{}' remote configured; pass --owner and --repo", remote))?;
    Git::parse_remote(&url)
        .with_context(|| format!("cannot parse owner/repo from remote URL '{}'", url))
}

fn report(ctx: &Context, outcome: &SubmitOutcome) {
    let SubmitOutcome::Published {
        commit,
        outcome,
        auto_merge,
    } = outcome
    else {
        output::print("No changes; nothing submitted.", ctx.verbosity);
        return;
    };

    let pull = outcome.pull();
    let action = match outcome {
        PublishOutcome::BranchCreated(_) => {
            output::print(
                format!("Created branch '{}' at {}", pull.head, commit.short(7)),
                ctx.verbosity,
            );
            "Opened"
        }
        PublishOutcome::PullCreated(_) => {
            output::print(
                format!("Updated branch '{}' to {}", pull.head, commit.short(7)),
                ctx.verbosity,
            );
            "Opened"
        }
        PublishOutcome::PullUpdated(_) => {
            output::print(
                format!("Updated branch '{}' to {}", pull.head, commit.short(7)),
                ctx.verbosity,
            );
            "Updated"
        }
    };
    output::success(format!(
        "{} pull request #{}: {}",
        action, pull.number, pull.url
    ));

    if let Some(method) = auto_merge {
        output::print(
            format!("Auto-merge ({}) enabled for #{}", method, pull.number),
            ctx.verbosity,
        );
    }
}
