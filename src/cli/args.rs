//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::forge::MergeMethod;

/// stagepr - commit the working tree on top of a branch and open a pull request
#[derive(Parser, Debug)]
#[command(name = "stagepr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if stagepr was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Commit the working tree changes remotely and open or update a pull request
    #[command(
        name = "submit",
        long_about = "Commit the working tree changes remotely and open or update a pull request.\n\n\
            The working tree is compared against the base branch. Every added, modified or \
            deleted file is uploaded as a blob, a tree is built over the remote base tree and \
            a single-parent commit is created. The head branch is then created at that commit, \
            or force-updated with --upsert, and the pull request from head into base is opened \
            or rewritten.\n\n\
            Files are staged in the local index as a side effect; no local commit is made \
            and no local branch moves.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Open a pull request with the current changes
    stagepr submit --branch bot/regen --title 'Regenerate' --message 'regenerate'

    # Re-run on a schedule: reuse the branch and its pull request
    stagepr submit --branch bot/regen --title 'Regenerate' --message 'regenerate' \\
        --upsert --ignore-no-changes

    # Merge automatically once checks pass
    stagepr submit --branch bot/regen --title 'Regenerate' --message 'regenerate' \\
        --auto-merge --merge-method rebase"
    )]
    Submit {
        /// Head branch to create or update
        #[arg(long)]
        branch: String,

        /// Pull request title
        #[arg(long)]
        title: String,

        /// Pull request body
        #[arg(long)]
        body: Option<String>,

        /// Commit message
        #[arg(long, short)]
        message: String,

        /// Base branch (defaults to the configured base, else the current branch)
        #[arg(long)]
        base: Option<String>,

        /// Force-update the head branch if it already exists
        #[arg(long)]
        upsert: bool,

        /// Succeed without doing anything when there are no changes
        #[arg(long)]
        ignore_no_changes: bool,

        /// Enable auto-merge on the pull request
        #[arg(long)]
        auto_merge: bool,

        /// Merge method used by auto-merge
        #[arg(long, value_name = "METHOD")]
        merge_method: Option<MergeMethod>,

        /// GitHub token
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Repository owner (defaults to the remote URL)
        #[arg(long, requires = "repo")]
        owner: Option<String>,

        /// Repository name (defaults to the remote URL)
        #[arg(long, requires = "owner")]
        repo: Option<String>,

        /// REST API base URL, for GitHub Enterprise
        #[arg(long, value_name = "URL")]
        api_base: Option<String>,

        /// Maximum concurrent blob uploads
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(usize))]
        concurrency: Option<usize>,
    },

    /// Show the changes submit would commit
    #[command(
        name = "diff",
        long_about = "Show the changes submit would commit.\n\n\
            Prints one line per changed file: A (added), M (modified) or D (deleted), \
            the file mode and the path. Paths are compared by object id and mode only."
    )]
    Diff {
        /// Base branch (defaults to the configured base, else the current branch)
        #[arg(long)]
        base: Option<String>,
    },

    /// List the blobs of a tree recursively
    #[command(name = "ls-tree")]
    LsTree {
        /// Revision to list (branch, ref, commit or tree id)
        rev: String,
    },

    /// Build the commit in the local repository and print its id
    #[command(
        name = "commit",
        long_about = "Build the commit submit would create, in the local object database.\n\n\
            No ref is moved; the printed commit id can be inspected with git show."
    )]
    Commit {
        /// Commit message
        #[arg(long, short)]
        message: String,

        /// Base branch (defaults to the configured base, else the current branch)
        #[arg(long)]
        base: Option<String>,
    },
}
