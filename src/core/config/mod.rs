//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Two configuration scopes:
//! - **Global**: User-level settings (API base, token, upload concurrency)
//! - **Repo**: Repository-level settings (base branch, remote, owner/repo)
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags and environment (not handled here)
//!
//! # Example
//!
//! ```no_run
//! use stagepr::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/repo/.git"))).unwrap();
//! let config = result.config;
//! println!("Remote: {}", config.remote());
//! println!("Concurrency: {}", config.upload_concurrency());
//! ```

pub mod schema;

pub use schema::{ForgeRepoConfig, GlobalConfig, PullDefaults, RepoConfig};

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::forge::MergeMethod;

/// Default GitHub REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default number of blob uploads in flight.
pub const DEFAULT_UPLOAD_CONCURRENCY: usize = 4;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence rules: repo config overrides global config,
/// both override defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the repo config file (if loaded)
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `git_dir` is provided, also loads `<git_dir>/stagepr/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or fail
    /// validation. Missing config files are not an error.
    pub fn load(git_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let global_path = Self::find_global();
        let repo_path = git_dir
            .map(Self::repo_config_path)
            .filter(|path| path.exists());
        Self::load_from(global_path.as_deref(), repo_path.as_deref())
    }

    /// Load configuration from explicit file locations.
    pub fn load_from(
        global_path: Option<&Path>,
        repo_path: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let global: GlobalConfig = match global_path {
            Some(path) => read_toml(path)?,
            None => GlobalConfig::default(),
        };
        let repo: Option<RepoConfig> = repo_path.map(read_toml).transpose()?;

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path: global_path.map(Path::to_path_buf),
                repo_path: repo_path.map(Path::to_path_buf),
            },
        })
    }

    /// Find the global config file, if any.
    fn find_global() -> Option<PathBuf> {
        // 1. $STAGEPR_CONFIG
        if let Ok(path) = std::env::var("STAGEPR_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. $XDG_CONFIG_HOME/stagepr/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("stagepr/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. ~/.stagepr/config.toml
        dirs::home_dir()
            .map(|home| home.join(".stagepr/config.toml"))
            .filter(|path| path.exists())
    }

    /// Canonical repo config path inside a `.git` directory.
    pub fn repo_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("stagepr/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// REST API base URL.
    pub fn api_base(&self) -> &str {
        self.global
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
    }

    /// Token from the global config file, if any.
    pub fn token(&self) -> Option<&str> {
        self.global.token.as_deref()
    }

    /// Maximum number of concurrent blob uploads.
    pub fn upload_concurrency(&self) -> usize {
        self.global
            .upload_concurrency
            .unwrap_or(DEFAULT_UPLOAD_CONCURRENCY)
    }

    /// Configured base branch, if any.
    pub fn base(&self) -> Option<&str> {
        self.repo.as_ref().and_then(|r| r.base.as_deref())
    }

    /// Remote used for owner/repo discovery. Defaults to "origin".
    pub fn remote(&self) -> &str {
        self.repo
            .as_ref()
            .and_then(|r| r.remote.as_deref())
            .unwrap_or("origin")
    }

    /// Explicit owner/repo pair, if both are configured.
    pub fn forge_repo(&self) -> Option<(&str, &str)> {
        let forge_repo = self.repo.as_ref()?.forge_repo.as_ref()?;
        Some((forge_repo.owner.as_deref()?, forge_repo.repo.as_deref()?))
    }

    /// Whether an existing head branch may be updated. Defaults to `false`.
    pub fn upsert(&self) -> bool {
        self.pull_setting(|p| p.upsert).unwrap_or(false)
    }

    /// Whether to enable auto-merge after publishing. Defaults to `false`.
    pub fn auto_merge(&self) -> bool {
        self.pull_setting(|p| p.auto_merge).unwrap_or(false)
    }

    /// Merge method for auto-merge. Defaults to squash.
    pub fn merge_method(&self) -> MergeMethod {
        self.pull_setting(|p| p.merge_method.clone())
            .and_then(|m| m.parse().ok())
            .unwrap_or_default()
    }

    /// Look a `[pull]` setting up in repo config, then global config.
    fn pull_setting<T>(&self, get: impl Fn(&PullDefaults) -> Option<T>) -> Option<T> {
        self.repo
            .as_ref()
            .and_then(|r| r.pull.as_ref())
            .and_then(&get)
            .or_else(|| self.global.pull.as_ref().and_then(&get))
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

/// Read and parse a TOML config file.
fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
