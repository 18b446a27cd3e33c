//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$STAGEPR_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/stagepr/config.toml`
//! 3. `~/.stagepr/config.toml`
//!
//! # Repo Config
//!
//! Located at `.git/stagepr/config.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing (branch names must be valid,
//! concurrency must be positive, merge methods must be known).

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::BranchName;
use crate::forge::MergeMethod;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// api_base = "https://github.example.com/api/v3"
/// upload_concurrency = 8
///
/// [pull]
/// upsert = true
/// merge_method = "squash"
/// ```
#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// REST API base URL (GitHub Enterprise)
    pub api_base: Option<String>,

    /// Bearer token used when neither `--token` nor `GITHUB_TOKEN` is set
    pub token: Option<String>,

    /// Maximum number of blob uploads in flight
    pub upload_concurrency: Option<usize>,

    /// Pull request defaults
    pub pull: Option<PullDefaults>,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GlobalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalConfig")
            .field("api_base", &self.api_base)
            .field("has_token", &self.token.is_some())
            .field("upload_concurrency", &self.upload_concurrency)
            .field("pull", &self.pull)
            .finish()
    }
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(api_base) = &self.api_base {
            if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
                return Err(ConfigError::InvalidValue(format!(
                    "api_base '{}' must be an http(s) URL",
                    api_base
                )));
            }
        }

        if self.upload_concurrency == Some(0) {
            return Err(ConfigError::InvalidValue(
                "upload_concurrency must be at least 1".to_string(),
            ));
        }

        if let Some(pull) = &self.pull {
            pull.validate()?;
        }

        Ok(())
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// base = "main"
/// remote = "origin"
///
/// [forge_repo]
/// owner = "myorg"
/// repo = "myrepo"
///
/// [pull]
/// auto_merge = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Base branch pull requests target
    pub base: Option<String>,

    /// Remote used to discover owner/repo (default: "origin")
    pub remote: Option<String>,

    /// Explicit repository identification
    pub forge_repo: Option<ForgeRepoConfig>,

    /// Pull request defaults (override global)
    pub pull: Option<PullDefaults>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base) = &self.base {
            BranchName::new(base).map_err(|e| {
                ConfigError::InvalidValue(format!("invalid base branch name: {}", e))
            })?;
        }

        if let Some(remote) = &self.remote {
            if remote.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "remote cannot be empty".to_string(),
                ));
            }
        }

        if let Some(pull) = &self.pull {
            pull.validate()?;
        }

        Ok(())
    }
}

/// Pull request defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PullDefaults {
    /// Allow updating an existing head branch
    pub upsert: Option<bool>,

    /// Enable auto-merge after publishing
    pub auto_merge: Option<bool>,

    /// Merge method for auto-merge ("merge", "squash" or "rebase")
    pub merge_method: Option<String>,
}

impl PullDefaults {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(method) = &self.merge_method {
            method
                .parse::<MergeMethod>()
                .map_err(ConfigError::InvalidValue)?;
        }
        Ok(())
    }
}

/// Forge-specific repository configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ForgeRepoConfig {
    /// Override owner/org
    pub owner: Option<String>,

    /// Override repository name
    pub repo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    mod global_config {
        use super::*;

        #[test]
        fn defaults_are_valid() {
            assert!(GlobalConfig::default().validate().is_ok());
        }

        #[test]
        fn zero_concurrency_rejected() {
            let config = GlobalConfig {
                upload_concurrency: Some(0),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn non_http_api_base_rejected() {
            let config = GlobalConfig {
                api_base: Some("github.example.com".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn debug_redacts_token() {
            let config = GlobalConfig {
                token: Some("ghp_secret".to_string()),
                ..Default::default()
            };
            let output = format!("{:?}", config);
            assert!(!output.contains("ghp_secret"));
            assert!(output.contains("has_token"));
        }

        #[test]
        fn roundtrip() {
            let config = GlobalConfig {
                api_base: Some("https://github.example.com/api/v3".to_string()),
                token: None,
                upload_concurrency: Some(8),
                pull: Some(PullDefaults {
                    upsert: Some(true),
                    auto_merge: Some(false),
                    merge_method: Some("rebase".to_string()),
                }),
            };

            let toml = toml::to_string_pretty(&config).unwrap();
            let parsed: GlobalConfig = toml::from_str(&toml).unwrap();
            assert_eq!(config, parsed);
        }
    }

    mod repo_config {
        use super::*;

        #[test]
        fn invalid_base() {
            let config = RepoConfig {
                base: Some("invalid..name".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn empty_remote_rejected() {
            let config = RepoConfig {
                remote: Some("".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn unknown_merge_method_rejected() {
            let config = RepoConfig {
                pull: Some(PullDefaults {
                    merge_method: Some("octopus".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn reject_unknown_fields() {
            let toml = r#"
                base = "main"
                trunk = "main"
            "#;

            let result: Result<RepoConfig, _> = toml::from_str(toml);
            assert!(result.is_err());
        }
    }
}
