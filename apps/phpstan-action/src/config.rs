//! Configuration discovery and effective settings resolution.
//!
//! Settings come from CLI flags (which clap also binds to the GitHub Actions
//! environment variables), then an optional `phpstan-action.toml|yaml|yml`
//! in the config directory, then defaults:
//! - `check_name`: `PHPStan`
//! - `timeout_secs`: 30
//! - `api_url`: `https://api.github.com`
//!
//! Overrides precedence: CLI/env > config file > defaults. Required keys are
//! validated here, before any report is read.

use crate::github::DEFAULT_API_URL;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CHECK_NAME: &str = "PHPStan";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONFIG_FILES: [&str; 3] = [
    "phpstan-action.toml",
    "phpstan-action.yaml",
    "phpstan-action.yml",
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing config key: {0}")]
    MissingKey(&'static str),
    #[error("invalid github.repository '{0}': expected owner/repo")]
    InvalidRepository(String),
    #[error("invalid timeout_secs '{0}': must be at least 1")]
    InvalidTimeout(u64),
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
/// Root configuration loaded from `phpstan-action.toml|yaml`.
pub struct ActionConfig {
    pub workspace: Option<String>,
    pub check_name: Option<String>,
    pub timeout_secs: Option<u64>,
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fully-resolved settings shared by both publishers.
pub struct Effective {
    pub workspace: Option<PathBuf>,
    pub check_name: String,
    pub timeout: Duration,
    pub api_url: String,
}

impl Effective {
    /// Workspace root every finding path is made relative to.
    pub fn workspace(&self) -> Result<&Path, ConfigError> {
        self.workspace
            .as_deref()
            .ok_or(ConfigError::MissingKey("github.workspace"))
    }
}

#[derive(Clone, PartialEq, Eq)]
/// Coordinates and credentials for the check run variant.
pub struct GitHubSettings {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub head_sha: String,
    pub api_url: String,
    pub check_name: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for GitHubSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubSettings")
            .field("token", &"***")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("head_sha", &self.head_sha)
            .field("api_url", &self.api_url)
            .field("check_name", &self.check_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GitHubSettings {
    /// Validate the check-run keys on top of `eff`.
    pub fn resolve(
        eff: &Effective,
        token: Option<&str>,
        repository: Option<&str>,
        sha: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let token = required(token, "github.token")?;
        let repository = required(repository, "github.repository")?;
        let head_sha = required(sha, "github.sha")?;
        let (owner, repo) = split_repository(repository)?;
        Ok(GitHubSettings {
            token: token.to_string(),
            owner,
            repo,
            head_sha: head_sha.to_string(),
            api_url: eff.api_url.clone(),
            check_name: eff.check_name.clone(),
            timeout: eff.timeout,
        })
    }
}

fn required<'a>(value: Option<&'a str>, key: &'static str) -> Result<&'a str, ConfigError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::MissingKey(key)),
    }
}

/// Split `owner/repo` on the first `/`.
pub fn split_repository(repository: &str) -> Result<(String, String), ConfigError> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ConfigError::InvalidRepository(repository.to_string())),
    }
}

/// Load `ActionConfig` from the first config file present in `dir`.
pub fn load_config(dir: &Path) -> Result<Option<ActionConfig>, ConfigError> {
    for name in CONFIG_FILES {
        let path = dir.join(name);
        if !path.is_file() {
            continue;
        }
        let s = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let parsed = if name.ends_with(".toml") {
            toml::from_str::<ActionConfig>(&s).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<ActionConfig>(&s).map_err(|e| e.to_string())
        };
        return parsed
            .map(Some)
            .map_err(|message| ConfigError::Parse { path, message });
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, the config file, and defaults.
pub fn resolve_effective(
    config_dir: Option<&str>,
    cli_workspace: Option<&str>,
    cli_check_name: Option<&str>,
    cli_timeout_secs: Option<u64>,
    cli_api_url: Option<&str>,
) -> Result<Effective, ConfigError> {
    let dir = PathBuf::from(config_dir.unwrap_or("."));
    let cfg = load_config(&dir)?.unwrap_or_default();
    if cfg != ActionConfig::default() {
        tracing::debug!(dir = %dir.display(), "loaded config file");
    }

    let non_blank = |s: &&str| !s.trim().is_empty();
    let workspace = cli_workspace
        .filter(non_blank)
        .map(str::to_string)
        .or(cfg.workspace)
        .map(PathBuf::from);
    let check_name = cli_check_name
        .filter(non_blank)
        .map(str::to_string)
        .or(cfg.check_name)
        .unwrap_or_else(|| DEFAULT_CHECK_NAME.to_string());
    let timeout_secs = cli_timeout_secs
        .or(cfg.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(ConfigError::InvalidTimeout(timeout_secs));
    }
    let api_url = cli_api_url
        .filter(non_blank)
        .map(str::to_string)
        .or(cfg.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    Ok(Effective {
        workspace,
        check_name,
        timeout: Duration::from_secs(timeout_secs),
        api_url,
    })
}
