use crate::domain::{TagPattern, DEFAULT_BREAKING_MARKERS};
use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "GIT_RELEASE_CONFIG";

/// File looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "release.toml";

/// Represents the complete configuration for git-release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub commits: CommitsConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub hooks: HooksConfig,
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

/// How release tags are named
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagConfig {
    #[serde(default = "default_tag_pattern")]
    pub pattern: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            pattern: default_tag_pattern(),
        }
    }
}

impl TagConfig {
    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::parse(&self.pattern)
    }
}

fn default_breaking_change_indicators() -> Vec<String> {
    DEFAULT_BREAKING_MARKERS
        .iter()
        .map(|m| m.to_string())
        .collect()
}

/// Configuration for conventional commit analysis.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommitsConfig {
    #[serde(default = "default_breaking_change_indicators")]
    pub breaking_change_indicators: Vec<String>,
}

impl Default for CommitsConfig {
    fn default() -> Self {
        CommitsConfig {
            breaking_change_indicators: default_breaking_change_indicators(),
        }
    }
}

fn default_changelog_path() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Relative paths resolve against the repository work tree
    #[serde(default = "default_changelog_path")]
    pub path: PathBuf,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            enabled: true,
            path: default_changelog_path(),
        }
    }
}

fn default_remote_name() -> String {
    "origin".to_string()
}

/// Remote used to fetch existing tags and publish new ones
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_name")]
    pub name: String,

    #[serde(default)]
    pub fetch: bool,

    #[serde(default)]
    pub push: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            name: default_remote_name(),
            fetch: false,
            push: false,
        }
    }
}

/// Scripts run around tag creation
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct HooksConfig {
    pub pre_tag_create: Option<String>,
    pub post_tag_create: Option<String>,
    pub post_push: Option<String>,
}

impl Config {
    /// Check settings that serde alone can't validate
    pub fn validate(&self) -> Result<()> {
        self.tag.tag_pattern()?;

        if self.remote.name.trim().is_empty() {
            return Err(ReleaseError::config("remote.name must not be empty"));
        }

        if self.changelog.enabled && self.changelog.path.as_os_str().is_empty() {
            return Err(ReleaseError::config(
                "changelog.path must not be empty when the changelog is enabled",
            ));
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. Path in the `GIT_RELEASE_CONFIG` environment variable
/// 3. `release.toml` in current directory
/// 4. `git-release/config.toml` in the user config directory
/// 5. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let Some(path) = resolve_config_path(config_path) else {
        tracing::debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| ReleaseError::config(format!("Invalid {}: {}", path.display(), e)))?;
    config.validate()?;
    Ok(config)
}

fn resolve_config_path(config_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(path.to_path_buf());
    }

    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }

    let local = Path::new(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local.to_path_buf());
    }

    dirs::config_dir()
        .map(|dir| dir.join("git-release").join("config.toml"))
        .filter(|path| path.exists())
}
