//! Settings loading and validation.
//!
//! Settings come from a `config.toml` file, overlaid with `MR_INFO_*`
//! environment variables, and are resolved once at startup. Components receive
//! the parts they need by reference.

mod duration;
mod error;
mod sections;

pub use duration::parse_duration;
pub use error::ConfigError;
pub use sections::{
    default_io_file, GitLabSettings, JiraSettings, MergeRequestSettings, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TITLE_REGEX, DEFAULT_UPDATED_DURATION, DEFAULT_VERSION_REGEX,
    DEFAULT_VERSION_URL_REGEX,
};

use crate::runner::Mode;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// Prefix of environment variables overriding file settings.
pub const ENV_PREFIX: &str = "MR_INFO_";

/// File name looked up in the default configuration directories.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Fully resolved settings for a run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Enables debug logging.
    pub debug: bool,

    /// Snapshot path written by `fetch` and read by `push`.
    pub io_file: PathBuf,

    /// GitLab section.
    pub gitlab: GitLabSettings,

    /// Jira section.
    pub jira: JiraSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            io_file: default_io_file(),
            gitlab: GitLabSettings::default(),
            jira: JiraSettings::default(),
        }
    }
}

/// Settings together with the file they were read from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    /// The resolved settings.
    pub settings: Settings,

    /// Configuration file used, `None` when running on defaults and environment.
    pub source: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from `explicit` or the first default location that exists,
    /// then applies environment overrides.
    ///
    /// Default locations, in order: `/etc/mr-info/config.toml`,
    /// `$HOME/.mr-info/config.toml`, `./config.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicit file is missing, a file cannot be
    /// read or parsed, or an environment override is malformed.
    pub fn load(explicit: Option<&Path>) -> Result<LoadedSettings, ConfigError> {
        let source = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigError::MissingFile {
                    path: path.display().to_string(),
                });
            }
            Some(path) => Some(path.to_path_buf()),
            None => default_search_paths().into_iter().find(|p| p.is_file()),
        };

        let mut settings = match &source {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env_overrides()?;

        Ok(LoadedSettings { settings, source })
    }

    /// Reads settings from a TOML file without environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::TomlError {
            path: path.display().to_string(),
            source,
        })
    }

    /// Overlays `MR_INFO_*` environment variables.
    ///
    /// List values (`MR_INFO_GITLAB_PROJECTS`, `MR_INFO_JIRA_TARGETS`) are comma
    /// separated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if `MR_INFO_DEBUG` is not a boolean.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = env_value("DEBUG") {
            self.debug = parse_bool(&value).ok_or_else(|| ConfigError::ValidationError {
                key: format!("{ENV_PREFIX}DEBUG"),
                message: format!("expected a boolean, got '{value}'"),
            })?;
        }
        if let Some(value) = env_value("IO_FILE") {
            self.io_file = PathBuf::from(value);
        }
        if let Some(value) = env_value("GITLAB_URL") {
            self.gitlab.url = value;
        }
        if let Some(value) = env_value("GITLAB_TOKEN") {
            self.gitlab.token = value;
        }
        if let Some(value) = env_value("GITLAB_PROJECTS") {
            self.gitlab.projects = split_list(&value);
        }
        if let Some(value) = env_value("JIRA_URL") {
            self.jira.url = value;
        }
        if let Some(value) = env_value("JIRA_TOKEN") {
            self.jira.token = value;
        }
        if let Some(value) = env_value("JIRA_TARGETS") {
            self.jira.targets = split_list(&value);
        }
        Ok(())
    }

    /// Checks that everything `mode` needs is configured.
    ///
    /// # Errors
    ///
    /// Returns the first missing or invalid setting.
    pub fn validate_for(&self, mode: Mode) -> Result<(), ConfigError> {
        if mode.fetches() {
            require_url("gitlab.url", &self.gitlab.url)?;
            require("gitlab.token", &self.gitlab.token)?;
            if self.gitlab.projects.is_empty() {
                return Err(ConfigError::MissingSetting {
                    key: "gitlab.projects".to_string(),
                });
            }
        }
        if mode.pushes() {
            require_url("jira.url", &self.jira.url)?;
            require("jira.token", &self.jira.token)?;
        }
        if mode.writes_snapshot() || mode.reads_snapshot() {
            require("io_file", &self.io_file.to_string_lossy())?;
        }
        Ok(())
    }
}

fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![Path::new("/etc/mr-info").join(CONFIG_FILE_NAME)];
    if let Some(home) = std::env::var_os("HOME") {
        paths.push(PathBuf::from(home).join(".mr-info").join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    paths
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{name}"))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn require(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingSetting {
            key: key.to_string(),
        });
    }
    Ok(())
}

fn require_url(key: &str, value: &str) -> Result<(), ConfigError> {
    require(key, value)?;
    Url::parse(value).map_err(|e| ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("'{value}' is not a valid URL: {e}"),
    })?;
    Ok(())
}
