//! Configuration management.
//!
//! Settings live in a small JSON file, by default `~/.tasksync/config.json`.
//! Only connection settings are stored there; todos are never cached
//! locally.
//!
//! Resolution priority for every setting:
//! 1. Explicit value (CLI flag, or its environment variable via clap)
//! 2. Config file
//! 3. Built-in default (the user id has none)

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Default REST endpoint of the todo collection.
pub const DEFAULT_API_URL: &str = "https://mate.academy/students-api";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Contents of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl TasksConfig {
    /// Overlay the values set in `other` onto `self`.
    #[must_use]
    pub fn merged(self, other: &Self) -> Self {
        Self {
            api_url: other.api_url.clone().or(self.api_url),
            user_id: other.user_id.or(self.user_id),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
        }
    }
}

/// Fully resolved connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub api_url: String,
    pub user_id: i64,
    #[serde(with = "secs")]
    pub timeout: Duration,
}

mod secs {
    use serde::Serializer;
    use std::time::Duration;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }
}

/// Global tasksync directory (`~/.tasksync`).
#[must_use]
pub fn global_tasksync_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".tasksync"))
}

/// Resolve the config file path.
///
/// # Errors
///
/// Returns `Error::Config` if no explicit path is given and the home
/// directory cannot be determined.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(path.to_path_buf());
    }

    global_tasksync_dir()
        .map(|dir| dir.join("config.json"))
        .ok_or_else(|| Error::Config("Could not determine home directory".into()))
}

/// Load the config file. A missing file yields the default config.
///
/// # Errors
///
/// Returns `Error::ConfigFile` if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<TasksConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(TasksConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| Error::ConfigFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| Error::ConfigFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Write the config file, creating its directory if needed.
///
/// # Errors
///
/// Returns `Error::Config` if the directory or file cannot be written.
pub fn save_config(path: &Path, config: &TasksConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
    }

    let content = serde_json::to_string_pretty(config)?;

    fs::write(path, content)
        .map_err(|e| Error::Config(format!("Failed to write config file: {e}")))?;

    debug!(path = %path.display(), "Config saved");
    Ok(())
}

/// Merge `update` into the stored config and save the result.
///
/// # Errors
///
/// Propagates load and save failures.
pub fn update_config(path: &Path, update: &TasksConfig) -> Result<TasksConfig> {
    let merged = load_config(path)?.merged(update);
    save_config(path, &merged)?;
    Ok(merged)
}

/// Remove the config file. Succeeds if it does not exist.
///
/// # Errors
///
/// Returns `Error::Io` if the file exists but cannot be removed.
pub fn reset_config(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Resolve settings from explicit values and the stored config.
///
/// # Errors
///
/// Returns `Error::NotConfigured` if no user id is available.
pub fn resolve_settings(explicit: &TasksConfig, file: &TasksConfig) -> Result<Settings> {
    let effective = file.clone().merged(explicit);

    let api_url = effective
        .api_url
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let user_id = effective.user_id.ok_or(Error::NotConfigured)?;

    let timeout = Duration::from_secs(effective.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

    Ok(Settings {
        api_url,
        user_id,
        timeout,
    })
}
