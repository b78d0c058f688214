//! Settings persistence - load and save settings to disk.
//!
//! Settings are stored in the platform-specific configuration folder:
//! - macOS: ~/Library/Application Support/com.samara.Samara/
//! - Windows: %APPDATA%/samara/Samara/config/
//! - Linux: ~/.config/samara/
//!
//! Values are layered: file, then `SAMARA_*` environment variables, then
//! command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use samara_map::LlmSettings;
use samara_merge::{DEFAULT_RIGHT_SUFFIX, DEFAULT_SEPARATOR, MergeOptions};
use serde::{Deserialize, Serialize};

use crate::cli::MatcherArgs;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "samara";
const APP_NAME: &str = "Samara";
const CONFIG_FILENAME: &str = "settings.toml";

pub const ENV_API_KEY: &str = "SAMARA_LLM_API_KEY";
pub const ENV_ENDPOINT: &str = "SAMARA_LLM_ENDPOINT";
pub const ENV_MODEL: &str = "SAMARA_LLM_MODEL";

/// Everything read from `settings.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub llm: LlmSettings,
    pub merge: MergeSettings,
}

/// `[merge]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeSettings {
    pub separator: String,
    pub right_suffix: String,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            right_suffix: DEFAULT_RIGHT_SUFFIX.to_string(),
        }
    }
}

impl MergeSettings {
    pub fn options(&self) -> MergeOptions {
        MergeOptions::default()
            .with_separator(self.separator.as_str())
            .with_right_suffix(self.right_suffix.as_str())
    }
}

impl Settings {
    /// Applies `SAMARA_*` overrides read through `lookup`.
    ///
    /// Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(key) = get(ENV_API_KEY) {
            self.llm.api_key = Some(key);
        }
        if let Some(endpoint) = get(ENV_ENDPOINT) {
            self.llm.endpoint = endpoint;
        }
        if let Some(model) = get(ENV_MODEL) {
            self.llm.model = model;
        }
    }

    /// Applies matcher flags; `--offline` turns the hosted model off.
    pub fn apply_matcher_args(&mut self, args: &MatcherArgs) {
        if args.offline {
            self.llm.enabled = false;
        }
        if let Some(model) = &args.model {
            self.llm.model.clone_from(model);
        }
        if let Some(endpoint) = &args.endpoint {
            self.llm.endpoint.clone_from(endpoint);
        }
    }

    /// Copy safe to print: the API key is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.llm.api_key().is_some() {
            copy.llm.api_key = Some(crate::logging::REDACTED_VALUE.to_string());
        }
        copy
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize settings")
    }
}

/// Get the path to the per-user settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `path`.
///
/// Returns default settings if the file doesn't exist or cannot be parsed.
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "failed to parse settings file, using defaults");
                Settings::default()
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            Settings::default()
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "failed to read settings file, using defaults");
            Settings::default()
        }
    }
}

/// Loads the file (explicit path or per-user default) and applies the
/// process environment.
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    let mut settings = match explicit.map(Path::to_path_buf).or_else(settings_path) {
        Some(path) => load_settings_from(&path),
        None => {
            tracing::warn!("could not determine settings path, using defaults");
            Settings::default()
        }
    };
    settings.apply_env(|key| std::env::var(key).ok());
    settings
}

/// Save settings to `path`, creating the parent directory if needed.
///
/// Refuses to replace an existing file unless `overwrite` is set.
pub fn save_settings_to(path: &Path, settings: &Settings, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        bail!(
            "settings file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory {}", parent.display()))?;
    }
    fs::write(path, settings.to_toml()?)
        .with_context(|| format!("write settings file {}", path.display()))?;
    tracing::info!(path = %path.display(), "saved settings");
    Ok(())
}
