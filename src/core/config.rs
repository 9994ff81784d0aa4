//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! The token is the one setting without a default. It comes from, in order:
//! a config file named with `-c`, the `SLACK_TOKEN` env var, or
//! `~/.slacky/config.toml`. A file named on the command line must exist and
//! parse; the default file is optional.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::slack::DEFAULT_SLACK_BASE_URL;
use crate::core::directory::DirectoryMode;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SlackyConfig {
    #[serde(default)]
    pub slack: SlackConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SlackConfig {
    pub token: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub directory: Option<DirectoryMode>,
    pub history_count: Option<usize>,
    pub self_label: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_HISTORY_COUNT: usize = 10;
pub const DEFAULT_SELF_LABEL: &str = "me";
pub const TOKEN_ENV_VAR: &str = "SLACK_TOKEN";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub token: String,
    pub base_url: String,
    pub directory: DirectoryMode,
    pub history_count: usize,
    pub self_label: String,
}

/// Settings given on the command line (None = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub config_file: Option<PathBuf>,
    pub directory: Option<DirectoryMode>,
    pub history_count: Option<usize>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    MissingToken,
    /// A config file named on the command line has no `[slack] token`
    NoTokenInFile(PathBuf),
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "cannot read config {}: {e}", path.display()),
            ConfigError::Parse(path, e) => {
                write!(f, "malformed config {}: {e}", path.display())
            }
            ConfigError::MissingToken => write!(
                f,
                "no Slack token: set {TOKEN_ENV_VAR} or pass a config file with -c"
            ),
            ConfigError::NoTokenInFile(path) => {
                write!(f, "config {} has no [slack] token", path.display())
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "invalid value for {key}: {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.slacky/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".slacky").join("config.toml"))
}

/// Load and parse a config file that must exist.
pub fn load_config_file(path: &Path) -> Result<SlackyConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    let config: SlackyConfig =
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load the config the CLI asked for, or the default file if present.
///
/// An explicitly named file is required; the default file is not, so a
/// missing `~/.slacky/config.toml` yields `SlackyConfig::default()`.
pub fn load_config(explicit: Option<&Path>) -> Result<SlackyConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }
    match default_config_path() {
        Some(path) if path.exists() => load_config_file(&path),
        _ => {
            debug!("No default config file, using defaults");
            Ok(SlackyConfig::default())
        }
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `env` looks up environment variables; production passes
/// `|k| std::env::var(k).ok()`.
pub fn resolve(
    config: &SlackyConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    // Token: named file → env → default file. A named file must carry it.
    let file_token = config.slack.token.clone().filter(|t| !t.trim().is_empty());
    let token = match &cli.config_file {
        Some(path) => file_token.ok_or_else(|| ConfigError::NoTokenInFile(path.clone()))?,
        None => env(TOKEN_ENV_VAR)
            .filter(|t| !t.trim().is_empty())
            .or(file_token)
            .ok_or(ConfigError::MissingToken)?,
    };

    // Base URL: env → config → default
    let base_url = env("SLACK_BASE_URL")
        .or_else(|| config.slack.base_url.clone())
        .unwrap_or_else(|| DEFAULT_SLACK_BASE_URL.to_string());

    // Directory mode: CLI → env → config → default
    let directory = match cli.directory {
        Some(mode) => mode,
        None => match env("SLACKY_DIRECTORY") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SLACKY_DIRECTORY",
                value,
            })?,
            None => config.ui.directory.unwrap_or_default(),
        },
    };

    let history_count = cli
        .history_count
        .or(config.ui.history_count)
        .unwrap_or(DEFAULT_HISTORY_COUNT);
    if history_count == 0 {
        return Err(ConfigError::InvalidValue {
            key: "history_count",
            value: history_count.to_string(),
        });
    }

    let self_label = config
        .ui
        .self_label
        .clone()
        .unwrap_or_else(|| DEFAULT_SELF_LABEL.to_string());

    Ok(ResolvedConfig {
        token,
        base_url,
        directory,
        history_count,
        self_label,
    })
}
