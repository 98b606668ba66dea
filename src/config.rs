//! Persisted tool configuration
//!
//! Credentials and cache settings live in a JSON file in the XDG config
//! directory (`~/.config/hubq/config.json` on Linux). A missing access token
//! is prompted for once and saved back, so later invocations run without
//! interaction. Everything downstream receives the configuration as an
//! explicit struct rather than reading ambient state.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use directories::ProjectDirs;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cache lifetime: one week, in seconds
const DEFAULT_CACHE_LIFETIME_SECS: u64 = 604_800;

/// Base URL for GitHub REST API requests
const DEFAULT_API_URL: &str = "https://api.github.com";

/// Base URL for web links shown next to results
const DEFAULT_APP_URL: &str = "https://github.com";

/// Errors that can occur while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No usable config directory on this system
    #[error("Could not determine a configuration directory")]
    NoConfigDir,

    /// Reading or writing the config file failed
    #[error("Config file I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The config file exists but is not valid JSON
    #[error("Config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// No token was supplied at the prompt
    #[error("A GitHub personal access token is required")]
    MissingToken,
}

/// Tool configuration, persisted between invocations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// GitHub personal access token used as a bearer credential
    #[serde(default)]
    pub api_key: String,
    /// Whether GET responses are cached to disk
    #[serde(default = "default_cache_enabled")]
    pub api_cache: bool,
    /// How long cached responses stay fresh, in seconds
    #[serde(default = "default_cache_lifetime")]
    pub api_cache_lifetime: u64,
    /// Base URL for API requests
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Base URL for web links in rendered output
    #[serde(default = "default_app_url")]
    pub app_url: String,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_lifetime() -> u64 {
    DEFAULT_CACHE_LIFETIME_SECS
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_app_url() -> String {
    DEFAULT_APP_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_cache: default_cache_enabled(),
            api_cache_lifetime: default_cache_lifetime(),
            api_url: default_api_url(),
            app_url: default_app_url(),
        }
    }
}

impl Config {
    /// Loads configuration from the config file, or defaults if absent
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Saves configuration to the config file as pretty JSON
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        info!("configuration saved to {}", path.display());
        Ok(())
    }

    /// Returns the path of the persisted config file
    pub fn config_path() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "hubq")?;
        Some(project_dirs.config_dir().join("config.json"))
    }

    /// Ensures an API token is present, prompting once if it is missing
    ///
    /// A token entered at the prompt is saved back to the config file so it
    /// is only asked for on first use.
    pub fn ensure_api_key(&mut self) -> Result<(), ConfigError> {
        if !self.api_key.is_empty() {
            return Ok(());
        }
        let stdin = io::stdin();
        let token = prompt_for_token(&mut stdin.lock(), &mut io::stderr())?;
        if token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        self.api_key = token;
        self.save()
    }
}

/// Prompts for a token on `output` and reads one trimmed line from `input`
fn prompt_for_token<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<String> {
    write!(
        output,
        "Enter GitHub personal access token (from https://github.com/settings/tokens): "
    )?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
