//
//  bitly-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads and saves the CLI's TOML configuration from the platform config
//! directory.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/bitly/config.toml`
//! - **macOS**: `~/Library/Application Support/bitly/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bitly\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [api]
//! base_url = "https://api-ssl.bitly.com/v4/"
//! access_token = "0123456789abcdef"
//! default_group = "Ba1bc23dE4F"
//!
//! [output]
//! format = "table"
//! ```
//!
//! The configuration is read once per process and handed to the client by
//! value; editing the file never affects a client that already exists.
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations

mod file;

pub use file::*;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::BITLY_API_BASE;

/// Global configuration container.
///
/// Every section uses `#[serde(default)]`, so a missing file or a file with
/// only some keys still loads.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Connection settings for the Bitly API.
    #[serde(default)]
    pub api: ApiConfig,

    /// Output preferences.
    #[serde(default)]
    pub output: OutputConfig,
}

/// The `[api]` section.
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `base_url` | `https://api-ssl.bitly.com/v4/` |
/// | `access_token` | `None` |
/// | `default_group` | `None` (the user's default group is used) |
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Generic access token from https://bitly.is/accesstoken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Group GUID used when a command needs a group and none is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_group: Option<String>,
}

fn default_base_url() -> String {
    BITLY_API_BASE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            default_group: None,
        }
    }
}

/// The `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// `table` or `json`.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "table".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::get`] and [`Config::set`].
    pub const KEYS: &'static [&'static str] =
        &["base_url", "access_token", "default_group", "format"];

    /// Loads configuration from the default location.
    ///
    /// A missing file yields [`Config::default`].
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`, or defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = read_config_file(path)?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Returns the path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Gets a configuration value by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "base_url" => Some(self.api.base_url.clone()),
            "access_token" => self.api.access_token.clone(),
            "default_group" => self.api.default_group.clone(),
            "format" => Some(self.output.format.clone()),
            _ => None,
        }
    }

    /// Sets a configuration value by key.
    ///
    /// Returns `false` when the key is unknown.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        match key {
            "base_url" => {
                self.api.base_url = value;
                true
            }
            "access_token" => {
                self.api.access_token = Some(value);
                true
            }
            "default_group" => {
                self.api.default_group = Some(value);
                true
            }
            "format" => {
                self.output.format = value;
                true
            }
            _ => false,
        }
    }

    /// Resets a key to its default. Returns `false` when the key is unknown.
    pub fn unset(&mut self, key: &str) -> bool {
        match key {
            "base_url" => self.api.base_url = default_base_url(),
            "access_token" => self.api.access_token = None,
            "default_group" => self.api.default_group = None,
            "format" => self.output.format = default_format(),
            _ => return false,
        }
        true
    }

    /// Returns the `[api]` section with `token` applied over the stored one.
    pub fn api_with_token(&self, token: Option<&str>) -> ApiConfig {
        let mut api = self.api.clone();
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            api.access_token = Some(token.to_string());
        }
        api
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, BITLY_API_BASE);
        assert!(config.api.access_token.is_none());
        assert_eq!(config.output.format, "table");
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        assert!(config.set("access_token", "tok".to_string()));
        assert!(config.set("default_group", "Ba1".to_string()));
        assert!(config.set("format", "json".to_string()));
        assert!(!config.set("editor", "vim".to_string()));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.get("access_token").as_deref(), Some("tok"));
        assert_eq!(loaded.get("nope"), None);
    }

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str("[api]\naccess_token = \"abc\"\n").unwrap();
        assert_eq!(config.api.base_url, BITLY_API_BASE);
        assert_eq!(config.api.access_token.as_deref(), Some("abc"));
        assert_eq!(config.output.format, "table");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_unset_restores_defaults() {
        let mut config = Config::default();
        config.set("base_url", "http://localhost:9000/v4/".to_string());
        config.set("access_token", "tok".to_string());
        assert!(config.unset("base_url"));
        assert!(config.unset("access_token"));
        assert!(!config.unset("nope"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_token_override() {
        let mut config = Config::default();
        config.set("access_token", "stored".to_string());
        assert_eq!(config.api_with_token(Some("flag")).access_token.as_deref(), Some("flag"));
        assert_eq!(config.api_with_token(Some("")).access_token.as_deref(), Some("stored"));
        assert_eq!(config.api_with_token(None).access_token.as_deref(), Some("stored"));
    }
}
