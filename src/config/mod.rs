//
//  storedesk
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loading, saving and accessing the `sd` configuration, a TOML file in the
//! platform configuration directory.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/storedesk/config.toml`
//! - **macOS**: `~/Library/Application Support/storedesk/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\storedesk\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [api]
//! base_url = "https://shop.example.com/admin-api"
//! timeout_secs = 30
//! login_path = "/login"
//! public_paths = ["/auth/login", "/auth/captcha", "/public/"]
//!
//! [session]
//! backend = "keyring"
//! ```
//!
//! A missing file means defaults. `STOREDESK_API_BASE` in the environment
//! beats `api.base_url`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use storedesk::config::Config;
//!
//! let mut config = Config::load()?;
//! println!("Backend: {}", config.base_url());
//!
//! config.set("api.timeout_secs", "10")?;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O
//! - [`endpoint`]: Base URL defaults and normalization

mod endpoint;
mod file;

pub use endpoint::*;
pub use file::*;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::transport::DEFAULT_TIMEOUT_SECS;
use crate::auth::{LOGIN_PATH, PUBLIC_PATHS};

/// Name used for the configuration and data directories.
const DIR_NAME: &str = "storedesk";

/// Every key understood by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "api.base_url",
    "api.timeout_secs",
    "api.login_path",
    "api.public_paths",
    "session.backend",
];

/// Global configuration for `sd`.
///
/// # Examples
///
/// ```rust
/// use storedesk::config::{Config, SessionBackend};
///
/// let config = Config::default();
/// assert_eq!(config.api.timeout_secs, 30);
/// assert_eq!(config.session.backend, SessionBackend::Keyring);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the session lives.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is joined to. May carry a path prefix.
    ///
    /// `None` falls back to [`DEFAULT_BASE_URL`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// The login view users are sent back to when the session ends.
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Path prefixes that never require a token.
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_login_path() -> String {
    LOGIN_PATH.to_string()
}

fn default_public_paths() -> Vec<String> {
    PUBLIC_PATHS.iter().map(|p| p.to_string()).collect()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout(),
            login_path: default_login_path(),
            public_paths: default_public_paths(),
        }
    }
}

/// Session persistence settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Which store holds the token and the cached profile.
    #[serde(default)]
    pub backend: SessionBackend,
}

/// Where the session is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// The operating system keyring.
    #[default]
    Keyring,
    /// A JSON file in the data directory, for hosts without a keyring.
    File,
    /// Process memory only; nothing survives the command.
    Memory,
}

impl fmt::Display for SessionBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionBackend::Keyring => write!(f, "keyring"),
            SessionBackend::File => write!(f, "file"),
            SessionBackend::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for SessionBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "keyring" => Ok(SessionBackend::Keyring),
            "file" => Ok(SessionBackend::File),
            "memory" => Ok(SessionBackend::Memory),
            other => bail!(
                "Unknown session backend '{}'. Expected keyring, file or memory",
                other
            ),
        }
    }
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// A missing file is not an error; defaults are used.
    ///
    /// # Errors
    ///
    /// The file exists but cannot be read or is not valid TOML.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        match read_config_file(path)? {
            Some(content) => toml::from_str(&content)
                .with_context(|| format!("Invalid configuration in {}", path.display())),
            None => Ok(Self::default()),
        }
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Returns the path to the configuration file.
    ///
    /// The file may not exist; this only says where it would be.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", DIR_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the path to the data directory, where the file session store
    /// keeps its state.
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", DIR_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// The effective base URL.
    ///
    /// `STOREDESK_API_BASE` wins over the file, which wins over
    /// [`DEFAULT_BASE_URL`].
    pub fn base_url(&self) -> String {
        base_url_from_env()
            .or_else(|| self.api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Gets a configuration value by dotted key.
    ///
    /// List values are joined with commas. Unset optional values and unknown
    /// keys return `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use storedesk::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.get("session.backend"), Some("keyring".to_string()));
    /// assert_eq!(config.get("api.base_url"), None);
    /// assert_eq!(config.get("nope"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api.base_url" => self.api.base_url.clone(),
            "api.timeout_secs" => Some(self.api.timeout_secs.to_string()),
            "api.login_path" => Some(self.api.login_path.clone()),
            "api.public_paths" => Some(self.api.public_paths.join(",")),
            "session.backend" => Some(self.session.backend.to_string()),
            _ => None,
        }
    }

    /// Sets a configuration value by dotted key.
    ///
    /// Values are validated: the base URL is normalized, the timeout must be
    /// a positive integer, the public paths are a comma-separated list.
    /// Changes are only persisted by [`Config::save`].
    ///
    /// # Errors
    ///
    /// Unknown key or invalid value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => {
                self.api.base_url = Some(normalize_base_url(value)?);
            }
            "api.timeout_secs" => {
                let secs: u64 = value
                    .trim()
                    .parse()
                    .with_context(|| format!("Timeout must be a number of seconds: {}", value))?;
                if secs == 0 {
                    bail!("Timeout must be at least one second");
                }
                self.api.timeout_secs = secs;
            }
            "api.login_path" => {
                self.api.login_path = crate::api::request::normalize_path(value.trim());
            }
            "api.public_paths" => {
                self.api.public_paths = value
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "session.backend" => {
                self.session.backend = value.parse()?;
            }
            other => bail!(
                "Unknown config key '{}'. Valid keys: {}",
                other,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.api.base_url.is_none());
        assert_eq!(config.api.login_path, "/login");
        assert_eq!(config.api.public_paths.len(), 3);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\nbackend = \"file\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.session.backend, SessionBackend::File);
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.set("api.base_url", "shop.example.com/api/").unwrap();
        config.set("api.public_paths", "/auth/login, /open/").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(
            loaded.api.base_url.as_deref(),
            Some("http://shop.example.com/api")
        );
        assert_eq!(loaded.api.public_paths, vec!["/auth/login", "/open/"]);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_set_validates() {
        let mut config = Config::default();
        assert!(config.set("api.timeout_secs", "0").is_err());
        assert!(config.set("api.timeout_secs", "soon").is_err());
        assert!(config.set("session.backend", "cookie").is_err());
        assert!(config.set("core.editor", "vim").is_err());

        config.set("api.login_path", "signin").unwrap();
        assert_eq!(config.get("api.login_path").as_deref(), Some("/signin"));
    }

    #[test]
    fn test_every_key_is_readable() {
        let mut config = Config::default();
        config.set("api.base_url", "http://localhost:9000").unwrap();
        for key in CONFIG_KEYS {
            assert!(config.get(key).is_some(), "{} should be readable", key);
        }
    }
}
