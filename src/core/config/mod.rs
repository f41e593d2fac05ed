//! core::config
//!
//! User configuration: API endpoint and credential profiles.
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$EDGECTL_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/edgectl/config.toml`
//! 3. `~/.edgectl/config.toml` (canonical write location)
//!
//! # Precedence
//!
//! CLI flags and environment variables override the file; that layering is
//! done by the callers (see `engine::token`). This module only supplies the
//! file values and built-in defaults.
//!
//! # Keys
//!
//! `config get/set` address values with dotted keys:
//! `api_endpoint`, `default_profile`, `profiles.<name>.token`,
//! `profiles.<name>.email`.
//!
//! # Example
//!
//! ```no_run
//! use edgectl::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("API: {}", config.api_endpoint());
//! if let Some(token) = config.profile_token(None) {
//!     println!("token has {} characters", token.len());
//! }
//! ```

pub mod schema;

pub use schema::{Profile, UserConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Endpoint used when neither flag, environment nor config supplies one.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.edgeplatform.dev";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown config key '{0}'")]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded user configuration plus where it came from.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed file contents (defaults if no file exists)
    pub user: UserConfig,
    /// Path the config was loaded from, if any
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated. A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::locate() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let user: UserConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        user.validate()?;

        Ok(Self {
            user,
            path: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file.
    fn locate() -> Option<PathBuf> {
        // 1. $EDGECTL_CONFIG
        if let Ok(path) = std::env::var("EDGECTL_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. $XDG_CONFIG_HOME/edgectl/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("edgectl/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. ~/.edgectl/config.toml
        let path = dirs::home_dir()?.join(".edgectl/config.toml");
        path.exists().then_some(path)
    }

    /// Where `save` writes: the loaded file, else `$EDGECTL_CONFIG`, else
    /// `~/.edgectl/config.toml`.
    pub fn write_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        if let Ok(path) = std::env::var("EDGECTL_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".edgectl/config.toml"))
    }

    /// Validate and write the config atomically.
    pub fn save(&mut self) -> Result<PathBuf, ConfigError> {
        self.user.validate()?;
        let path = self.write_path()?;
        write_atomic(&path, &self.user)?;
        self.path = Some(path.clone());
        Ok(path)
    }

    /// Path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The configured API endpoint, or the built-in default.
    pub fn api_endpoint(&self) -> &str {
        self.user
            .api_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_API_ENDPOINT)
    }

    /// The token of `profile`, or of the default profile when `None`.
    pub fn profile_token(&self, profile: Option<&str>) -> Option<&str> {
        let name = profile.or(self.user.default_profile.as_deref())?;
        self.user
            .profiles
            .get(name)
            .and_then(|p| p.token.as_deref())
    }

    // =========================================================================
    // Dotted-key access
    // =========================================================================

    /// Read one value by key.
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match parse_key(key)? {
            Key::ApiEndpoint => Ok(self.user.api_endpoint.clone()),
            Key::DefaultProfile => Ok(self.user.default_profile.clone()),
            Key::ProfileToken(name) => Ok(self
                .user
                .profiles
                .get(name)
                .and_then(|p| p.token.clone())),
            Key::ProfileEmail(name) => Ok(self
                .user
                .profiles
                .get(name)
                .and_then(|p| p.email.clone())),
        }
    }

    /// Set one value by key. Profiles are created on first use.
    ///
    /// The change is validated but not written; call [`Config::save`].
    /// An invalid value leaves the config untouched.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.to_string();
        let mut next = self.user.clone();
        match parse_key(key)? {
            Key::ApiEndpoint => next.api_endpoint = Some(value),
            Key::DefaultProfile => next.default_profile = Some(value),
            Key::ProfileToken(name) => {
                next.profiles.entry(name.to_string()).or_default().token = Some(value)
            }
            Key::ProfileEmail(name) => {
                next.profiles.entry(name.to_string()).or_default().email = Some(value)
            }
        }
        next.validate()?;
        self.user = next;
        Ok(())
    }

    /// Every set value as `(key, value)` pairs. Tokens are masked.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Some(endpoint) = &self.user.api_endpoint {
            out.push(("api_endpoint".to_string(), endpoint.clone()));
        }
        if let Some(profile) = &self.user.default_profile {
            out.push(("default_profile".to_string(), profile.clone()));
        }
        for (name, profile) in &self.user.profiles {
            if let Some(token) = &profile.token {
                out.push((format!("profiles.{}.token", name), mask(token)));
            }
            if let Some(email) = &profile.email {
                out.push((format!("profiles.{}.email", name), email.clone()));
            }
        }
        out
    }
}

enum Key<'a> {
    ApiEndpoint,
    DefaultProfile,
    ProfileToken(&'a str),
    ProfileEmail(&'a str),
}

fn parse_key(key: &str) -> Result<Key<'_>, ConfigError> {
    match key {
        "api_endpoint" => return Ok(Key::ApiEndpoint),
        "default_profile" => return Ok(Key::DefaultProfile),
        _ => {}
    }
    let unknown = || ConfigError::UnknownKey(key.to_string());
    let rest = key.strip_prefix("profiles.").ok_or_else(unknown)?;
    let (name, field) = rest.rsplit_once('.').ok_or_else(unknown)?;
    if name.is_empty() {
        return Err(unknown());
    }
    match field {
        "token" => Ok(Key::ProfileToken(name)),
        "email" => Ok(Key::ProfileEmail(name)),
        _ => Err(unknown()),
    }
}

/// Keep the last four characters of a secret.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

/// Write a config file atomically (temp file in the same directory, then
/// rename).
fn write_atomic<T: serde::Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

    let temp_path = path.with_extension("toml.tmp");
    let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(contents.as_bytes())
        .map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

    file.sync_all().map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
