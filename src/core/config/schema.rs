//! core::config::schema
//!
//! Configuration schema types.
//!
//! # User Config
//!
//! Located at (in order of precedence):
//! 1. `$EDGECTL_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/edgectl/config.toml`
//! 3. `~/.edgectl/config.toml` (canonical write location)
//!
//! # Validation
//!
//! Config values are validated after parsing: the endpoint must be an
//! http(s) URL, and the default profile must name a declared profile.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// User configuration.
///
/// # Example
///
/// ```toml
/// api_endpoint = "https://api.edgeplatform.dev"
/// default_profile = "work"
///
/// [profiles.work]
/// token = "abc123"
/// email = "ops@example.com"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct UserConfig {
    /// Base URL of the platform API
    pub api_endpoint: Option<String>,

    /// Profile used when no token is given on the command line or in the
    /// environment
    pub default_profile: Option<String>,

    /// Named credential sets
    pub profiles: BTreeMap<String, Profile>,
}

impl UserConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = &self.api_endpoint {
            validate_endpoint(endpoint)?;
        }

        for (name, profile) in &self.profiles {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "profile names cannot be empty".to_string(),
                ));
            }
            profile.validate(name)?;
        }

        if let Some(default) = &self.default_profile {
            if !self.profiles.contains_key(default) {
                return Err(ConfigError::InvalidValue(format!(
                    "default_profile '{}' is not a declared profile",
                    default
                )));
            }
        }

        Ok(())
    }
}

/// A named set of credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    /// API token
    pub token: Option<String>,

    /// Account email, informational only
    pub email: Option<String>,
}

impl Profile {
    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if let Some(token) = &self.token {
            if token.trim().is_empty() {
                return Err(ConfigError::InvalidValue(format!(
                    "profile '{}' has an empty token",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Check that an endpoint is an absolute http(s) URL.
pub fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    let rest = endpoint
        .strip_prefix("https://")
        .or_else(|| endpoint.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(ConfigError::InvalidValue(format!(
            "api_endpoint '{}' must be an http:// or https:// URL",
            endpoint
        ))),
    }
}
