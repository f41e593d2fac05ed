//! engine::token
//!
//! API credentials and endpoint selection.
//!
//! Token precedence: `--token`, then `EDGE_API_TOKEN`, then the selected
//! profile (`--profile`, else `default_profile`) in the config file.
//!
//! Endpoint precedence: `--api`, then `EDGE_API_ENDPOINT`, then the config
//! file, then the built-in default.

use std::fmt;

use super::EngineError;
use crate::core::config::Config;

/// Environment variable consulted for the token.
pub const TOKEN_ENV: &str = "EDGE_API_TOKEN";

/// Environment variable consulted for the API endpoint.
pub const ENDPOINT_ENV: &str = "EDGE_API_ENDPOINT";

/// Where a token came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Flag,
    Env,
    Profile(String),
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Flag => write!(f, "--token"),
            TokenSource::Env => write!(f, "{}", TOKEN_ENV),
            TokenSource::Profile(name) => write!(f, "profile '{}'", name),
        }
    }
}

/// Picks the API token.
#[derive(Clone)]
pub struct TokenResolver<'a> {
    flag: Option<&'a str>,
    env: Option<&'a str>,
    profile: Option<&'a str>,
    config: &'a Config,
}

impl<'a> TokenResolver<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            flag: None,
            env: None,
            profile: None,
            config,
        }
    }

    pub fn flag(mut self, value: Option<&'a str>) -> Self {
        self.flag = value;
        self
    }

    pub fn env(mut self, value: Option<&'a str>) -> Self {
        self.env = value;
        self
    }

    pub fn profile(mut self, name: Option<&'a str>) -> Self {
        self.profile = name;
        self
    }

    /// The token and where it came from.
    ///
    /// # Errors
    ///
    /// `NoToken` when no source supplies a non-blank token.
    pub fn resolve(&self) -> Result<(String, TokenSource), EngineError> {
        let present = |v: Option<&'a str>| v.map(str::trim).filter(|v| !v.is_empty());

        if let Some(token) = present(self.flag) {
            return Ok((token.to_string(), TokenSource::Flag));
        }
        if let Some(token) = present(self.env) {
            return Ok((token.to_string(), TokenSource::Env));
        }

        let profile = self
            .profile
            .or(self.config.user.default_profile.as_deref());
        match (profile, present(self.config.profile_token(self.profile))) {
            (Some(name), Some(token)) => {
                Ok((token.to_string(), TokenSource::Profile(name.to_string())))
            }
            _ => Err(EngineError::NoToken),
        }
    }
}

/// The API endpoint after applying precedence.
pub fn resolve_endpoint(flag: Option<&str>, env: Option<&str>, config: &Config) -> String {
    [flag, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or_else(|| config.api_endpoint())
        .to_string()
}
