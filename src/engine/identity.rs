//! engine::identity
//!
//! Which service a command targets.
//!
//! # Precedence
//!
//! 1. `--service-id`
//! 2. `EDGE_SERVICE_ID`
//! 3. `service_id` in `edge.toml`
//!
//! Blank values count as not provided. Resolution is pure: the caller
//! gathers the raw values, asking [`ServiceIdentityResolver::needs_manifest`]
//! before loading `edge.toml`.

use std::fmt;

use super::EngineError;
use crate::core::types::ServiceId;

/// Environment variable consulted for the service id.
pub const SERVICE_ID_ENV: &str = "EDGE_SERVICE_ID";

/// Where a service id came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    Flag,
    Env,
    Manifest,
    Undefined,
}

impl fmt::Display for IdentitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentitySource::Flag => write!(f, "--service-id"),
            IdentitySource::Env => write!(f, "{}", SERVICE_ID_ENV),
            IdentitySource::Manifest => write!(f, "edge.toml"),
            IdentitySource::Undefined => write!(f, "not provided"),
        }
    }
}

/// A resolved (or missing) service id with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    pub value: Option<String>,
    pub source: IdentitySource,
}

impl ServiceIdentity {
    /// The validated service id.
    ///
    /// # Errors
    ///
    /// `NoServiceId` when undefined; `InvalidServiceId` when malformed.
    pub fn require(&self) -> Result<ServiceId, EngineError> {
        let value = self.value.as_deref().ok_or(EngineError::NoServiceId)?;
        ServiceId::new(value).map_err(|error| EngineError::InvalidServiceId {
            source_name: self.source,
            error,
        })
    }

    /// Verbose-mode line, e.g. `Service ID (via --service-id): 123`.
    pub fn describe(&self) -> String {
        match &self.value {
            Some(value) => format!("Service ID (via {}): {}", self.source, value),
            None => "Service ID (not provided)".to_string(),
        }
    }
}

/// Collects the candidate service ids and picks one.
#[derive(Debug, Clone, Default)]
pub struct ServiceIdentityResolver<'a> {
    flag: Option<&'a str>,
    env: Option<&'a str>,
    manifest: Option<&'a str>,
}

impl<'a> ServiceIdentityResolver<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flag(mut self, value: Option<&'a str>) -> Self {
        self.flag = value;
        self
    }

    pub fn env(mut self, value: Option<&'a str>) -> Self {
        self.env = value;
        self
    }

    pub fn manifest(mut self, value: Option<&'a str>) -> Self {
        self.manifest = value;
        self
    }

    /// Whether neither the flag nor the environment supplies a usable id,
    /// so `edge.toml` has to be consulted.
    pub fn needs_manifest(&self) -> bool {
        provided(self.flag).is_none() && provided(self.env).is_none()
    }

    /// Apply the precedence rules.
    pub fn resolve(&self) -> ServiceIdentity {
        let candidates = [
            (self.flag, IdentitySource::Flag),
            (self.env, IdentitySource::Env),
            (self.manifest, IdentitySource::Manifest),
        ];
        candidates
            .into_iter()
            .find_map(|(value, source)| {
                let value = provided(value)?;
                Some(ServiceIdentity {
                    value: Some(value.to_string()),
                    source,
                })
            })
            .unwrap_or(ServiceIdentity {
                value: None,
                source: IdentitySource::Undefined,
            })
    }
}

/// The trimmed value, unless blank.
fn provided(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
