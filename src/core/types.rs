//! core::types
//!
//! Strong types for service and version concepts.
//!
//! # Types
//!
//! - [`ServiceId`] - Opaque, non-empty service identifier
//! - [`VersionNumber`] - Service version number (always >= 1)
//! - [`ServiceVersion`] - A version record as reported by the platform
//! - [`VersionSpecifier`] - What the user asked for via `--version`
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented.
//!
//! # Examples
//!
//! ```
//! use edgectl::core::types::{ServiceId, VersionNumber, VersionSpecifier};
//!
//! let sid = ServiceId::new("SU1Z0isxPaozGVKXdv0eY").unwrap();
//! let v = VersionNumber::new(3).unwrap();
//! assert_eq!(v.get(), 3);
//!
//! assert_eq!("latest".parse::<VersionSpecifier>().unwrap(), VersionSpecifier::Latest);
//! assert_eq!("ACTIVE".parse::<VersionSpecifier>().unwrap(), VersionSpecifier::Active);
//! assert!(ServiceId::new("  ").is_err());
//! assert!(VersionNumber::new(0).is_err());
//! # let _ = sid;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid service id: {0}")]
    InvalidServiceId(String),

    #[error("invalid version number: {0}")]
    InvalidVersionNumber(String),

    #[error("invalid version '{0}': expected a number, 'latest' or 'active'")]
    InvalidVersionSpecifier(String),
}

/// An opaque service identifier.
///
/// Surrounding whitespace is trimmed; the remainder must be non-empty and
/// free of whitespace and `/` (it is used as a URL path segment).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceId(String);

impl ServiceId {
    /// Create a new validated service id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidServiceId` for empty or malformed ids.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(TypeError::InvalidServiceId(
                "service id cannot be empty".into(),
            ));
        }
        if trimmed.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(TypeError::InvalidServiceId(format!(
                "'{trimmed}' contains whitespace or '/'"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ServiceId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ServiceId> for String {
    fn from(id: ServiceId) -> Self {
        id.0
    }
}

impl AsRef<str> for ServiceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A service version number. Numbers start at 1 and increase monotonically
/// per service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct VersionNumber(u32);

impl VersionNumber {
    /// Create a new version number.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidVersionNumber` for zero.
    pub fn new(n: u32) -> Result<Self, TypeError> {
        if n == 0 {
            return Err(TypeError::InvalidVersionNumber(
                "version numbers start at 1".into(),
            ));
        }
        Ok(Self(n))
    }

    /// The raw number.
    pub fn get(self) -> u32 {
        self.0
    }

    /// The number that directly follows this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl TryFrom<u32> for VersionNumber {
    type Error = TypeError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<VersionNumber> for u32 {
    fn from(n: VersionNumber) -> Self {
        n.0
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A service version record.
///
/// `active` and `locked` are independent: a version that was ever activated
/// stays locked after it is deactivated. At most one version per service is
/// active; the platform enforces that, not this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceVersion {
    pub number: VersionNumber,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ServiceVersion {
    /// A fresh, editable version record.
    pub fn editable(number: VersionNumber) -> Self {
        Self {
            number,
            active: false,
            locked: false,
            updated_at: None,
        }
    }

    /// Whether changes may be applied to this version directly.
    pub fn is_editable(&self) -> bool {
        !self.active && !self.locked
    }
}

/// A `--version` argument: a literal number, `latest` or `active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSpecifier {
    /// An exact version number.
    Number(VersionNumber),
    /// The version with the highest number.
    Latest,
    /// The currently active version.
    Active,
}

impl FromStr for VersionSpecifier {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "latest" => Ok(Self::Latest),
            "active" => Ok(Self::Active),
            other => other
                .parse::<u32>()
                .ok()
                .and_then(|n| VersionNumber::new(n).ok())
                .map(Self::Number)
                .ok_or_else(|| TypeError::InvalidVersionSpecifier(trimmed.to_string())),
        }
    }
}

impl fmt::Display for VersionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSpecifier::Number(n) => write!(f, "{}", n),
            VersionSpecifier::Latest => write!(f, "latest"),
            VersionSpecifier::Active => write!(f, "active"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod service_id {
        use super::*;

        #[test]
        fn trims_whitespace() {
            let sid = ServiceId::new("  123abc \n").unwrap();
            assert_eq!(sid.as_str(), "123abc");
        }

        #[test]
        fn rejects_empty() {
            assert!(ServiceId::new("").is_err());
            assert!(ServiceId::new("   ").is_err());
        }

        #[test]
        fn rejects_path_separators() {
            assert!(ServiceId::new("abc/def").is_err());
            assert!(ServiceId::new("abc def").is_err());
        }

        #[test]
        fn serde_roundtrip() {
            let sid = ServiceId::new("123").unwrap();
            let json = serde_json::to_string(&sid).unwrap();
            assert_eq!(json, "\"123\"");
            let parsed: ServiceId = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, sid);
        }
    }

    mod version_number {
        use super::*;

        #[test]
        fn zero_rejected() {
            assert!(VersionNumber::new(0).is_err());
            assert!(serde_json::from_str::<VersionNumber>("0").is_err());
        }

        #[test]
        fn next_increments() {
            let v = VersionNumber::new(2).unwrap();
            assert_eq!(v.next().get(), 3);
        }
    }

    mod service_version {
        use super::*;

        #[test]
        fn deserializes_platform_record() {
            let json = r#"{"number": 4, "active": true, "locked": true, "updated_at": "2026-03-01T10:00:00Z", "comment": ""}"#;
            let v: ServiceVersion = serde_json::from_str(json).unwrap();
            assert_eq!(v.number.get(), 4);
            assert!(v.active);
            assert!(v.locked);
            assert!(v.updated_at.is_some());
            assert!(!v.is_editable());
        }

        #[test]
        fn missing_flags_default_to_false() {
            let v: ServiceVersion = serde_json::from_str(r#"{"number": 1}"#).unwrap();
            assert!(v.is_editable());
            assert!(v.updated_at.is_none());
        }

        #[test]
        fn locked_alone_is_not_editable() {
            let mut v = ServiceVersion::editable(VersionNumber::new(1).unwrap());
            v.locked = true;
            assert!(!v.is_editable());
        }
    }

    mod version_specifier {
        use super::*;

        #[test]
        fn parses_keywords_case_insensitively() {
            assert_eq!(
                "Latest".parse::<VersionSpecifier>().unwrap(),
                VersionSpecifier::Latest
            );
            assert_eq!(
                " active ".parse::<VersionSpecifier>().unwrap(),
                VersionSpecifier::Active
            );
        }

        #[test]
        fn parses_numbers() {
            assert_eq!(
                "12".parse::<VersionSpecifier>().unwrap(),
                VersionSpecifier::Number(VersionNumber::new(12).unwrap())
            );
        }

        #[test]
        fn rejects_garbage() {
            for bad in ["", "0", "-1", "1.5", "newest"] {
                assert!(bad.parse::<VersionSpecifier>().is_err(), "{bad}");
            }
        }

        #[test]
        fn display_roundtrips() {
            for s in ["7", "latest", "active"] {
                let spec: VersionSpecifier = s.parse().unwrap();
                assert_eq!(spec.to_string(), s);
            }
        }
    }
}
