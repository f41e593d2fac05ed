//! core::resource
//!
//! Descriptor-driven model of per-version resources (logging endpoints).
//!
//! # Overview
//!
//! Every logging endpoint kind is described by a [`ResourceKind`]: a table of
//! [`FieldDescriptor`]s plus the flag pairs that may not be combined. The CLI
//! binds flags from that table and the engine builds payloads from it, so no
//! kind needs its own create/update/describe/list/delete code.
//!
//! # Values
//!
//! Field values are JSON values ([`serde_json::Value`]). A descriptor's
//! [`FieldKind`] decides how raw flag text is converted.
//!
//! # Example
//!
//! ```
//! use edgectl::core::resource::catalog;
//! use edgectl::core::resource::FieldKind;
//!
//! let s3 = catalog::find("s3").unwrap();
//! let period = s3.field("period").unwrap();
//! assert_eq!(period.kind, FieldKind::Uint);
//! assert_eq!(period.flag, "period");
//! assert!(s3.is_exclusive_pair("compression-codec", "gzip-level"));
//! ```

pub mod catalog;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::optional::OptionalValue;
use super::types::{ServiceId, VersionNumber};

/// Errors from binding raw flag values to descriptor fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResourceError {
    #[error("unknown field '{field}' for {kind} logging endpoints")]
    UnknownField { kind: &'static str, field: String },

    #[error("invalid value '{value}' for --{flag}: expected {expected}")]
    InvalidValue {
        flag: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// How a field's value is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Non-negative integer.
    Uint,
    /// Signed integer.
    Int,
    /// Boolean; a bare flag means `true`.
    Bool,
}

impl FieldKind {
    /// Convert raw flag text into a field value.
    pub fn parse(self, flag: &'static str, raw: &str) -> Result<Value, ResourceError> {
        let invalid = |expected| ResourceError::InvalidValue {
            flag,
            value: raw.to_string(),
            expected,
        };
        match self {
            FieldKind::Text => Ok(Value::String(raw.to_string())),
            FieldKind::Uint => raw
                .trim()
                .parse::<u64>()
                .map(Value::from)
                .map_err(|_| invalid("a non-negative integer")),
            FieldKind::Int => raw
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| invalid("an integer")),
            FieldKind::Bool => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(Value::Bool(true)),
                "false" | "0" | "no" => Ok(Value::Bool(false)),
                _ => Err(invalid("true or false")),
            },
        }
    }

    /// Short name used in help output.
    pub fn value_name(self) -> &'static str {
        match self {
            FieldKind::Text => "TEXT",
            FieldKind::Uint | FieldKind::Int => "NUMBER",
            FieldKind::Bool => "BOOL",
        }
    }
}

/// One row of a kind's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name on the wire.
    pub field: &'static str,
    /// Flag name, without the leading `--`.
    pub flag: &'static str,
    /// Value representation.
    pub kind: FieldKind,
    /// Must be supplied on create.
    pub required: bool,
    /// Flag help text.
    pub help: &'static str,
    /// Sent to the platform. Flags that only steer validation are not.
    pub wire: bool,
}

/// A dependency between flags, checked against the flags the user set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagRule {
    /// On create, one of these groups must be given in full. A group that
    /// is only partly given names its first missing flag.
    OneOfGroups(&'static [&'static [&'static str]]),
    /// `dependents` are all required (and non-empty) when `gate` is true,
    /// and rejected otherwise. Applies to create and update.
    Gated {
        gate: &'static str,
        dependents: &'static [&'static str],
    },
}

/// A logging endpoint kind.
#[derive(Debug)]
pub struct ResourceKind {
    /// CLI subcommand name, e.g. `s3`.
    pub id: &'static str,
    /// Human-readable name used in messages, e.g. `S3`.
    pub display: &'static str,
    /// API path segment under `/logging/`.
    pub path: &'static str,
    /// Field groups, concatenated in order.
    pub groups: &'static [&'static [FieldDescriptor]],
    /// Flag pairs that may not both be set.
    pub exclusive: &'static [(&'static str, &'static str)],
    /// Dependencies between flags.
    pub rules: &'static [FlagRule],
}

impl ResourceKind {
    /// All field descriptors of this kind.
    pub fn fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> + '_ {
        self.groups.iter().copied().flat_map(|group| group.iter())
    }

    /// Look up a descriptor by field name.
    pub fn field(&self, field: &str) -> Option<&'static FieldDescriptor> {
        self.fields().find(|d| d.field == field)
    }

    /// Look up a descriptor by flag name.
    pub fn field_by_flag(&self, flag: &str) -> Option<&'static FieldDescriptor> {
        self.fields().find(|d| d.flag == flag)
    }

    /// Whether `a` and `b` are declared mutually exclusive (in either order).
    pub fn is_exclusive_pair(&self, a: &str, b: &str) -> bool {
        self.exclusive
            .iter()
            .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
    }

    /// Convert raw flag values (keyed by field name) into typed overrides.
    ///
    /// Unset entries stay unset and are never parsed, so a placeholder that
    /// would not parse cannot fail the command.
    pub fn bind(
        &self,
        raw: &BTreeMap<&'static str, OptionalValue<String>>,
    ) -> Result<FieldOverrides, ResourceError> {
        let mut overrides = FieldOverrides::new();
        for (field, value) in raw {
            let descriptor = self.field(field).ok_or(ResourceError::UnknownField {
                kind: self.display,
                field: field.to_string(),
            })?;
            let typed = value
                .clone()
                .try_map_set(|text| descriptor.kind.parse(descriptor.flag, &text))?;
            overrides.insert(descriptor.field, typed);
        }
        Ok(overrides)
    }

    /// Flags whose fields are set in `overrides`.
    pub fn set_flags(&self, overrides: &FieldOverrides) -> BTreeSet<&'static str> {
        overrides
            .set_fields()
            .filter_map(|(field, _)| self.field(field).map(|d| d.flag))
            .collect()
    }

    /// Drop any field this kind does not send to the platform.
    pub fn restrict(&self, fields: BTreeMap<String, Value>) -> BTreeMap<String, Value> {
        fields
            .into_iter()
            .filter(|(k, _)| self.field(k).is_some_and(|d| d.wire))
            .collect()
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}

/// The operations available on every resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Create,
    Describe,
    List,
    Update,
    Delete,
}

impl Verb {
    /// All verbs, in help order.
    pub const ALL: [Verb; 5] = [
        Verb::Create,
        Verb::Describe,
        Verb::List,
        Verb::Update,
        Verb::Delete,
    ];

    /// Whether this verb changes the service version.
    pub fn is_mutating(self) -> bool {
        matches!(self, Verb::Create | Verb::Update | Verb::Delete)
    }

    /// Subcommand name.
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Create => "create",
            Verb::Describe => "describe",
            Verb::List => "list",
            Verb::Update => "update",
            Verb::Delete => "delete",
        }
    }

    /// Past tense used in confirmation messages.
    pub fn past_tense(self) -> &'static str {
        match self {
            Verb::Create => "Created",
            Verb::Describe => "Described",
            Verb::List => "Listed",
            Verb::Update => "Updated",
            Verb::Delete => "Deleted",
        }
    }

    /// Parse a subcommand name.
    pub fn from_name(name: &str) -> Option<Verb> {
        Verb::ALL.into_iter().find(|v| v.as_str() == name)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A resource as stored on a (service, version) pair.
///
/// `fields` holds every descriptor field the platform reported; identity
/// fields (`service_id`, `version`, `name`) are kept separate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub service_id: ServiceId,
    #[serde(alias = "service_version")]
    pub version: VersionNumber,
    pub name: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Resource {
    /// Field names whose values differ between `self` and `other`,
    /// including `name`.
    pub fn diff(&self, other: &Resource) -> BTreeSet<String> {
        let mut changed: BTreeSet<String> = self
            .fields
            .keys()
            .chain(other.fields.keys())
            .filter(|k| self.fields.get(*k) != other.fields.get(*k))
            .cloned()
            .collect();
        if self.name != other.name {
            changed.insert("name".to_string());
        }
        changed
    }
}

/// Addresses one resource of a kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceKey {
    pub service_id: ServiceId,
    pub version: VersionNumber,
    pub name: String,
}

/// Per-field overrides keyed by field name.
///
/// A field absent from the map was never declared by the command; a field
/// present but unset was declared and left alone by the user. Both leave the
/// baseline untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldOverrides {
    entries: BTreeMap<String, OptionalValue<Value>>,
}

impl FieldOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an override for `field`.
    pub fn insert(&mut self, field: impl Into<String>, value: OptionalValue<Value>) {
        self.entries.insert(field.into(), value);
    }

    /// Builder-style shorthand for an explicitly set value.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, OptionalValue::set(value.into()));
        self
    }

    /// The override for `field`, if declared.
    pub fn get(&self, field: &str) -> Option<&OptionalValue<Value>> {
        self.entries.get(field)
    }

    /// Fields explicitly set by the user, with their values.
    pub fn set_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.get().map(|value| (k.as_str(), value)))
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    mod field_kind {
        use super::*;

        #[test]
        fn uint_rejects_negative() {
            assert_eq!(FieldKind::Uint.parse("period", "3600").unwrap(), json!(3600));
            assert!(FieldKind::Uint.parse("period", "-1").is_err());
        }

        #[test]
        fn int_accepts_negative() {
            assert_eq!(
                FieldKind::Int.parse("required-acks", "-1").unwrap(),
                json!(-1)
            );
        }

        #[test]
        fn bool_spellings() {
            assert_eq!(FieldKind::Bool.parse("use-tls", "true").unwrap(), json!(true));
            assert_eq!(FieldKind::Bool.parse("use-tls", "NO").unwrap(), json!(false));
            let err = FieldKind::Bool.parse("use-tls", "maybe").unwrap_err();
            assert!(err.to_string().contains("--use-tls"));
        }

        #[test]
        fn text_keeps_empty_string() {
            assert_eq!(FieldKind::Text.parse("path", "").unwrap(), json!(""));
        }
    }

    mod binding {
        use super::*;

        #[test]
        fn unset_placeholders_are_not_parsed() {
            let s3 = catalog::find("s3").unwrap();
            let mut raw = BTreeMap::new();
            raw.insert("period", OptionalValue::from_parts(false, "oops".to_string()));
            raw.insert("path", OptionalValue::set("/logs/".to_string()));

            let overrides = s3.bind(&raw).unwrap();
            assert_eq!(overrides.len(), 2);
            assert!(!overrides.get("period").unwrap().was_set());
            let set: Vec<_> = overrides.set_fields().collect();
            assert_eq!(set, vec![("path", &json!("/logs/"))]);
        }

        #[test]
        fn invalid_set_value_fails() {
            let s3 = catalog::find("s3").unwrap();
            let mut raw = BTreeMap::new();
            raw.insert("gzip_level", OptionalValue::set("high".to_string()));
            assert!(matches!(
                s3.bind(&raw),
                Err(ResourceError::InvalidValue { flag: "gzip-level", .. })
            ));
        }

        #[test]
        fn unknown_field_fails() {
            let heroku = catalog::find("heroku").unwrap();
            let mut raw = BTreeMap::new();
            raw.insert("bucket_name", OptionalValue::set("b".to_string()));
            assert!(matches!(
                heroku.bind(&raw),
                Err(ResourceError::UnknownField { .. })
            ));
        }

        #[test]
        fn set_flags_uses_flag_names() {
            let s3 = catalog::find("s3").unwrap();
            let overrides = FieldOverrides::new()
                .with("gzip_level", 3)
                .with("compression_codec", "zstd");
            let flags = s3.set_flags(&overrides);
            assert!(flags.contains("gzip-level"));
            assert!(flags.contains("compression-codec"));
        }
    }

    mod resource {
        use super::*;

        fn sample() -> Resource {
            Resource {
                service_id: ServiceId::new("123").unwrap(),
                version: VersionNumber::new(2).unwrap(),
                name: "logs".into(),
                fields: BTreeMap::from([
                    ("path".to_string(), json!("/")),
                    ("period".to_string(), json!(3600)),
                ]),
            }
        }

        #[test]
        fn diff_reports_changed_fields_and_name() {
            let a = sample();
            let mut b = sample();
            b.fields.insert("period".into(), json!(60));
            b.name = "renamed".into();
            let diff = a.diff(&b);
            assert_eq!(
                diff.into_iter().collect::<Vec<_>>(),
                vec!["name".to_string(), "period".to_string()]
            );
        }

        #[test]
        fn wire_format_is_flat() {
            let json = json!({
                "service_id": "123",
                "service_version": 2,
                "name": "logs",
                "path": "/",
                "period": 3600
            });
            let parsed: Resource = serde_json::from_value(json).unwrap();
            assert_eq!(parsed, sample());

            let back = serde_json::to_value(&parsed).unwrap();
            assert_eq!(back["version"], json!(2));
            assert_eq!(back["path"], json!("/"));
        }

        #[test]
        fn restrict_drops_undeclared_fields() {
            let s3 = catalog::find("s3").unwrap();
            let fields = BTreeMap::from([
                ("path".to_string(), json!("/")),
                ("created_at".to_string(), json!("2026-01-01T00:00:00Z")),
            ]);
            let kept = s3.restrict(fields);
            assert!(kept.contains_key("path"));
            assert!(!kept.contains_key("created_at"));
        }
    }

    #[test]
    fn verbs() {
        assert!(Verb::Update.is_mutating());
        assert!(!Verb::Describe.is_mutating());
        assert_eq!(Verb::from_name("delete"), Some(Verb::Delete));
        assert_eq!(Verb::Create.past_tense(), "Created");
    }
}
