//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--json` is enabled, results are printed as JSON on stdout and
//! nothing else is written there.

use std::fmt::Display;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::core::resource::{Resource, ResourceKind};
use crate::core::types::ServiceVersion;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Verbose mode - resolution details on stderr
    Verbose,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a detail line to stderr (only in verbose mode).
pub fn verbose(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Verbose {
        eprintln!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render a field value for text output; strings are shown unquoted.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// `key: value` lines for one resource.
///
/// Declared fields come first, in catalog order, labelled by flag name.
/// Anything else the platform returned follows in key order.
pub fn format_resource(kind: &ResourceKind, resource: &Resource) -> String {
    let mut lines = vec![
        format!("Service ID: {}", resource.service_id),
        format!("Version: {}", resource.version),
        format!("Name: {}", resource.name),
    ];
    for descriptor in kind.fields() {
        if let Some(value) = resource.fields.get(descriptor.field) {
            lines.push(format!("{}: {}", descriptor.flag, format_value(value)));
        }
    }
    for (key, value) in &resource.fields {
        if kind.field(key).is_none() {
            lines.push(format!("{}: {}", key, format_value(value)));
        }
    }
    lines.join("\n")
}

/// One line per version: number, state and last update.
pub fn format_versions(versions: &[ServiceVersion]) -> String {
    let mut sorted: Vec<&ServiceVersion> = versions.iter().collect();
    sorted.sort_by_key(|v| v.number);

    let mut lines = vec![format!("{:<8} {:<7} {:<7} {}", "NUMBER", "ACTIVE", "LOCKED", "UPDATED")];
    lines.extend(sorted.into_iter().map(|v| {
        let updated = v
            .updated_at
            .map(|t| t.format("%Y-%m-%dT%H:%M:%SZ").to_string())
            .unwrap_or_else(|| "-".to_string());
        format!("{:<8} {:<7} {:<7} {}", v.number, v.active, v.locked, updated)
    }));
    lines.join("\n")
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}
