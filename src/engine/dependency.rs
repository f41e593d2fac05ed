//! engine::dependency
//!
//! Enforces a kind's [`FlagRule`]s: credential groups that must be given
//! together on create, and flags that are only valid behind a boolean gate.
//!
//! Like exclusion, only flags the user actually set are considered and no
//! network access is needed.

use serde_json::Value;

use super::EngineError;
use crate::core::resource::{FieldOverrides, FlagRule, ResourceKind};

/// Validator over one kind's flag rules.
#[derive(Debug, Clone, Copy)]
pub struct FlagDependencyValidator<'a> {
    kind: &'a ResourceKind,
}

impl<'a> FlagDependencyValidator<'a> {
    pub fn new(kind: &'a ResourceKind) -> Self {
        Self { kind }
    }

    /// Check every rule, in declaration order.
    ///
    /// # Errors
    ///
    /// `MissingFlagGroup` or `MissingRequiredFlag` for an incomplete
    /// credential group on create; `RequiredByFlag` or `OnlyValidWith` for
    /// a gate.
    pub fn validate(&self, overrides: &FieldOverrides, creating: bool) -> Result<(), EngineError> {
        for rule in self.kind.rules {
            match *rule {
                FlagRule::OneOfGroups(groups) if creating => self.one_of(groups, overrides)?,
                FlagRule::OneOfGroups(_) => {}
                FlagRule::Gated { gate, dependents } => self.gated(gate, dependents, overrides)?,
            }
        }
        Ok(())
    }

    fn value<'o>(&self, flag: &str, overrides: &'o FieldOverrides) -> Option<&'o Value> {
        let descriptor = self.kind.field_by_flag(flag)?;
        overrides.get(descriptor.field)?.get()
    }

    fn is_set(&self, flag: &str, overrides: &FieldOverrides) -> bool {
        self.value(flag, overrides).is_some()
    }

    /// Set to something other than an empty string.
    fn is_present(&self, flag: &str, overrides: &FieldOverrides) -> bool {
        self.value(flag, overrides)
            .is_some_and(|v| v.as_str() != Some(""))
    }

    fn one_of(
        &self,
        groups: &'static [&'static [&'static str]],
        overrides: &FieldOverrides,
    ) -> Result<(), EngineError> {
        let started = groups
            .iter()
            .find(|group| group.iter().any(|flag| self.is_set(flag, overrides)));
        let Some(group) = started else {
            return Err(EngineError::MissingFlagGroup {
                groups: describe_groups(groups),
            });
        };
        match group.iter().find(|flag| !self.is_set(flag, overrides)) {
            Some(&flag) => Err(EngineError::MissingRequiredFlag { flag }),
            None => Ok(()),
        }
    }

    fn gated(
        &self,
        gate: &'static str,
        dependents: &'static [&'static str],
        overrides: &FieldOverrides,
    ) -> Result<(), EngineError> {
        let enabled = self
            .value(gate, overrides)
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if enabled {
            if let Some(&flag) = dependents.iter().find(|f| !self.is_present(f, overrides)) {
                return Err(EngineError::RequiredByFlag { flag, by: gate });
            }
        } else if let Some(&flag) = dependents.iter().find(|f| self.is_present(f, overrides)) {
            return Err(EngineError::OnlyValidWith { flag, gate });
        }
        Ok(())
    }
}

/// `--access-key and --secret-key, or --iam-role`
fn describe_groups(groups: &[&[&str]]) -> String {
    groups
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|flag| format!("--{}", flag))
                .collect::<Vec<_>>()
                .join(" and ")
        })
        .collect::<Vec<_>>()
        .join(", or ")
}
