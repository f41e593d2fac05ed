//! engine::update
//!
//! Builds update payloads from a baseline plus sparse overrides.
//!
//! The platform replaces the whole record on update, so the payload must
//! carry every field. The builder fetches the current record, copies it,
//! and replaces only fields whose override was explicitly set. An unset
//! override, even one holding a parsed default, never reaches the payload.
//!
//! `--new-name` is handled the same way: it renames the resource only when
//! set, while the request still addresses the resource by its current name.

use tracing::debug;

use super::EngineError;
use crate::api::{Api, UpdatePayload};
use crate::core::optional::OptionalValue;
use crate::core::resource::{FieldOverrides, Resource, ResourceKey, ResourceKind};

/// Builds [`UpdatePayload`]s for one resource kind.
pub struct PartialUpdateBuilder<'a> {
    api: &'a dyn Api,
    kind: &'a ResourceKind,
}

impl<'a> PartialUpdateBuilder<'a> {
    pub fn new(api: &'a dyn Api, kind: &'a ResourceKind) -> Self {
        Self { api, kind }
    }

    /// Fetch the baseline for `key` and overlay `overrides`.
    ///
    /// # Errors
    ///
    /// Baseline fetch errors are returned verbatim.
    pub async fn build(
        &self,
        key: &ResourceKey,
        overrides: &FieldOverrides,
        new_name: &OptionalValue<String>,
    ) -> Result<UpdatePayload, EngineError> {
        let baseline = self.api.get_resource(self.kind, key).await?;
        let mut resource = overlay(baseline, overrides, new_name);
        resource.fields = self.kind.restrict(resource.fields);
        debug!(
            kind = self.kind.id,
            name = %key.name,
            changed = overrides.set_fields().count(),
            "built update payload"
        );
        Ok(UpdatePayload {
            key: key.clone(),
            resource,
        })
    }
}

/// Replace the fields of `baseline` that are explicitly set in `overrides`.
pub fn overlay(
    mut baseline: Resource,
    overrides: &FieldOverrides,
    new_name: &OptionalValue<String>,
) -> Resource {
    for (field, value) in overrides.set_fields() {
        baseline.fields.insert(field.to_string(), value.clone());
    }
    if let Some(name) = new_name.get() {
        baseline.name = name.clone();
    }
    baseline
}
