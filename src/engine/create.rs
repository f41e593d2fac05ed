//! engine::create
//!
//! Builds the record for a new resource.
//!
//! Required fields must be explicitly set. Optional fields are included
//! only when set, so the platform applies its own defaults to the rest.

use std::collections::BTreeMap;

use super::EngineError;
use crate::core::resource::{FieldOverrides, Resource, ResourceKind};
use crate::core::types::{ServiceId, VersionNumber};

/// Fail with `MissingRequiredFlag` for the first required field not set.
///
/// Runs before any network call.
pub fn check_required(kind: &ResourceKind, overrides: &FieldOverrides) -> Result<(), EngineError> {
    match kind
        .fields()
        .filter(|d| d.required)
        .find(|d| overrides.get(d.field).map_or(true, |v| !v.was_set()))
    {
        Some(missing) => Err(EngineError::MissingRequiredFlag {
            flag: missing.flag,
        }),
        None => Ok(()),
    }
}

/// Build a new resource from the set overrides.
pub fn build_resource(
    kind: &ResourceKind,
    service_id: &ServiceId,
    version: VersionNumber,
    name: &str,
    overrides: &FieldOverrides,
) -> Result<Resource, EngineError> {
    check_required(kind, overrides)?;

    let fields: BTreeMap<String, serde_json::Value> = overrides
        .set_fields()
        .map(|(field, value)| (field.to_string(), value.clone()))
        .collect();

    Ok(Resource {
        service_id: service_id.clone(),
        version,
        name: name.to_string(),
        fields: kind.restrict(fields),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::optional::OptionalValue;
    use crate::core::resource::catalog;
    use serde_json::json;

    fn sid() -> ServiceId {
        ServiceId::new("123").unwrap()
    }

    #[test]
    fn missing_required_flag_named() {
        let s3 = catalog::find("s3").unwrap();
        let err = check_required(s3, &FieldOverrides::new().with("path", "/")).unwrap_err();
        assert!(matches!(err, EngineError::MissingRequiredFlag { flag: "bucket" }));
    }

    #[test]
    fn declared_but_unset_counts_as_missing() {
        let heroku = catalog::find("heroku").unwrap();
        let mut overrides = FieldOverrides::new().with("url", "https://example.com");
        overrides.insert("token", OptionalValue::from_parts(false, json!("")));
        let err = check_required(heroku, &overrides).unwrap_err();
        assert!(matches!(err, EngineError::MissingRequiredFlag { flag: "auth-token" }));
    }

    #[test]
    fn only_set_fields_included() {
        let s3 = catalog::find("s3").unwrap();
        let mut overrides = FieldOverrides::new().with("bucket_name", "logs-bucket");
        overrides.insert("period", OptionalValue::from_parts(false, json!(0)));

        let resource =
            build_resource(s3, &sid(), VersionNumber::new(1).unwrap(), "logs", &overrides).unwrap();
        assert_eq!(resource.name, "logs");
        assert_eq!(resource.fields.len(), 1);
        assert_eq!(resource.fields["bucket_name"], json!("logs-bucket"));
    }

    #[test]
    fn sasl_gate_left_out_of_record() {
        let kafka = catalog::find("kafka").unwrap();
        let overrides = FieldOverrides::new()
            .with("topic", "t")
            .with("brokers", "b:9092")
            .with("use_sasl", true);
        let resource =
            build_resource(kafka, &sid(), VersionNumber::new(1).unwrap(), "events", &overrides)
                .unwrap();
        assert!(!resource.fields.contains_key("use_sasl"));
        assert_eq!(resource.fields.len(), 2);
    }

    #[test]
    fn kinds_without_required_fields() {
        let logentries = catalog::find("logentries").unwrap();
        assert!(check_required(logentries, &FieldOverrides::new()).is_ok());
    }
}
