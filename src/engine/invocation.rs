//! engine::invocation
//!
//! Runs one logging endpoint command end to end.
//!
//! [`execute`] validates the request, resolves the version, passes the
//! guard, and performs the verb against the resolved (or cloned) version.
//! Validation happens before the first API call.

use serde::Serialize;
use tracing::warn;

use super::autoclone::{self, AutoCloneGuard, GuardState};
use super::create::{build_resource, check_required};
use super::dependency::FlagDependencyValidator;
use super::exclusion::MutualExclusionValidator;
use super::update::PartialUpdateBuilder;
use super::version::VersionResolver;
use super::EngineError;
use crate::api::Api;
use crate::core::optional::OptionalValue;
use crate::core::resource::{FieldOverrides, Resource, ResourceKey, ResourceKind, Verb};
use crate::core::types::{ServiceId, ServiceVersion, VersionNumber, VersionSpecifier};

/// A fully parsed logging endpoint command.
#[derive(Debug, Clone)]
pub struct EndpointRequest {
    pub kind: &'static ResourceKind,
    pub verb: Verb,
    pub version: VersionSpecifier,
    pub autoclone: bool,
    /// `--name`; required by every verb except `list`.
    pub name: Option<String>,
    /// `--new-name`; only meaningful for `update`.
    pub new_name: OptionalValue<String>,
    pub overrides: FieldOverrides,
}

impl EndpointRequest {
    pub fn new(kind: &'static ResourceKind, verb: Verb, version: VersionSpecifier) -> Self {
        Self {
            kind,
            verb,
            version,
            autoclone: false,
            name: None,
            new_name: OptionalValue::unset(),
            overrides: FieldOverrides::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn autoclone(mut self, autoclone: bool) -> Self {
        self.autoclone = autoclone;
        self
    }

    pub fn overrides(mut self, overrides: FieldOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn new_name(mut self, new_name: impl Into<String>) -> Self {
        self.new_name = OptionalValue::set(new_name.into());
        self
    }

    fn require_name(&self) -> Result<&str, EngineError> {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or(EngineError::MissingRequiredFlag { flag: "name" })
    }
}

/// Checks that need no network access.
///
/// # Errors
///
/// `MutuallyExclusiveFlags`, `MissingRequiredFlag` for `--name` and, on
/// create, for required fields, then any flag dependency error.
pub fn validate_flags(request: &EndpointRequest) -> Result<(), EngineError> {
    let creating = request.verb == Verb::Create;
    MutualExclusionValidator::new(request.kind.exclusive)
        .validate(&request.kind.set_flags(&request.overrides))?;
    if request.verb != Verb::List {
        request.require_name()?;
    }
    if creating {
        check_required(request.kind, &request.overrides)?;
    }
    if creating || request.verb == Verb::Update {
        FlagDependencyValidator::new(request.kind).validate(&request.overrides, creating)?;
    }
    Ok(())
}

/// What a successful command produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutcomeData {
    Resource(Resource),
    Resources(Vec<Resource>),
    Deleted,
}

/// Result of [`execute`].
#[derive(Debug, Clone)]
pub struct Outcome {
    pub verb: Verb,
    pub kind: &'static ResourceKind,
    pub service_id: ServiceId,
    /// The version actually targeted.
    pub version: ServiceVersion,
    pub cloned_from: Option<VersionNumber>,
    pub name: Option<String>,
    pub data: OutcomeData,
}

impl Outcome {
    /// Confirmation line for mutating verbs.
    ///
    /// Reports the resource's name after the command, so a rename shows
    /// the new name.
    pub fn confirmation(&self) -> Option<String> {
        if !self.verb.is_mutating() {
            return None;
        }
        let name = match &self.data {
            OutcomeData::Resource(resource) => resource.name.as_str(),
            _ => self.name.as_deref().unwrap_or_default(),
        };
        Some(format!(
            "{} {} logging endpoint {} (service {} version {})",
            self.verb.past_tense(),
            self.kind.display,
            name,
            self.service_id,
            self.version.number
        ))
    }

    /// Notice describing an automatic clone, if one was made.
    pub fn clone_notice(&self) -> Option<String> {
        self.cloned_from
            .map(|from| autoclone::clone_notice(from, self.version.number))
    }
}

/// Run `request` against `service_id`.
///
/// # Errors
///
/// Any validation, resolution, guard or API error. A failure after an
/// automatic clone is wrapped in `FailedAfterClone`; the clone is kept.
pub async fn execute(
    api: &dyn Api,
    service_id: &ServiceId,
    request: &EndpointRequest,
) -> Result<Outcome, EngineError> {
    validate_flags(request)?;

    let resolved = VersionResolver::new(api)
        .resolve(service_id, request.version)
        .await?;
    let guard = AutoCloneGuard::new(resolved, request.autoclone, request.verb.is_mutating())
        .run(api, service_id)
        .await?;

    let data = perform(api, service_id, guard.version.number, request)
        .await
        .map_err(|err| match (guard.state, guard.cloned_from) {
            (GuardState::Cloned, Some(from)) => {
                warn!(
                    service = %service_id,
                    from = %from,
                    clone = %guard.version.number,
                    "command failed after cloning; the cloned version was kept"
                );
                EngineError::FailedAfterClone {
                    from,
                    clone: guard.version.number,
                    cause: Box::new(err),
                }
            }
            _ => err,
        })?;

    Ok(Outcome {
        verb: request.verb,
        kind: request.kind,
        service_id: service_id.clone(),
        version: guard.version,
        cloned_from: guard.cloned_from,
        name: request.name.clone(),
        data,
    })
}

async fn perform(
    api: &dyn Api,
    service_id: &ServiceId,
    version: VersionNumber,
    request: &EndpointRequest,
) -> Result<OutcomeData, EngineError> {
    let kind = request.kind;
    let key = || -> Result<ResourceKey, EngineError> {
        Ok(ResourceKey {
            service_id: service_id.clone(),
            version,
            name: request.require_name()?.to_string(),
        })
    };

    let data = match request.verb {
        Verb::List => OutcomeData::Resources(api.list_resources(kind, service_id, version).await?),
        Verb::Describe => OutcomeData::Resource(api.get_resource(kind, &key()?).await?),
        Verb::Create => {
            let key = key()?;
            let resource = build_resource(kind, service_id, version, &key.name, &request.overrides)?;
            OutcomeData::Resource(api.create_resource(kind, &resource).await?)
        }
        Verb::Update => {
            let payload = PartialUpdateBuilder::new(api, kind)
                .build(&key()?, &request.overrides, &request.new_name)
                .await?;
            OutcomeData::Resource(api.update_resource(kind, &payload).await?)
        }
        Verb::Delete => {
            api.delete_resource(kind, &key()?).await?;
            OutcomeData::Deleted
        }
    };
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{FailOn, MockApi, MockOperation};
    use crate::api::ApiError;
    use crate::core::resource::catalog;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn sid() -> ServiceId {
        ServiceId::new("123").unwrap()
    }

    fn v(n: u32) -> VersionNumber {
        VersionNumber::new(n).unwrap()
    }

    fn s3() -> &'static ResourceKind {
        catalog::find("s3").unwrap()
    }

    fn logs(version: u32) -> Resource {
        Resource {
            service_id: sid(),
            version: v(version),
            name: "logs".into(),
            fields: BTreeMap::from([
                ("bucket_name".to_string(), json!("bucket")),
                ("period".to_string(), json!(3600)),
            ]),
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn name_required_except_list() {
            let request = EndpointRequest::new(s3(), Verb::Describe, VersionSpecifier::Latest);
            assert!(matches!(
                validate_flags(&request),
                Err(EngineError::MissingRequiredFlag { flag: "name" })
            ));

            let request = EndpointRequest::new(s3(), Verb::List, VersionSpecifier::Latest);
            assert!(validate_flags(&request).is_ok());
        }

        #[test]
        fn create_checks_required_fields() {
            let request = EndpointRequest::new(s3(), Verb::Create, VersionSpecifier::Latest)
                .name("logs");
            assert!(matches!(
                validate_flags(&request),
                Err(EngineError::MissingRequiredFlag { flag: "bucket" })
            ));
        }

        #[test]
        fn create_checks_credentials_before_any_call() {
            let request = EndpointRequest::new(s3(), Verb::Create, VersionSpecifier::Latest)
                .name("logs")
                .overrides(
                    FieldOverrides::new()
                        .with("bucket_name", "b")
                        .with("access_key", "AKIA"),
                );
            assert!(matches!(
                validate_flags(&request),
                Err(EngineError::MissingRequiredFlag { flag: "secret-key" })
            ));

            let request = EndpointRequest::new(s3(), Verb::Create, VersionSpecifier::Latest)
                .name("logs")
                .overrides(FieldOverrides::new().with("bucket_name", "b"));
            assert!(matches!(
                validate_flags(&request),
                Err(EngineError::MissingFlagGroup { .. })
            ));
        }

        #[test]
        fn sasl_flags_checked_on_update() {
            let kafka = catalog::find("kafka").unwrap();
            let request = EndpointRequest::new(kafka, Verb::Update, VersionSpecifier::Latest)
                .name("events")
                .overrides(FieldOverrides::new().with("password", "p"));
            assert!(matches!(
                validate_flags(&request),
                Err(EngineError::OnlyValidWith { flag: "password", gate: "use-sasl" })
            ));

            let delete = EndpointRequest::new(kafka, Verb::Delete, VersionSpecifier::Latest)
                .name("events")
                .overrides(FieldOverrides::new().with("password", "p"));
            assert!(validate_flags(&delete).is_ok());
        }

        #[test]
        fn update_skips_required_fields() {
            let request = EndpointRequest::new(s3(), Verb::Update, VersionSpecifier::Latest)
                .name("logs");
            assert!(validate_flags(&request).is_ok());
        }
    }

    #[tokio::test]
    async fn exclusive_flags_make_no_call() {
        let api = MockApi::new().with_versions(&sid(), &[(1, false, false)]);
        let request = EndpointRequest::new(s3(), Verb::Update, VersionSpecifier::Latest)
            .name("logs")
            .overrides(
                FieldOverrides::new()
                    .with("compression_codec", "zstd")
                    .with("gzip_level", 3),
            );

        let err = execute(&api, &sid(), &request).await.unwrap_err();
        assert!(matches!(err, EngineError::MutuallyExclusiveFlags { .. }));
        assert!(api.operations().is_empty());
    }

    #[tokio::test]
    async fn noop_update_sends_baseline() {
        let api = MockApi::new()
            .with_versions(&sid(), &[(1, false, true), (2, false, false)])
            .with_resource(s3(), logs(2));
        let request = EndpointRequest::new(s3(), Verb::Update, VersionSpecifier::Number(v(2)))
            .name("logs");

        let outcome = execute(&api, &sid(), &request).await.unwrap();
        assert_eq!(outcome.data, OutcomeData::Resource(logs(2)));

        let sent = api
            .operations()
            .into_iter()
            .find_map(|op| match op {
                MockOperation::UpdateResource { payload, .. } => Some(payload),
                _ => None,
            })
            .unwrap();
        assert_eq!(sent.resource, logs(2));
        assert_eq!(
            outcome.confirmation().unwrap(),
            "Updated S3 logging endpoint logs (service 123 version 2)"
        );
    }

    #[tokio::test]
    async fn autoclone_targets_clone() {
        let api = MockApi::new()
            .with_versions(&sid(), &[(1, false, true), (2, true, true)])
            .with_resource(s3(), logs(2));
        let request = EndpointRequest::new(s3(), Verb::Delete, VersionSpecifier::Active)
            .name("logs")
            .autoclone(true);

        let outcome = execute(&api, &sid(), &request).await.unwrap();
        assert_eq!(outcome.version.number, v(3));
        assert_eq!(outcome.cloned_from, Some(v(2)));
        assert_eq!(
            outcome.confirmation().unwrap(),
            "Deleted S3 logging endpoint logs (service 123 version 3)"
        );
        assert!(outcome.clone_notice().unwrap().contains("Now operating on version 3."));
        assert!(api.resource(s3(), &sid(), v(3), "logs").is_none());
        assert!(api.resource(s3(), &sid(), v(2), "logs").is_some());
    }

    #[tokio::test]
    async fn blocked_without_autoclone() {
        let api = MockApi::new()
            .with_versions(&sid(), &[(2, true, false)])
            .with_resource(s3(), logs(2));
        let request = EndpointRequest::new(s3(), Verb::Delete, VersionSpecifier::Number(v(2)))
            .name("logs");

        let err = execute(&api, &sid(), &request).await.unwrap_err();
        assert!(matches!(err, EngineError::AutoCloneRequired { version } if version == v(2)));
        assert!(!api.operations().iter().any(MockOperation::is_mutation));
    }

    #[tokio::test]
    async fn read_only_verbs_skip_guard() {
        let api = MockApi::new()
            .with_versions(&sid(), &[(2, true, true)])
            .with_resource(s3(), logs(2));

        let describe = EndpointRequest::new(s3(), Verb::Describe, VersionSpecifier::Active)
            .name("logs");
        let outcome = execute(&api, &sid(), &describe).await.unwrap();
        assert_eq!(outcome.data, OutcomeData::Resource(logs(2)));
        assert!(outcome.confirmation().is_none());

        let list = EndpointRequest::new(s3(), Verb::List, VersionSpecifier::Active);
        let outcome = execute(&api, &sid(), &list).await.unwrap();
        assert_eq!(outcome.data, OutcomeData::Resources(vec![logs(2)]));
    }

    #[tokio::test]
    async fn create_on_editable_version() {
        let api = MockApi::new().with_versions(&sid(), &[(1, false, false)]);
        let request = EndpointRequest::new(s3(), Verb::Create, VersionSpecifier::Latest)
            .name("archive")
            .overrides(
                FieldOverrides::new()
                    .with("bucket_name", "b")
                    .with("iam_role", "arn:aws:iam::1:role/logs"),
            );

        let outcome = execute(&api, &sid(), &request).await.unwrap();
        assert_eq!(
            outcome.confirmation().unwrap(),
            "Created S3 logging endpoint archive (service 123 version 1)"
        );
        let stored = api.resource(s3(), &sid(), v(1), "archive").unwrap();
        assert_eq!(stored.fields["bucket_name"], json!("b"));
    }

    #[tokio::test]
    async fn rename_reported_with_new_name() {
        let api = MockApi::new()
            .with_versions(&sid(), &[(2, false, false)])
            .with_resource(s3(), logs(2));
        let request = EndpointRequest::new(s3(), Verb::Update, VersionSpecifier::Latest)
            .name("logs")
            .new_name("archive");

        let outcome = execute(&api, &sid(), &request).await.unwrap();
        assert_eq!(
            outcome.confirmation().unwrap(),
            "Updated S3 logging endpoint archive (service 123 version 2)"
        );
    }

    #[tokio::test]
    async fn failure_after_clone_keeps_clone() {
        let api = MockApi::new()
            .with_versions(&sid(), &[(2, true, false)])
            .fail_on(FailOn::GetResource(ApiError::NotFound("logs".into())));
        let request = EndpointRequest::new(s3(), Verb::Update, VersionSpecifier::Latest)
            .name("logs")
            .autoclone(true);

        let err = execute(&api, &sid(), &request).await.unwrap_err();
        match err {
            EngineError::FailedAfterClone { from, clone, cause } => {
                assert_eq!((from, clone), (v(2), v(3)));
                assert!(matches!(*cause, EngineError::Api(ApiError::NotFound(_))));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(api.versions(&sid()).len(), 2);
    }
}
