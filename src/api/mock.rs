//! api::mock
//!
//! In-memory `Api` implementation for deterministic testing.
//!
//! # Design
//!
//! Versions and resources live in memory. Cloning a version copies its
//! resources, and mutations on active or locked versions are refused the
//! way the platform refuses them. Every call is recorded, and any single
//! operation can be configured to fail.
//!
//! # Example
//!
//! ```
//! use edgectl::api::mock::{FailOn, MockApi};
//! use edgectl::api::{Api, ApiError};
//! use edgectl::core::types::{ServiceId, VersionNumber};
//!
//! # tokio_test::block_on(async {
//! let sid = ServiceId::new("123").unwrap();
//! let api = MockApi::new()
//!     .with_versions(&sid, &[(1, true, true)])
//!     .fail_on(FailOn::CloneVersion(ApiError::RateLimited));
//!
//! let v1 = VersionNumber::new(1).unwrap();
//! assert_eq!(api.clone_version(&sid, v1).await, Err(ApiError::RateLimited));
//! assert_eq!(api.operations().len(), 1);
//! # });
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::{Api, ApiError, UpdatePayload};
use crate::core::resource::{Resource, ResourceKey, ResourceKind};
use crate::core::types::{ServiceId, ServiceVersion, VersionNumber};

/// Mock API for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockApi {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockApiInner>>,
}

/// Resources are keyed by (service, version, kind id, name).
type StoreKey = (ServiceId, VersionNumber, &'static str, String);

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockApiInner {
    /// Versions per service, by number.
    versions: BTreeMap<ServiceId, BTreeMap<VersionNumber, ServiceVersion>>,
    /// Stored resources.
    resources: BTreeMap<StoreKey, Resource>,
    /// Operation to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    ListVersions(ApiError),
    GetVersion(ApiError),
    CloneVersion(ApiError),
    GetResource(ApiError),
    ListResources(ApiError),
    CreateResource(ApiError),
    UpdateResource(ApiError),
    DeleteResource(ApiError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq)]
pub enum MockOperation {
    ListVersions {
        service_id: ServiceId,
    },
    GetVersion {
        service_id: ServiceId,
        version: VersionNumber,
    },
    CloneVersion {
        service_id: ServiceId,
        version: VersionNumber,
    },
    GetResource {
        kind: &'static str,
        key: ResourceKey,
    },
    ListResources {
        kind: &'static str,
        service_id: ServiceId,
        version: VersionNumber,
    },
    CreateResource {
        kind: &'static str,
        resource: Resource,
    },
    UpdateResource {
        kind: &'static str,
        payload: UpdatePayload,
    },
    DeleteResource {
        kind: &'static str,
        key: ResourceKey,
    },
}

impl MockOperation {
    /// Whether this operation changes platform state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            MockOperation::CloneVersion { .. }
                | MockOperation::CreateResource { .. }
                | MockOperation::UpdateResource { .. }
                | MockOperation::DeleteResource { .. }
        )
    }
}

impl MockApi {
    /// Create a new empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed versions for a service as `(number, active, locked)` tuples.
    ///
    /// # Panics
    ///
    /// Panics on version number 0.
    pub fn with_versions(self, service_id: &ServiceId, versions: &[(u32, bool, bool)]) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            let entry = inner.versions.entry(service_id.clone()).or_default();
            for &(number, active, locked) in versions {
                let number = VersionNumber::new(number).expect("seed version numbers start at 1");
                entry.insert(
                    number,
                    ServiceVersion {
                        number,
                        active,
                        locked,
                        updated_at: None,
                    },
                );
            }
        }
        self
    }

    /// Seed a resource of `kind`.
    pub fn with_resource(self, kind: &ResourceKind, resource: Resource) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            let key = store_key(kind, &resource.service_id, resource.version, &resource.name);
            inner.resources.insert(key, resource);
        }
        self
    }

    /// Configure the mock to fail on a specific operation.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_on = None;
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Clear recorded operations.
    pub fn clear_operations(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.clear();
    }

    /// All versions of a service, ascending (for test verification).
    pub fn versions(&self, service_id: &ServiceId) -> Vec<ServiceVersion> {
        let inner = self.inner.lock().unwrap();
        inner
            .versions
            .get(service_id)
            .map(|v| v.values().cloned().collect())
            .unwrap_or_default()
    }

    /// A stored resource (for test verification).
    pub fn resource(
        &self,
        kind: &ResourceKind,
        service_id: &ServiceId,
        version: VersionNumber,
        name: &str,
    ) -> Option<Resource> {
        let inner = self.inner.lock().unwrap();
        inner
            .resources
            .get(&store_key(kind, service_id, version, name))
            .cloned()
    }

    /// Record an operation.
    fn record(&self, op: MockOperation) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(op);
    }

    /// Check if we should fail and return the error if so.
    fn check_fail(&self, op: &MockOperation) -> Result<(), ApiError> {
        let inner = self.inner.lock().unwrap();
        let error = match (&inner.fail_on, op) {
            (Some(FailOn::ListVersions(e)), MockOperation::ListVersions { .. })
            | (Some(FailOn::GetVersion(e)), MockOperation::GetVersion { .. })
            | (Some(FailOn::CloneVersion(e)), MockOperation::CloneVersion { .. })
            | (Some(FailOn::GetResource(e)), MockOperation::GetResource { .. })
            | (Some(FailOn::ListResources(e)), MockOperation::ListResources { .. })
            | (Some(FailOn::CreateResource(e)), MockOperation::CreateResource { .. })
            | (Some(FailOn::UpdateResource(e)), MockOperation::UpdateResource { .. })
            | (Some(FailOn::DeleteResource(e)), MockOperation::DeleteResource { .. }) => e,
            _ => return Ok(()),
        };
        Err(error.clone())
    }

    /// Record, then apply any configured failure.
    fn enter(&self, op: MockOperation) -> Result<(), ApiError> {
        let result = self.check_fail(&op);
        self.record(op);
        result
    }
}

fn store_key(
    kind: &ResourceKind,
    service_id: &ServiceId,
    version: VersionNumber,
    name: &str,
) -> StoreKey {
    (service_id.clone(), version, kind.id, name.to_string())
}

impl MockApiInner {
    fn version(
        &self,
        service_id: &ServiceId,
        version: VersionNumber,
    ) -> Result<&ServiceVersion, ApiError> {
        self.versions
            .get(service_id)
            .and_then(|v| v.get(&version))
            .ok_or_else(|| {
                ApiError::NotFound(format!("service {} version {}", service_id, version))
            })
    }

    /// Refuse changes to versions that are not editable.
    fn ensure_editable(
        &self,
        service_id: &ServiceId,
        version: VersionNumber,
    ) -> Result<(), ApiError> {
        let record = self.version(service_id, version)?;
        if record.is_editable() {
            Ok(())
        } else {
            Err(ApiError::Status {
                status: 400,
                message: format!("version {} is locked and cannot be modified", version),
            })
        }
    }
}

fn resource_not_found(kind: &ResourceKind, key: &ResourceKey) -> ApiError {
    ApiError::NotFound(format!(
        "{} logging endpoint '{}' on service {} version {}",
        kind.display, key.name, key.service_id, key.version
    ))
}

#[async_trait]
impl Api for MockApi {
    async fn list_versions(
        &self,
        service_id: &ServiceId,
    ) -> Result<Vec<ServiceVersion>, ApiError> {
        self.enter(MockOperation::ListVersions {
            service_id: service_id.clone(),
        })?;

        let inner = self.inner.lock().unwrap();
        inner
            .versions
            .get(service_id)
            .map(|v| v.values().cloned().collect())
            .ok_or_else(|| ApiError::NotFound(format!("service {}", service_id)))
    }

    async fn get_version(
        &self,
        service_id: &ServiceId,
        version: VersionNumber,
    ) -> Result<ServiceVersion, ApiError> {
        self.enter(MockOperation::GetVersion {
            service_id: service_id.clone(),
            version,
        })?;

        let inner = self.inner.lock().unwrap();
        inner.version(service_id, version).cloned()
    }

    async fn clone_version(
        &self,
        service_id: &ServiceId,
        version: VersionNumber,
    ) -> Result<ServiceVersion, ApiError> {
        self.enter(MockOperation::CloneVersion {
            service_id: service_id.clone(),
            version,
        })?;

        let mut inner = self.inner.lock().unwrap();
        inner.version(service_id, version)?;

        let versions = inner.versions.entry(service_id.clone()).or_default();
        let next = versions
            .keys()
            .next_back()
            .copied()
            .unwrap_or(version)
            .next();
        let record = ServiceVersion::editable(next);
        versions.insert(next, record.clone());

        let copies: Vec<(StoreKey, Resource)> = inner
            .resources
            .iter()
            .filter(|((sid, v, _, _), _)| sid == service_id && *v == version)
            .map(|((sid, _, kind, name), resource)| {
                let mut copy = resource.clone();
                copy.version = next;
                ((sid.clone(), next, *kind, name.clone()), copy)
            })
            .collect();
        inner.resources.extend(copies);

        Ok(record)
    }

    async fn get_resource(
        &self,
        kind: &ResourceKind,
        key: &ResourceKey,
    ) -> Result<Resource, ApiError> {
        self.enter(MockOperation::GetResource {
            kind: kind.id,
            key: key.clone(),
        })?;

        let inner = self.inner.lock().unwrap();
        inner
            .resources
            .get(&store_key(kind, &key.service_id, key.version, &key.name))
            .cloned()
            .ok_or_else(|| resource_not_found(kind, key))
    }

    async fn list_resources(
        &self,
        kind: &ResourceKind,
        service_id: &ServiceId,
        version: VersionNumber,
    ) -> Result<Vec<Resource>, ApiError> {
        self.enter(MockOperation::ListResources {
            kind: kind.id,
            service_id: service_id.clone(),
            version,
        })?;

        let inner = self.inner.lock().unwrap();
        inner.version(service_id, version)?;
        Ok(inner
            .resources
            .iter()
            .filter(|((sid, v, k, _), _)| sid == service_id && *v == version && *k == kind.id)
            .map(|(_, resource)| resource.clone())
            .collect())
    }

    async fn create_resource(
        &self,
        kind: &ResourceKind,
        resource: &Resource,
    ) -> Result<Resource, ApiError> {
        self.enter(MockOperation::CreateResource {
            kind: kind.id,
            resource: resource.clone(),
        })?;

        let mut inner = self.inner.lock().unwrap();
        inner.ensure_editable(&resource.service_id, resource.version)?;

        let key = store_key(kind, &resource.service_id, resource.version, &resource.name);
        if inner.resources.contains_key(&key) {
            return Err(ApiError::Status {
                status: 409,
                message: format!("duplicate logging endpoint '{}'", resource.name),
            });
        }
        inner.resources.insert(key, resource.clone());
        Ok(resource.clone())
    }

    async fn update_resource(
        &self,
        kind: &ResourceKind,
        payload: &UpdatePayload,
    ) -> Result<Resource, ApiError> {
        self.enter(MockOperation::UpdateResource {
            kind: kind.id,
            payload: payload.clone(),
        })?;

        let key = &payload.key;
        let mut inner = self.inner.lock().unwrap();
        inner.ensure_editable(&key.service_id, key.version)?;

        let old_key = store_key(kind, &key.service_id, key.version, &key.name);
        if !inner.resources.contains_key(&old_key) {
            return Err(resource_not_found(kind, key));
        }

        let mut updated = payload.resource.clone();
        updated.service_id = key.service_id.clone();
        updated.version = key.version;
        let new_key = store_key(kind, &key.service_id, key.version, &updated.name);
        if new_key != old_key && inner.resources.contains_key(&new_key) {
            return Err(ApiError::Status {
                status: 409,
                message: format!("duplicate logging endpoint '{}'", updated.name),
            });
        }

        inner.resources.remove(&old_key);
        inner.resources.insert(new_key, updated.clone());
        Ok(updated)
    }

    async fn delete_resource(
        &self,
        kind: &ResourceKind,
        key: &ResourceKey,
    ) -> Result<(), ApiError> {
        self.enter(MockOperation::DeleteResource {
            kind: kind.id,
            key: key.clone(),
        })?;

        let mut inner = self.inner.lock().unwrap();
        inner.ensure_editable(&key.service_id, key.version)?;
        inner
            .resources
            .remove(&store_key(kind, &key.service_id, key.version, &key.name))
            .map(|_| ())
            .ok_or_else(|| resource_not_found(kind, key))
    }
}
