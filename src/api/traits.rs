//! api::traits
//!
//! The `Api` trait: every platform operation the engine needs.
//!
//! # Design
//!
//! The trait is async because the HTTP implementation is. Resource
//! operations are generic over a [`ResourceKind`] descriptor rather than
//! having one method per logging endpoint type.
//!
//! # Example
//!
//! ```
//! use edgectl::api::mock::MockApi;
//! use edgectl::api::Api;
//! use edgectl::core::types::ServiceId;
//!
//! # tokio_test::block_on(async {
//! let sid = ServiceId::new("123").unwrap();
//! let api = MockApi::new().with_versions(&sid, &[(1, true, true), (2, false, false)]);
//!
//! let versions = api.list_versions(&sid).await.unwrap();
//! assert_eq!(versions.len(), 2);
//! # });
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::core::resource::{Resource, ResourceKey, ResourceKind};
use crate::core::types::{ServiceId, ServiceVersion, VersionNumber};

/// Errors from platform API operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Token rejected, expired, or lacking permission.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested service, version or resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// Any other non-success status.
    #[error("API error: {status} - {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Connection or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// A success response whose body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A full-record update of one resource.
///
/// `key` addresses the resource as it exists now; `resource` is the record
/// to store, which may carry a different name.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePayload {
    pub key: ResourceKey,
    pub resource: Resource,
}

/// Platform operations.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`.
///
/// # Error Handling
///
/// All methods return `Result<T, ApiError>`. Callers never retry; errors
/// propagate to the user unchanged except where the engine maps
/// `NotFound` on a version lookup to its own "version not found".
#[async_trait]
pub trait Api: Send + Sync {
    /// All versions of a service, in whatever order the platform returns.
    async fn list_versions(&self, service_id: &ServiceId)
        -> Result<Vec<ServiceVersion>, ApiError>;

    /// One version of a service.
    async fn get_version(
        &self,
        service_id: &ServiceId,
        version: VersionNumber,
    ) -> Result<ServiceVersion, ApiError>;

    /// Clone `version` into a new editable version, returning the new record.
    async fn clone_version(
        &self,
        service_id: &ServiceId,
        version: VersionNumber,
    ) -> Result<ServiceVersion, ApiError>;

    /// Fetch one resource.
    async fn get_resource(
        &self,
        kind: &ResourceKind,
        key: &ResourceKey,
    ) -> Result<Resource, ApiError>;

    /// All resources of `kind` on a version.
    async fn list_resources(
        &self,
        kind: &ResourceKind,
        service_id: &ServiceId,
        version: VersionNumber,
    ) -> Result<Vec<Resource>, ApiError>;

    /// Create a resource.
    async fn create_resource(
        &self,
        kind: &ResourceKind,
        resource: &Resource,
    ) -> Result<Resource, ApiError>;

    /// Replace a resource with `payload.resource`.
    async fn update_resource(
        &self,
        kind: &ResourceKind,
        payload: &UpdatePayload,
    ) -> Result<Resource, ApiError>;

    /// Delete a resource.
    async fn delete_resource(&self, kind: &ResourceKind, key: &ResourceKey)
        -> Result<(), ApiError>;
}
