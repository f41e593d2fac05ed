//! engine::version
//!
//! Turns a `--version` specifier into a concrete version record.
//!
//! - A literal number is fetched directly; "not found" becomes
//!   [`EngineError::VersionNotFound`], other API errors pass through.
//! - `active` picks the version flagged active.
//! - `latest` picks the highest number, whatever its state.

use tracing::debug;

use super::EngineError;
use crate::api::{Api, ApiError};
use crate::core::types::{ServiceId, ServiceVersion, VersionSpecifier};

/// Resolves version specifiers against the platform.
pub struct VersionResolver<'a> {
    api: &'a dyn Api,
}

impl<'a> VersionResolver<'a> {
    pub fn new(api: &'a dyn Api) -> Self {
        Self { api }
    }

    /// Resolve `specifier` for `service_id`.
    pub async fn resolve(
        &self,
        service_id: &ServiceId,
        specifier: VersionSpecifier,
    ) -> Result<ServiceVersion, EngineError> {
        let not_found = || EngineError::VersionNotFound {
            service_id: service_id.clone(),
            specifier,
        };

        let resolved = match specifier {
            VersionSpecifier::Number(number) => {
                match self.api.get_version(service_id, number).await {
                    Ok(version) => version,
                    Err(ApiError::NotFound(_)) => return Err(not_found()),
                    Err(e) => return Err(e.into()),
                }
            }
            VersionSpecifier::Active => {
                let versions = self.api.list_versions(service_id).await?;
                select_active(&versions).cloned().ok_or_else(not_found)?
            }
            VersionSpecifier::Latest => {
                let versions = self.api.list_versions(service_id).await?;
                select_latest(&versions).cloned().ok_or_else(not_found)?
            }
        };

        debug!(
            service = %service_id,
            %specifier,
            version = %resolved.number,
            active = resolved.active,
            locked = resolved.locked,
            "resolved version"
        );
        Ok(resolved)
    }
}

/// The version with the highest number.
pub fn select_latest(versions: &[ServiceVersion]) -> Option<&ServiceVersion> {
    versions.iter().max_by_key(|v| v.number)
}

/// The active version, if any.
pub fn select_active(versions: &[ServiceVersion]) -> Option<&ServiceVersion> {
    versions.iter().find(|v| v.active)
}
