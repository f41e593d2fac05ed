//! api::http
//!
//! `Api` implementation over the platform's REST interface.
//!
//! # Endpoints
//!
//! ```text
//! GET    {api}/service/{sid}/version
//! GET    {api}/service/{sid}/version/{n}
//! PUT    {api}/service/{sid}/version/{n}/clone
//! GET    {api}/service/{sid}/version/{n}/logging/{kind}
//! POST   {api}/service/{sid}/version/{n}/logging/{kind}
//! GET    {api}/service/{sid}/version/{n}/logging/{kind}/{name}
//! PUT    {api}/service/{sid}/version/{n}/logging/{kind}/{name}
//! DELETE {api}/service/{sid}/version/{n}/logging/{kind}/{name}
//! ```
//!
//! Bodies are JSON. The token travels in the `Edge-Key` header.
//!
//! # Errors
//!
//! Status codes map onto [`ApiError`]: 401/403 to `AuthFailed`, 404 to
//! `NotFound`, 429 to `RateLimited`, anything else to `Status`. Transport
//! failures become `Network`. Nothing is retried.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::traits::{Api, ApiError, UpdatePayload};
use crate::core::resource::{Resource, ResourceKey, ResourceKind};
use crate::core::types::{ServiceId, ServiceVersion, VersionNumber};

/// Header carrying the API token.
pub const TOKEN_HEADER: &str = "Edge-Key";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = concat!("edgectl/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the platform API.
pub struct HttpApi {
    /// HTTP client for making requests
    client: Client,
    /// API token
    token: String,
    /// API base URL
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for HttpApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApi")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl HttpApi {
    /// Create a client for `api_base` authenticating with `token`.
    pub fn new(token: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            api_base: api_base.into(),
        }
    }

    /// The API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(&self.token)
            .map_err(|_| ApiError::AuthFailed("token contains invalid characters".into()))?;
        headers.insert(TOKEN_HEADER, token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }

    /// Build a URL from path segments; segments are percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let invalid =
            || ApiError::Network(format!("invalid API endpoint '{}'", self.api_base));
        let mut url = Url::parse(&self.api_base).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn version_url(
        &self,
        service_id: &ServiceId,
        version: Option<VersionNumber>,
        tail: &[&str],
    ) -> Result<Url, ApiError> {
        let number = version.map(|v| v.to_string());
        let mut segments = vec!["service", service_id.as_str(), "version"];
        if let Some(n) = &number {
            segments.push(n.as_str());
        }
        segments.extend_from_slice(tail);
        self.url(&segments)
    }

    fn logging_url(
        &self,
        kind: &ResourceKind,
        service_id: &ServiceId,
        version: VersionNumber,
        name: Option<&str>,
    ) -> Result<Url, ApiError> {
        let mut tail = vec!["logging", kind.path];
        if let Some(name) = name {
            tail.push(name);
        }
        self.version_url(service_id, Some(version), &tail)
    }

    /// Attach headers and send.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        request
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("failed to parse response: {}", e)))
        } else {
            Self::handle_error_response(response, status).await
        }
    }

    /// Handle an error response from the API.
    async fn handle_error_response<T>(
        response: Response,
        status: StatusCode,
    ) -> Result<T, ApiError> {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message(),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };

        Err(match status {
            StatusCode::UNAUTHORIZED => ApiError::AuthFailed("invalid or expired token".into()),
            StatusCode::FORBIDDEN => ApiError::AuthFailed(format!("permission denied: {}", message)),
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited,
            _ => ApiError::Status {
                status: status.as_u16(),
                message,
            },
        })
    }
}

/// Error body shape: `{"msg": "...", "detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    detail: Option<String>,
}

impl ErrorBody {
    fn message(self) -> String {
        match (self.msg, self.detail) {
            (Some(msg), Some(detail)) if !detail.is_empty() => format!("{}: {}", msg, detail),
            (Some(msg), _) => msg,
            (None, Some(detail)) => detail,
            (None, None) => "Unknown error".to_string(),
        }
    }
}

/// Turn a wire object into a [`Resource`] on the requested version.
///
/// Identity keys are taken from the request rather than the body, and any
/// key the kind does not declare (timestamps, ids) is dropped.
fn decode_resource(
    kind: &ResourceKind,
    service_id: &ServiceId,
    version: VersionNumber,
    mut object: Map<String, Value>,
) -> Result<Resource, ApiError> {
    let name = match object.remove("name") {
        Some(Value::String(name)) => name,
        _ => {
            return Err(ApiError::InvalidResponse(format!(
                "{} logging endpoint without a name",
                kind.display
            )))
        }
    };
    let fields: BTreeMap<String, Value> = object.into_iter().collect();
    Ok(Resource {
        service_id: service_id.clone(),
        version,
        name,
        fields: kind.restrict(fields),
    })
}

/// Request body for create/update: name plus every field.
fn encode_resource(resource: &Resource) -> Map<String, Value> {
    let mut body: Map<String, Value> = resource
        .fields
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    body.insert("name".to_string(), Value::String(resource.name.clone()));
    body
}

#[async_trait]
impl Api for HttpApi {
    async fn list_versions(
        &self,
        service_id: &ServiceId,
    ) -> Result<Vec<ServiceVersion>, ApiError> {
        let url = self.version_url(service_id, None, &[])?;
        debug!(%url, "list versions");
        let response = self.send(self.client.get(url)).await?;
        Self::handle_response(response).await
    }

    async fn get_version(
        &self,
        service_id: &ServiceId,
        version: VersionNumber,
    ) -> Result<ServiceVersion, ApiError> {
        let url = self.version_url(service_id, Some(version), &[])?;
        debug!(%url, "get version");
        let response = self.send(self.client.get(url)).await?;
        Self::handle_response(response).await
    }

    async fn clone_version(
        &self,
        service_id: &ServiceId,
        version: VersionNumber,
    ) -> Result<ServiceVersion, ApiError> {
        let url = self.version_url(service_id, Some(version), &["clone"])?;
        debug!(%url, "clone version");
        let response = self.send(self.client.put(url)).await?;
        Self::handle_response(response).await
    }

    async fn get_resource(
        &self,
        kind: &ResourceKind,
        key: &ResourceKey,
    ) -> Result<Resource, ApiError> {
        let url = self.logging_url(kind, &key.service_id, key.version, Some(&key.name))?;
        debug!(%url, kind = kind.id, "get resource");
        let response = self.send(self.client.get(url)).await?;
        let object: Map<String, Value> = Self::handle_response(response).await?;
        decode_resource(kind, &key.service_id, key.version, object)
    }

    async fn list_resources(
        &self,
        kind: &ResourceKind,
        service_id: &ServiceId,
        version: VersionNumber,
    ) -> Result<Vec<Resource>, ApiError> {
        let url = self.logging_url(kind, service_id, version, None)?;
        debug!(%url, kind = kind.id, "list resources");
        let response = self.send(self.client.get(url)).await?;
        let objects: Vec<Map<String, Value>> = Self::handle_response(response).await?;
        objects
            .into_iter()
            .map(|object| decode_resource(kind, service_id, version, object))
            .collect()
    }

    async fn create_resource(
        &self,
        kind: &ResourceKind,
        resource: &Resource,
    ) -> Result<Resource, ApiError> {
        let url = self.logging_url(kind, &resource.service_id, resource.version, None)?;
        debug!(%url, kind = kind.id, name = %resource.name, "create resource");
        let response = self
            .send(self.client.post(url).json(&encode_resource(resource)))
            .await?;
        let object: Map<String, Value> = Self::handle_response(response).await?;
        decode_resource(kind, &resource.service_id, resource.version, object)
    }

    async fn update_resource(
        &self,
        kind: &ResourceKind,
        payload: &UpdatePayload,
    ) -> Result<Resource, ApiError> {
        let key = &payload.key;
        let url = self.logging_url(kind, &key.service_id, key.version, Some(&key.name))?;
        debug!(%url, kind = kind.id, "update resource");
        let response = self
            .send(self.client.put(url).json(&encode_resource(&payload.resource)))
            .await?;
        let object: Map<String, Value> = Self::handle_response(response).await?;
        decode_resource(kind, &key.service_id, key.version, object)
    }

    async fn delete_resource(
        &self,
        kind: &ResourceKind,
        key: &ResourceKey,
    ) -> Result<(), ApiError> {
        let url = self.logging_url(kind, &key.service_id, key.version, Some(&key.name))?;
        debug!(%url, kind = kind.id, "delete resource");
        let response = self.send(self.client.delete(url)).await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Self::handle_error_response(response, status).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resource::catalog;
    use serde_json::json;

    fn sid() -> ServiceId {
        ServiceId::new("123").unwrap()
    }

    fn v(n: u32) -> VersionNumber {
        VersionNumber::new(n).unwrap()
    }

    mod urls {
        use super::*;

        #[test]
        fn version_paths() {
            let api = HttpApi::new("t", "https://api.example.com");
            assert_eq!(
                api.version_url(&sid(), None, &[]).unwrap().as_str(),
                "https://api.example.com/service/123/version"
            );
            assert_eq!(
                api.version_url(&sid(), Some(v(2)), &["clone"])
                    .unwrap()
                    .as_str(),
                "https://api.example.com/service/123/version/2/clone"
            );
        }

        #[test]
        fn trailing_slash_in_base() {
            let api = HttpApi::new("t", "https://api.example.com/");
            assert_eq!(
                api.version_url(&sid(), None, &[]).unwrap().as_str(),
                "https://api.example.com/service/123/version"
            );
        }

        #[test]
        fn logging_paths_use_kind_path_and_encode_names() {
            let api = HttpApi::new("t", "https://api.example.com");
            let pubsub = catalog::find("googlepubsub").unwrap();
            assert_eq!(
                api.logging_url(pubsub, &sid(), v(3), Some("my logs"))
                    .unwrap()
                    .as_str(),
                "https://api.example.com/service/123/version/3/logging/pubsub/my%20logs"
            );
        }

        #[test]
        fn invalid_base_is_error() {
            let api = HttpApi::new("t", "not a url");
            assert!(api.version_url(&sid(), None, &[]).is_err());
        }
    }

    #[test]
    fn debug_redacts_token() {
        let api = HttpApi::new("super-secret", "https://api.example.com");
        let debug = format!("{:?}", api);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("api.example.com"));
    }

    #[test]
    fn headers_reject_bad_token() {
        let api = HttpApi::new("line\nbreak", "https://api.example.com");
        assert!(matches!(api.headers(), Err(ApiError::AuthFailed(_))));
    }

    #[test]
    fn decode_drops_undeclared_keys() {
        let s3 = catalog::find("s3").unwrap();
        let object = json!({
            "name": "logs",
            "service_id": "ignored",
            "version": "2",
            "bucket_name": "b",
            "created_at": "2026-01-01T00:00:00Z"
        });
        let Value::Object(object) = object else {
            unreachable!()
        };
        let resource = decode_resource(s3, &sid(), v(2), object).unwrap();
        assert_eq!(resource.name, "logs");
        assert_eq!(resource.service_id, sid());
        assert_eq!(resource.fields.len(), 1);
        assert_eq!(resource.fields["bucket_name"], json!("b"));
    }

    #[test]
    fn decode_requires_name() {
        let s3 = catalog::find("s3").unwrap();
        assert!(matches!(
            decode_resource(s3, &sid(), v(2), Map::new()),
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn error_body_message() {
        let body = ErrorBody {
            msg: Some("Bad request".into()),
            detail: Some("period must be positive".into()),
        };
        assert_eq!(body.message(), "Bad request: period must be positive");
    }
}
