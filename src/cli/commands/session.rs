//! Shared setup for commands that talk to the platform.
//!
//! Order matters: the service id is resolved (and may fail) before any
//! credentials are looked up or any client is built.

use anyhow::{Context as _, Result};

use crate::api::http::HttpApi;
use crate::core::config::Config;
use crate::core::manifest::Manifest;
use crate::core::types::ServiceId;
use crate::engine::identity::SERVICE_ID_ENV;
use crate::engine::token::{resolve_endpoint, ENDPOINT_ENV, TOKEN_ENV};
use crate::engine::{Context, ServiceIdentity, ServiceIdentityResolver, TokenResolver};
use crate::ui::output::{self, Verbosity};

/// Read an environment variable, treating unset and non-UTF-8 alike.
pub(super) fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Resolve the service id from flag, environment and `edge.toml`.
pub fn resolve_identity(ctx: &Context) -> Result<ServiceIdentity> {
    resolve_identity_with(ctx, env_var(SERVICE_ID_ENV).as_deref())
}

/// `edge.toml` is read only when neither `--service-id` nor `env` holds a
/// non-blank value.
fn resolve_identity_with(ctx: &Context, env: Option<&str>) -> Result<ServiceIdentity> {
    let resolver = ServiceIdentityResolver::new()
        .flag(ctx.service_id.as_deref())
        .env(env);
    let manifest = if resolver.needs_manifest() {
        let dir = ctx.working_dir().context("Failed to determine working directory")?;
        Manifest::load(&dir)?
    } else {
        None
    };

    Ok(resolver
        .manifest(manifest.as_ref().and_then(Manifest::service_id))
        .resolve())
}

/// The validated service id, printing its provenance in verbose mode.
pub fn require_service(ctx: &Context, verbosity: Verbosity) -> Result<ServiceId> {
    let identity = resolve_identity(ctx)?;
    output::verbose(identity.describe(), verbosity);
    Ok(identity.require()?)
}

/// Build the platform client from the token and endpoint settings.
pub fn connect(ctx: &Context, verbosity: Verbosity) -> Result<HttpApi> {
    let config = Config::load().context("Failed to load config")?;
    let env_token = env_var(TOKEN_ENV);
    let (token, source) = TokenResolver::new(&config)
        .flag(ctx.token.as_deref())
        .env(env_token.as_deref())
        .profile(ctx.profile.as_deref())
        .resolve()?;
    let endpoint = resolve_endpoint(
        ctx.api.as_deref(),
        env_var(ENDPOINT_ENV).as_deref(),
        &config,
    );
    output::verbose(format!("Token (via {})", source), verbosity);
    output::verbose(format!("API endpoint: {}", endpoint), verbosity);
    Ok(HttpApi::new(token, endpoint))
}

/// Drive one async command to completion.
pub fn block_on<F: std::future::Future>(future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    Ok(rt.block_on(future))
}
