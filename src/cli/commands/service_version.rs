//! service-version command - List and clone service versions

use anyhow::Result;
use serde_json::json;
use tracing::info;

use super::session;
use crate::api::Api;
use crate::cli::args::VersionAction;
use crate::engine::{Context, VersionResolver};
use crate::ui::output::{self, Verbosity};

/// Dispatch a `service-version` action.
pub fn service_version(ctx: &Context, action: VersionAction) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.verbose);
    let service_id = session::require_service(ctx, verbosity)?;
    let api = session::connect(ctx, verbosity)?;

    match action {
        VersionAction::List => {
            let mut versions = session::block_on(api.list_versions(&service_id))??;
            versions.sort_by_key(|v| v.number);
            if ctx.json {
                output::print_json(&versions)
            } else {
                output::print(output::format_versions(&versions), verbosity);
                Ok(())
            }
        }
        VersionAction::Clone { version } => {
            let (from, to) = session::block_on(async {
                let from = VersionResolver::new(&api).resolve(&service_id, version).await?;
                let to = api.clone_version(&service_id, from.number).await?;
                Ok::<_, anyhow::Error>((from, to))
            })??;
            info!(service = %service_id, from = %from.number, to = %to.number, "cloned service version");

            if ctx.json {
                output::print_json(&json!({
                    "service_id": service_id,
                    "cloned_from": from.number,
                    "version": to,
                }))
            } else {
                output::success(
                    format!(
                        "Cloned service {} version {} to version {}",
                        service_id, from.number, to.number
                    ),
                    verbosity,
                );
                Ok(())
            }
        }
    }
}
