//! logging command - Manage logging endpoints

use anyhow::{Context as _, Result};
use serde_json::json;

use super::session;
use crate::cli::logging_args::LoggingArgs;
use crate::engine::invocation::validate_flags;
use crate::engine::{self, Context, EngineError, Outcome, OutcomeData};
use crate::ui::output::{self, Verbosity};

/// Run one `logging <kind> <verb>` command.
///
/// Flag conversion, flag validation and service resolution all happen
/// before the client is built.
pub fn logging(ctx: &Context, args: LoggingArgs) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.verbose);

    let request = args.into_request()?;
    validate_flags(&request)?;
    let service_id = session::require_service(ctx, verbosity)?;
    let api = session::connect(ctx, verbosity)?;

    let outcome = match session::block_on(engine::execute(&api, &service_id, &request))? {
        Ok(outcome) => outcome,
        Err(EngineError::FailedAfterClone { from, clone, cause }) => {
            return Err(*cause).with_context(|| {
                format!(
                    "service version {} was cloned to version {}, and the clone was kept",
                    from, clone
                )
            });
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(notice) = outcome.clone_notice() {
        output::verbose(notice, verbosity);
    }
    output::verbose(
        format!("Service version: {}", outcome.version.number),
        verbosity,
    );

    if ctx.json {
        print_json(&outcome)
    } else {
        print_text(&outcome, verbosity);
        Ok(())
    }
}

fn print_json(outcome: &Outcome) -> Result<()> {
    match &outcome.data {
        OutcomeData::Deleted => output::print_json(&json!({
            "service_id": outcome.service_id,
            "version": outcome.version.number,
            "name": outcome.name,
            "deleted": true,
        })),
        data => output::print_json(data),
    }
}

fn print_text(outcome: &Outcome, verbosity: Verbosity) {
    if let Some(confirmation) = outcome.confirmation() {
        output::success(confirmation, verbosity);
        return;
    }
    match &outcome.data {
        OutcomeData::Resource(resource) => {
            output::print(output::format_resource(outcome.kind, resource), verbosity)
        }
        OutcomeData::Resources(resources) if verbosity == Verbosity::Verbose => {
            let blocks: Vec<String> = resources
                .iter()
                .map(|r| output::format_resource(outcome.kind, r))
                .collect();
            output::print(blocks.join("\n\n"), verbosity);
        }
        OutcomeData::Resources(resources) => {
            let names: Vec<&str> = resources.iter().map(|r| r.name.as_str()).collect();
            if !names.is_empty() {
                output::print(output::format_list(&names, ""), verbosity);
            }
        }
        OutcomeData::Deleted => {}
    }
}
