//! cli
//!
//! Command-line interface layer for edgectl.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Build the `logging` command tree from the resource catalog
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! [`crate::engine`] for execution. Settings reach handlers through an
//! explicit [`engine::Context`].

pub mod args;
pub mod commands;
pub mod logging_args;

pub use args::{Cli, Shell};

use crate::engine;
use anyhow::Result;

/// Build the execution context from parsed flags.
pub fn context(cli: &Cli) -> engine::Context {
    engine::Context {
        cwd: cli.cwd.clone(),
        verbose: cli.verbose,
        quiet: cli.quiet,
        json: cli.json,
        service_id: cli.service_id.clone(),
        token: cli.token.clone(),
        profile: cli.profile.clone(),
        api: cli.api.clone(),
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    let ctx = context(&cli);
    commands::dispatch(cli.command, &ctx)
}
