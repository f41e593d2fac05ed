//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls the engine to execute the command
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! The platform client is async. Handlers stay synchronous and drive one
//! future at a time with a tokio runtime (see [`session::block_on`]).

mod completion;
mod config_cmd;
mod logging;
mod service_version;
pub mod session;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use logging::logging;
pub use service_version::service_version;

use crate::cli::args::{Command, ConfigAction};
use crate::engine::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Logging(args) => logging(ctx, args),
        Command::ServiceVersion { action } => service_version(ctx, action),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_get(ctx, &key),
            ConfigAction::Set { key, value } => config_set(ctx, &key, &value),
            ConfigAction::List => config_list(ctx),
        },
        Command::Completion { shell } => completion(shell),
    }
}
