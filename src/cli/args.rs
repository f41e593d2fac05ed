//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--cwd <path>`: Look for `edge.toml` in that directory
//! - `--verbose` / `-v`: Show resolution details and debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Machine-readable output
//! - `--service-id` / `-s`, `--token` / `-t`, `--profile` / `-p`, `--api`
//!
//! The `logging` subtree is generated from the resource catalog; see
//! [`super::logging_args`].

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::logging_args::LoggingArgs;
use crate::core::types::VersionSpecifier;

/// edgectl - manage logging endpoints on edge service versions
#[derive(Parser, Debug)]
#[command(name = "edgectl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Look for edge.toml in this directory instead of the current one
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Show how the service and version were resolved, and debug logs
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Service ID (overrides EDGE_SERVICE_ID and edge.toml)
    #[arg(short = 's', long, global = true, value_name = "ID")]
    pub service_id: Option<String>,

    /// API token (overrides EDGE_API_TOKEN and the config file)
    #[arg(short = 't', long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Config profile to take the token from
    #[arg(short = 'p', long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// API endpoint (overrides EDGE_API_ENDPOINT and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage logging endpoints
    #[command(
        name = "logging",
        long_about = "Create, describe, list, update and delete logging endpoints.\n\n\
            Every endpoint lives on a service version. Pick the version with \
            --version (a number, 'latest' or 'active'). Active and locked versions \
            cannot be changed in place: pass --autoclone to apply the change to a \
            fresh clone of the version instead.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Create an S3 endpoint on the newest version
    edgectl logging s3 create --version latest --name logs --bucket my-bucket

    # Change one field on the active version, cloning it first
    edgectl logging s3 update --version active --autoclone --name logs --period 600

    # See what is configured
    edgectl logging s3 list --version active
    edgectl logging s3 describe --version 3 --name logs --json

NOTES:
    Update only changes the fields you pass. Everything else keeps its current value."
    )]
    Logging(LoggingArgs),

    /// Inspect and clone service versions
    #[command(name = "service-version")]
    ServiceVersion {
        #[command(subcommand)]
        action: VersionAction,
    },

    /// Get, set, or list configuration values
    #[command(
        name = "config",
        long_about = "Read and write the user configuration file.\n\n\
            Keys: api_endpoint, default_profile, profiles.<name>.token, \
            profiles.<name>.email.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Store a token under a profile and make it the default
    edgectl config set profiles.work.token abc123
    edgectl config set default_profile work

    # Show everything (tokens are masked)
    edgectl config list"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for edgectl commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    edgectl completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    edgectl completion zsh >> ~/.zshrc

    # Fish
    edgectl completion fish > ~/.config/fish/completions/edgectl.fish

    # PowerShell
    edgectl completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum VersionAction {
    /// List all versions of the service
    List,
    /// Clone a version into a new editable one
    Clone {
        /// Version to clone: a number, 'latest' or 'active'
        #[arg(long, value_name = "VERSION", value_parser = parse_version)]
        version: VersionSpecifier,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Value parser shared by every `--version` flag.
pub(crate) fn parse_version(raw: &str) -> Result<VersionSpecifier, String> {
    raw.parse().map_err(|e| format!("{}", e))
}
