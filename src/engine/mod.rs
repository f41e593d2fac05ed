//! engine
//!
//! Service/version resolution and partial-update engine.
//!
//! # Architecture
//!
//! Every logging endpoint command runs the same pipeline:
//!
//! ```text
//! Validate flags -> Resolve identity -> Resolve version -> Guard (autoclone) -> Build payload -> Call API
//! ```
//!
//! 1. **Validate**: mutually exclusive flags, required fields and flag
//!    dependencies are checked before any network call ([`exclusion`],
//!    [`create`], [`dependency`])
//! 2. **Identity**: which service, from flag, environment or manifest
//!    ([`identity`])
//! 3. **Version**: `latest`, `active` or a literal number becomes a concrete
//!    version record ([`version`])
//! 4. **Guard**: a mutating command on an active or locked version either
//!    clones it (`--autoclone`) or stops ([`autoclone`])
//! 5. **Payload**: update payloads are the baseline resource overlaid with
//!    only the flags the user actually set ([`update`])
//!
//! [`invocation`] wires the steps together.
//!
//! # Invariants
//!
//! - No network call happens before flag validation and identity resolution
//! - A locked or active version is never mutated in place
//! - An unset flag never changes a field
//! - Nothing is retried; a clone is never rolled back

pub mod autoclone;
pub mod create;
pub mod dependency;
pub mod exclusion;
pub mod identity;
pub mod invocation;
pub mod token;
pub mod update;
pub mod version;

pub use autoclone::{AutoCloneGuard, Decision, GuardOutcome, GuardState};
pub use dependency::FlagDependencyValidator;
pub use exclusion::MutualExclusionValidator;
pub use identity::{IdentitySource, ServiceIdentity, ServiceIdentityResolver};
pub use invocation::{execute, EndpointRequest, Outcome, OutcomeData};
pub use token::{TokenResolver, TokenSource};
pub use update::PartialUpdateBuilder;
pub use version::VersionResolver;

use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;
use crate::core::resource::ResourceError;
use crate::core::types::{ServiceId, TypeError, VersionNumber, VersionSpecifier};

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags. Passed explicitly to
/// every handler; nothing here is global state.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Verbose output.
    pub verbose: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Machine-readable output.
    pub json: bool,
    /// `--service-id`, if given.
    pub service_id: Option<String>,
    /// `--token`, if given.
    pub token: Option<String>,
    /// `--profile`, if given.
    pub profile: Option<String>,
    /// `--api`, if given.
    pub api: Option<String>,
}

impl Context {
    /// The directory to look for `edge.toml` in.
    pub fn working_dir(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }
}

/// Errors from engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No service id from any source.
    #[error("no service ID found. Provide one with --service-id, the {env} environment variable, or service_id in edge.toml", env = identity::SERVICE_ID_ENV)]
    NoServiceId,

    /// A service id was found but is malformed.
    #[error("invalid service ID (via {source_name}): {error}")]
    InvalidServiceId {
        source_name: IdentitySource,
        error: TypeError,
    },

    /// No API token from any source.
    #[error("no API token found. Provide one with --token, the {env} environment variable, or a profile in the config file", env = token::TOKEN_ENV)]
    NoToken,

    /// The requested version does not exist.
    #[error("service {service_id} has no version matching '{specifier}'")]
    VersionNotFound {
        service_id: ServiceId,
        specifier: VersionSpecifier,
    },

    /// Mutation requested on a non-editable version without `--autoclone`.
    #[error("service version {version} is not editable (it is active or locked). Re-run with --autoclone to apply the change to a clone of it")]
    AutoCloneRequired { version: VersionNumber },

    /// Two flags that may not be combined were both set.
    #[error("--{first} and --{second} are mutually exclusive")]
    MutuallyExclusiveFlags {
        first: &'static str,
        second: &'static str,
    },

    /// A flag required by the command was not supplied.
    #[error("missing required flag --{flag}")]
    MissingRequiredFlag { flag: &'static str },

    /// None of a kind's credential groups was given on create.
    #[error("missing credentials: provide {groups}")]
    MissingFlagGroup { groups: String },

    /// A gate flag is on but one of the flags it requires is missing.
    #[error("--{by} requires --{flag}")]
    RequiredByFlag {
        flag: &'static str,
        by: &'static str,
    },

    /// A flag was given without the gate flag it depends on.
    #[error("--{flag} is only valid with --{gate}")]
    OnlyValidWith {
        flag: &'static str,
        gate: &'static str,
    },

    /// A step failed after `--autoclone` made a clone, which was kept.
    /// Displays as the underlying error.
    #[error("{cause}")]
    FailedAfterClone {
        from: VersionNumber,
        clone: VersionNumber,
        cause: Box<EngineError>,
    },

    /// A flag value could not be converted.
    #[error(transparent)]
    InvalidFlagValue(#[from] ResourceError),

    /// Platform API failure, passed through unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),
}
