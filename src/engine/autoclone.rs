//! engine::autoclone
//!
//! Decides whether a command may touch the resolved version.
//!
//! # States
//!
//! ```text
//!                      read-only, or editable
//!   NeedsDecision ─────────────────────────────▶ SafeToMutate
//!        │
//!        │ mutating and active/locked
//!        ├── --autoclone ──▶ clone_version ───▶ Cloned  (later steps use the clone)
//!        └── otherwise ───────────────────────▶ Blocked (AutoCloneRequired)
//! ```
//!
//! The guard makes exactly one decision per invocation: [`AutoCloneGuard::run`]
//! consumes it.

use std::fmt;

use tracing::{debug, info};

use super::EngineError;
use crate::api::Api;
use crate::core::types::{ServiceId, ServiceVersion, VersionNumber};

/// Guard lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    NeedsDecision,
    SafeToMutate,
    Cloned,
    Blocked,
}

impl fmt::Display for GuardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GuardState::NeedsDecision => "needs-decision",
            GuardState::SafeToMutate => "safe-to-mutate",
            GuardState::Cloned => "cloned",
            GuardState::Blocked => "blocked",
        };
        write!(f, "{}", s)
    }
}

/// What the guard will do, computed without side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Use the resolved version as is.
    Proceed,
    /// Clone the resolved version and use the clone.
    Clone,
    /// Refuse; the user must opt into `--autoclone`.
    Block,
}

impl Decision {
    /// The state the guard ends in after acting on this decision.
    pub fn target_state(self) -> GuardState {
        match self {
            Decision::Proceed => GuardState::SafeToMutate,
            Decision::Clone => GuardState::Cloned,
            Decision::Block => GuardState::Blocked,
        }
    }
}

/// Result of a successful guard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOutcome {
    /// `SafeToMutate` or `Cloned`.
    pub state: GuardState,
    /// The version every later step must target.
    pub version: ServiceVersion,
    /// The original version, when a clone was made.
    pub cloned_from: Option<VersionNumber>,
}

/// The notice printed after an automatic clone of `from` into `to`.
pub fn clone_notice(from: VersionNumber, to: VersionNumber) -> String {
    format!(
        "Service version {} is not editable, so it was automatically cloned because --autoclone is enabled. Now operating on version {}.",
        from, to
    )
}

/// The autoclone guard for one invocation.
#[derive(Debug, Clone)]
pub struct AutoCloneGuard {
    version: ServiceVersion,
    autoclone: bool,
    mutating: bool,
}

impl AutoCloneGuard {
    pub fn new(version: ServiceVersion, autoclone: bool, mutating: bool) -> Self {
        Self {
            version,
            autoclone,
            mutating,
        }
    }

    /// Before [`run`](Self::run), the guard is always undecided.
    pub fn state(&self) -> GuardState {
        GuardState::NeedsDecision
    }

    /// The transition the guard will take.
    pub fn decide(&self) -> Decision {
        if !self.mutating || self.version.is_editable() {
            Decision::Proceed
        } else if self.autoclone {
            Decision::Clone
        } else {
            Decision::Block
        }
    }

    /// Act on the decision.
    ///
    /// # Errors
    ///
    /// `AutoCloneRequired` when blocked; API errors from the clone call
    /// verbatim.
    pub async fn run(
        self,
        api: &dyn Api,
        service_id: &ServiceId,
    ) -> Result<GuardOutcome, EngineError> {
        let decision = self.decide();
        debug!(
            service = %service_id,
            version = %self.version.number,
            from = %self.state(),
            to = %decision.target_state(),
            "autoclone guard"
        );
        match decision {
            Decision::Proceed => Ok(GuardOutcome {
                state: decision.target_state(),
                version: self.version,
                cloned_from: None,
            }),
            Decision::Block => Err(EngineError::AutoCloneRequired {
                version: self.version.number,
            }),
            Decision::Clone => {
                let from = self.version.number;
                let clone = api.clone_version(service_id, from).await?;
                info!(service = %service_id, from = %from, to = %clone.number, "cloned service version");
                Ok(GuardOutcome {
                    state: decision.target_state(),
                    version: clone,
                    cloned_from: Some(from),
                })
            }
        }
    }
}
