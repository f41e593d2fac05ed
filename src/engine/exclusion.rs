//! engine::exclusion
//!
//! Rejects flag combinations a resource kind declares incompatible.
//!
//! Only flags the user actually set are considered, so a kind's defaults
//! never trip a conflict. The first offending pair, in declaration order,
//! is reported.

use std::collections::BTreeSet;

use super::EngineError;

/// Validator over a kind's exclusive flag pairs.
#[derive(Debug, Clone, Copy)]
pub struct MutualExclusionValidator<'a> {
    pairs: &'a [(&'static str, &'static str)],
}

impl<'a> MutualExclusionValidator<'a> {
    pub fn new(pairs: &'a [(&'static str, &'static str)]) -> Self {
        Self { pairs }
    }

    /// Fail if both flags of any pair are in `set_flags`.
    pub fn validate(&self, set_flags: &BTreeSet<&str>) -> Result<(), EngineError> {
        match self
            .pairs
            .iter()
            .find(|(a, b)| set_flags.contains(a) && set_flags.contains(b))
        {
            Some(&(first, second)) => Err(EngineError::MutuallyExclusiveFlags { first, second }),
            None => Ok(()),
        }
    }
}
