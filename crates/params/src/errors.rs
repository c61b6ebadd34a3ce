//! Errors for portal parameter validation.

use portal_primitives::prelude::Amount;
use thiserror::Error;

/// Error while validating deployment parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    /// No validators were configured.
    #[error("the validator set is empty")]
    EmptyValidatorSet,

    /// A validator key appears more than once.
    #[error("validator key at position {0} is a duplicate")]
    DuplicateValidator(usize),

    /// The threshold must be between one and the validator-set size.
    #[error("threshold {threshold} is invalid for {validators} validators")]
    InvalidThreshold {
        /// The configured threshold.
        threshold: usize,

        /// The configured validator-set size.
        validators: usize,
    },

    /// The termination fee cannot exceed the portal output's value.
    #[error("termination fee {0} exceeds the portal state value")]
    ExcessiveTerminationFee(Amount),
}
