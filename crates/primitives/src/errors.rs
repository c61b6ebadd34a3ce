//! Errors shared across portal crates.

use thiserror::Error;

/// Failure to satisfy a locking script.
///
/// This is the error shape of the script-engine seam. Typed rejection
/// reasons live with the components that construct solutions; by the time a
/// script is evaluated under the engine, all that remains is whether the
/// solution satisfied the locking condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The solution bytes do not decode into the shape the script expects.
    #[error("malformed solution: {0}")]
    MalformedSolution(String),

    /// The solution decodes but does not satisfy the locking condition.
    #[error("locking condition not satisfied: {0}")]
    Unsatisfied(String),
}

impl EvalError {
    /// Convenience constructor for rejections carrying a typed reason's
    /// rendering.
    pub fn unsatisfied(reason: impl std::fmt::Display) -> Self {
        Self::Unsatisfied(reason.to_string())
    }

    /// Convenience constructor for undecodable solutions.
    pub fn malformed(reason: impl std::fmt::Display) -> Self {
        Self::MalformedSolution(reason.to_string())
    }
}
