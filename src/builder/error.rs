//! Build errors for the statechart builder.

use crate::engine::TransitionError;
use crate::registry::RegistryError;
use thiserror::Error;

/// Errors that can occur when building a statechart.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A declared state could not be registered.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Strict mode found broken or looping parent links. Every problem is
    /// listed, not just the first.
    #[error("invalid state topology: {} problem(s)", .0.len())]
    InvalidTopology(Vec<RegistryError>),

    /// An initial state could not be entered.
    #[error("initial transition failed: {0}")]
    Initial(#[from] TransitionError),
}
