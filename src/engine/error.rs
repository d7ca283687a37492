//! Transition error types.

use crate::core::{HookError, Phase};
use crate::registry::RegistryError;
use thiserror::Error;

/// Errors that can occur while moving a tree to a new state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// The target or one of the ancestor chains could not be resolved.
    /// Nothing has run when this is returned.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("state '{state}' is not in the default tree; name its tree explicitly")]
    MissingTree { state: String },

    /// A hook failed part-way through. Earlier hooks have already run and
    /// the tree's active state was not updated.
    #[error("{phase} hook of state '{state}' in tree '{tree}' failed: {source}")]
    HookFailed {
        tree: String,
        state: String,
        phase: Phase,
        #[source]
        source: HookError,
    },
}
