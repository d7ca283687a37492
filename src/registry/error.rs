//! Registry error types.

use thiserror::Error;

/// Errors raised while registering or resolving states.
///
/// All of these are configuration or programming errors: none is transient
/// and none is retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("state '{name}' already exists in tree '{tree}'")]
    DuplicateState { tree: String, name: String },

    #[error("no tree named '{tree}'")]
    UnknownTree { tree: String },

    #[error("no state named '{name}' in tree '{tree}'")]
    UnknownState { tree: String, name: String },

    #[error("state '{state}' in tree '{tree}' names missing parent '{parent}'")]
    BrokenParentLink {
        tree: String,
        state: String,
        parent: String,
    },

    #[error("parent links of state '{state}' in tree '{tree}' form a cycle")]
    ParentCycle { tree: String, state: String },

    #[error("cannot add state '{state}': manager is not a statechart")]
    NotAStatechart { state: String },
}
