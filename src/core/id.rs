//! Arena identifiers for states and trees.
//!
//! States never hold references to one another. Parent links are stored by
//! name and resolved to a [`StateId`] on demand, so an ancestor walk is a
//! sequence of index lookups into the registry arena.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the tree used when neither the caller nor the state definition
/// names one.
pub const DEFAULT_TREE: &str = "default";

/// Synthetic parent name denoting the implicit top-level ancestor.
pub const ROOT: &str = "root";

/// Handle to a registered state.
///
/// Handles are only meaningful for the statechart that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// Position of the state in registration order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "state#{}", self.0)
    }
}

/// Handle to a parallel region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TreeId(pub(crate) usize);

impl TreeId {
    /// Position of the tree in creation order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tree#{}", self.0)
    }
}
