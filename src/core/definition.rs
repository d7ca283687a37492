//! Declarative state definitions.

use super::state::{Passive, State};
use std::fmt;

/// Everything needed to build a state: its behaviour plus the declared
/// parent and parallel tree.
///
/// # Example
///
/// ```rust
/// use statechart::core::{Passive, StateDefinition};
///
/// let definition: StateDefinition<()> = StateDefinition::new(Passive)
///     .parent("editor")
///     .tree("document");
///
/// assert_eq!(definition.parent_name(), Some("editor"));
/// assert_eq!(definition.tree_name(), Some("document"));
/// ```
pub struct StateDefinition<Env> {
    pub(crate) behavior: Box<dyn State<Env>>,
    pub(crate) parent: Option<String>,
    pub(crate) tree: Option<String>,
}

impl<Env> StateDefinition<Env> {
    /// Define a top-level state with the given behaviour.
    pub fn new<S>(behavior: S) -> Self
    where
        S: State<Env> + 'static,
    {
        Self {
            behavior: Box::new(behavior),
            parent: None,
            tree: None,
        }
    }

    /// Define a state with no behaviour of its own.
    pub fn passive() -> Self {
        Self::new(Passive)
    }

    /// Set the parent state, by name.
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Declare the parallel tree this state belongs to.
    pub fn tree(mut self, tree: impl Into<String>) -> Self {
        self.tree = Some(tree.into());
        self
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn tree_name(&self) -> Option<&str> {
        self.tree.as_deref()
    }
}

impl<Env> fmt::Debug for StateDefinition<Env> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDefinition")
            .field("parent", &self.parent)
            .field("tree", &self.tree)
            .finish_non_exhaustive()
    }
}

/// A state built outside any statechart.
///
/// Pending states are not registered anywhere. A host hands them to a
/// statechart at construction, which registers them under the names the
/// host declared them with.
#[derive(Debug)]
pub struct PendingState<Env> {
    definition: StateDefinition<Env>,
}

impl<Env> PendingState<Env> {
    pub fn new(definition: StateDefinition<Env>) -> Self {
        Self { definition }
    }

    /// Always `false`: registering consumes the pending state.
    pub fn is_registered(&self) -> bool {
        false
    }

    pub fn definition(&self) -> &StateDefinition<Env> {
        &self.definition
    }

    pub(crate) fn into_definition(self) -> StateDefinition<Env> {
        self.definition
    }
}

impl<Env> From<StateDefinition<Env>> for PendingState<Env> {
    fn from(definition: StateDefinition<Env>) -> Self {
        Self::new(definition)
    }
}
