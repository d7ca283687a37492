//! The statechart instance: a registry of parallel trees, the transition
//! engine that moves each tree, and the dispatcher that offers actions to
//! every tree's active state.
//!
//! Each `Statechart` owns all of its states; there is no shared or global
//! registry. Every operation runs to completion before returning, and all
//! mutating operations take `&mut self`, so a statechart shared between
//! threads belongs behind a single lock.

mod config;
mod dispatch;
mod manager;
mod transition;

pub use config::{StatechartConfig, DEFAULT_JOURNAL_CAPACITY};
pub use manager::{register_state, Registration, StateHost, StateManager};

use crate::builder::StatechartBuilder;
use crate::core::{Directives, PendingState, StateDefinition, StateId, TreeId};
use crate::engine::{Journal, TransitionError};
use crate::registry::{Registry, RegistryError};
use std::fmt;
use uuid::Uuid;

/// A hierarchical, multi-region state machine.
///
/// # Example
///
/// ```rust
/// use statechart::{Statechart, StateDefinition};
///
/// let mut chart: Statechart<()> = Statechart::new();
/// chart.add_state("a", StateDefinition::passive()).unwrap();
/// chart.add_state("b", StateDefinition::passive().parent("a")).unwrap();
///
/// chart.go_to_state("b", None).unwrap();
///
/// let current = chart.current_state(None).unwrap();
/// assert_eq!(chart.state_name(current), Some("b"));
/// ```
pub struct Statechart<Env> {
    id: Uuid,
    config: StatechartConfig,
    registry: Registry<Env>,
    directives: Directives,
    journal: Journal,
    dispatching: bool,
}

impl<Env> Statechart<Env> {
    pub fn new() -> Self {
        Self::with_config(StatechartConfig::default())
    }

    pub fn with_config(config: StatechartConfig) -> Self {
        let registry = Registry::new(&config.default_tree);
        let journal = Journal::new(config.journal_capacity);
        Self {
            id: Uuid::new_v4(),
            config,
            registry,
            directives: Directives::default(),
            journal,
            dispatching: false,
        }
    }

    pub fn builder() -> StatechartBuilder<Env> {
        StatechartBuilder::new()
    }

    /// Unique identifier of this instance, attached to its log records.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &StatechartConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry<Env> {
        &self.registry
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Whether a dispatch is in progress.
    ///
    /// Set for the duration of [`dispatch`](Self::dispatch) and cleared
    /// afterwards. Nothing consults it.
    pub fn is_dispatching(&self) -> bool {
        self.dispatching
    }

    /// Register a state in its declared tree, or the default tree.
    pub fn add_state(
        &mut self,
        name: &str,
        definition: StateDefinition<Env>,
    ) -> Result<StateId, RegistryError> {
        self.registry.register(None, name, definition)
    }

    /// Register a state in `tree`, regardless of the tree it declares.
    pub fn add_state_to(
        &mut self,
        tree: &str,
        name: &str,
        definition: StateDefinition<Env>,
    ) -> Result<StateId, RegistryError> {
        self.registry.register(Some(tree), name, definition)
    }

    /// Register states a host declared before this statechart existed.
    pub(crate) fn adopt(
        &mut self,
        states: Vec<(String, PendingState<Env>)>,
    ) -> Result<(), RegistryError> {
        for (name, pending) in states {
            self.add_state(&name, pending.into_definition())?;
        }
        Ok(())
    }

    pub fn lookup(&self, tree: &str, name: &str) -> Option<StateId> {
        self.registry.lookup(tree, name)
    }

    pub fn state_name(&self, state: StateId) -> Option<&str> {
        self.registry.node(state).map(|node| node.name())
    }

    pub fn tree_name(&self, tree: TreeId) -> Option<&str> {
        self.registry.tree_name(tree)
    }

    /// Re-point a state's parent. `None` attaches it directly to the root.
    pub fn set_parent_state(
        &mut self,
        tree: &str,
        name: &str,
        parent: Option<&str>,
    ) -> Result<(), RegistryError> {
        self.registry.set_parent(tree, name, parent).map(|_| ())
    }

    /// Active state of `tree`, or of the default tree when `tree` is `None`.
    pub fn current_state(&self, tree: Option<&str>) -> Option<StateId> {
        let tree = match tree {
            Some(name) => self.registry.tree_id(name)?,
            None => self.registry.default_tree(),
        };
        self.registry.active(tree)
    }

    /// Move a tree to the state called `name`.
    ///
    /// Without a tree the default tree is used. That is rejected with
    /// `MissingTree` when the default tree has no such state but another
    /// tree does.
    pub fn go_to_state(&mut self, name: &str, tree: Option<&str>) -> Result<(), TransitionError> {
        let tree = match tree {
            Some(tree) => tree.to_string(),
            None => self.implied_tree(name)?,
        };
        self.transition(&tree, name).map(|_| ())
    }

    fn implied_tree(&self, name: &str) -> Result<String, TransitionError> {
        let default = self.registry.default_tree();
        let elsewhere = self
            .registry
            .trees()
            .filter(|tree| *tree != default)
            .any(|tree| self.registry.resolve(tree, name).is_some());
        if self.registry.resolve(default, name).is_none() && elsewhere {
            return Err(TransitionError::MissingTree {
                state: name.to_string(),
            });
        }
        Ok(self.config.default_tree.clone())
    }
}

impl<Env> Default for Statechart<Env> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Env> fmt::Debug for Statechart<Env> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statechart")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("dispatching", &self.dispatching)
            .finish_non_exhaustive()
    }
}
