//! Builder for constructing statecharts.

use crate::builder::error::BuildError;
use crate::chart::{StateHost, Statechart, StatechartConfig};
use crate::core::{PendingState, StateDefinition};
use stillwater::validation::Validation;

/// Builder for constructing statecharts with a fluent API.
///
/// States handed to the builder, directly or through a [`StateHost`], are
/// registered once, in the order given, when [`build`](Self::build) runs.
pub struct StatechartBuilder<Env> {
    config: StatechartConfig,
    declared: Vec<(String, PendingState<Env>)>,
    initial: Vec<(Option<String>, String)>,
    strict: bool,
}

impl<Env> StatechartBuilder<Env> {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: StatechartConfig::default(),
            declared: Vec::new(),
            initial: Vec::new(),
            strict: false,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: StatechartConfig) -> Self {
        self.config = config;
        self
    }

    pub fn default_tree(mut self, tree: impl Into<String>) -> Self {
        self.config.default_tree = tree.into();
        self
    }

    /// Enable or disable the dispatch trace.
    pub fn trace(mut self, enabled: bool) -> Self {
        self.config.trace = enabled;
        self
    }

    pub fn journal_capacity(mut self, capacity: usize) -> Self {
        self.config.journal_capacity = capacity;
        self
    }

    /// Declare a state.
    pub fn state(mut self, name: impl Into<String>, definition: StateDefinition<Env>) -> Self {
        self.declared
            .push((name.into(), PendingState::new(definition)));
        self
    }

    /// Take every unregistered state `host` still holds.
    pub fn host(mut self, host: &mut dyn StateHost<Env>) -> Self {
        self.declared.extend(host.take_unregistered_states());
        self
    }

    /// Enter `name` in the default tree once the statechart is built.
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.initial.push((None, name.into()));
        self
    }

    /// Enter `name` in `tree` once the statechart is built.
    pub fn initial_in(mut self, tree: impl Into<String>, name: impl Into<String>) -> Self {
        self.initial.push((Some(tree.into()), name.into()));
        self
    }

    /// Reject broken or looping parent links at build time.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Build the statechart.
    ///
    /// Registers every declared state, validates the topology in strict
    /// mode, then enters the initial states in the order they were given.
    pub fn build(self) -> Result<Statechart<Env>, BuildError> {
        let mut chart = Statechart::with_config(self.config);
        chart.adopt(self.declared)?;

        if self.strict {
            if let Validation::Failure(errors) = chart.validate() {
                return Err(BuildError::InvalidTopology(errors.iter().cloned().collect()));
            }
        }

        for (tree, name) in &self.initial {
            chart.go_to_state(name, tree.as_deref())?;
        }

        Ok(chart)
    }
}

impl<Env> Default for StatechartBuilder<Env> {
    fn default() -> Self {
        Self::new()
    }
}
