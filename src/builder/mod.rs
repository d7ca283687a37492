//! Builder API for ergonomic statechart construction.
//!
//! A builder collects configuration, declared states and initial states,
//! then registers and enters them in one step.

mod chart;
pub mod error;

pub use chart::StatechartBuilder;
pub use error::BuildError;

use crate::core::StateDefinition;

/// Declare a set of behaviourless states from `(name, parent)` pairs.
///
/// Handy for composite states that only group their children.
///
/// # Example
///
/// ```
/// use statechart::builder::{passive_states, StatechartBuilder};
///
/// let chart = passive_states::<()>(&[("editor", None), ("editing", Some("editor"))])
///     .into_iter()
///     .fold(StatechartBuilder::new(), |builder, (name, definition)| {
///         builder.state(name, definition)
///     })
///     .initial("editing")
///     .build()
///     .unwrap();
///
/// assert!(chart.current_state(None).is_some());
/// ```
pub fn passive_states<Env>(
    states: &[(&str, Option<&str>)],
) -> Vec<(String, StateDefinition<Env>)> {
    states
        .iter()
        .map(|(name, parent)| {
            let definition = StateDefinition::passive();
            let definition = match parent {
                Some(parent) => definition.parent(*parent),
                None => definition,
            };
            (name.to_string(), definition)
        })
        .collect()
}
