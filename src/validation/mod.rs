//! Topology validation for registered states.
//!
//! Parent links may legitimately dangle while a statechart is being
//! assembled, so the registry never checks them on insert. This module
//! checks every link at once and accumulates ALL problems with Stillwater's
//! `Validation`, instead of stopping at the first one the way a transition
//! does.
//!
//! # Example
//!
//! ```rust
//! use statechart::{Statechart, StateDefinition};
//!
//! let mut chart: Statechart<()> = Statechart::new();
//! chart.add_state("a", StateDefinition::passive().parent("missing")).unwrap();
//! chart.add_state("b", StateDefinition::passive().parent("gone")).unwrap();
//!
//! assert!(chart.validate().is_failure());
//! ```

use crate::chart::Statechart;
use crate::core::{StateId, TreeId};
use crate::registry::{Registry, RegistryError};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of checking a whole registry.
pub type TopologyValidation = Validation<(), NonEmptyVec<RegistryError>>;

/// Check every state's parent link.
///
/// Reports one `BrokenParentLink` per state whose declared parent is
/// missing, and one `ParentCycle` per state that lies on a loop of parent
/// links. States that merely descend from a broken link or a loop are not
/// reported again.
pub fn validate<Env>(registry: &Registry<Env>) -> TopologyValidation {
    let mut checks: Vec<TopologyValidation> = Vec::new();

    for tree in registry.trees() {
        for state in registry.states_in(tree) {
            checks.push(check_parent_link(registry, tree, state));
            checks.push(check_not_on_cycle(registry, tree, state));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

fn check_parent_link<Env>(registry: &Registry<Env>, tree: TreeId, state: StateId) -> TopologyValidation {
    let Some(node) = registry.node(state) else {
        return Validation::success(());
    };
    match node.parent_name() {
        Some(parent) if registry.resolve(tree, parent).is_none() => {
            Validation::fail(RegistryError::BrokenParentLink {
                tree: registry.tree_name(tree).unwrap_or_default().to_string(),
                state: node.name().to_string(),
                parent: parent.to_string(),
            })
        }
        _ => Validation::success(()),
    }
}

fn check_not_on_cycle<Env>(registry: &Registry<Env>, tree: TreeId, state: StateId) -> TopologyValidation {
    let mut seen = vec![state];
    let mut current = registry.parent_of(state);
    while let Some(parent) = current {
        if parent == state {
            return Validation::fail(RegistryError::ParentCycle {
                tree: registry.tree_name(tree).unwrap_or_default().to_string(),
                state: registry
                    .node(state)
                    .map(|node| node.name().to_string())
                    .unwrap_or_default(),
            });
        }
        if seen.contains(&parent) {
            // A loop further up; the states on it report themselves.
            break;
        }
        seen.push(parent);
        current = registry.parent_of(parent);
    }
    Validation::success(())
}

impl<Env> Statechart<Env> {
    /// Check every parent link in every tree, reporting all problems.
    pub fn validate(&self) -> TopologyValidation {
        validate(self.registry())
    }
}
