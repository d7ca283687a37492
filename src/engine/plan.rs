//! Least-common-ancestor transition planning.
//!
//! Planning is pure: it reads the registry and decides which hooks a
//! transition will run, without running any of them. Every configuration
//! error a transition can hit is therefore raised before the first hook.

use crate::core::{StateId, TreeId};
use crate::registry::{Ancestor, Registry, RegistryError};

/// The hooks a transition will run, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPlan {
    pub tree: TreeId,
    /// Active state before the transition, if any.
    pub from: Option<StateId>,
    pub target: StateId,
    /// Lowest ancestor shared by the exit and enter chains.
    pub pivot: Ancestor,
    /// States to exit, leaf first.
    pub exits: Vec<StateId>,
    /// States to enter, ancestor first; ends with the target.
    pub enters: Vec<StateId>,
}

impl TransitionPlan {
    /// A transition to the already-active state runs no hooks.
    pub fn is_self_transition(&self) -> bool {
        self.from == Some(self.target)
    }
}

/// Plan a transition of `tree` to `target`.
///
/// The exit chain starts at the tree's active state (empty before the first
/// transition) and the enter chain at `target`. The pivot is the first
/// element of the exit chain, scanning from the leaf, that also appears in
/// the enter chain; both chains end with the synthetic root, so a pivot
/// always exists once something is active.
pub fn plan<Env>(
    registry: &Registry<Env>,
    tree: TreeId,
    target: StateId,
) -> Result<TransitionPlan, RegistryError> {
    let from = registry.active(tree);
    let enter_chain = registry.ancestor_chain(tree, target)?;
    let exit_chain = match from {
        Some(current) => registry.ancestor_chain(tree, current)?,
        None => Vec::new(),
    };

    // Chains are shallow; a pairwise scan is fine.
    let (pivot, exit_index, enter_index) = exit_chain
        .iter()
        .enumerate()
        .find_map(|(exit_index, item)| {
            enter_chain
                .iter()
                .position(|candidate| candidate == item)
                .map(|enter_index| (*item, exit_index, enter_index))
        })
        .unwrap_or((Ancestor::Root, 0, enter_chain.len() - 1));

    let exits = exit_chain[..exit_index]
        .iter()
        .filter_map(|a| a.state())
        .collect();
    let enters = enter_chain[..enter_index]
        .iter()
        .rev()
        .filter_map(|a| a.state())
        .collect();

    Ok(TransitionPlan {
        tree,
        from,
        target,
        pivot,
        exits,
        enters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StateDefinition, DEFAULT_TREE};

    struct Fixture {
        registry: Registry<()>,
        tree: TreeId,
    }

    impl Fixture {
        /// root
        /// ├── a
        /// │   ├── b
        /// │   │   └── d
        /// │   └── e
        /// └── c
        fn new() -> Self {
            let mut registry = Registry::new(DEFAULT_TREE);
            for (name, parent) in [
                ("a", None),
                ("b", Some("a")),
                ("c", None),
                ("d", Some("b")),
                ("e", Some("a")),
            ] {
                let mut definition = StateDefinition::passive();
                if let Some(parent) = parent {
                    definition = definition.parent(parent);
                }
                registry.register(None, name, definition).unwrap();
            }
            let tree = registry.default_tree();
            Self { registry, tree }
        }

        fn id(&self, name: &str) -> StateId {
            self.registry.lookup(DEFAULT_TREE, name).unwrap()
        }

        fn ids(&self, names: &[&str]) -> Vec<StateId> {
            names.iter().map(|n| self.id(n)).collect()
        }

        fn activate(&mut self, name: &str) {
            let id = self.id(name);
            self.registry.set_active(self.tree, id);
        }

        fn plan(&self, target: &str) -> TransitionPlan {
            plan(&self.registry, self.tree, self.id(target)).unwrap()
        }
    }

    #[test]
    fn first_transition_enters_whole_chain_ancestor_first() {
        let fixture = Fixture::new();

        let plan = fixture.plan("d");

        assert_eq!(plan.from, None);
        assert!(plan.exits.is_empty());
        assert_eq!(plan.enters, fixture.ids(&["a", "b", "d"]));
        assert_eq!(plan.pivot, Ancestor::Root);
    }

    #[test]
    fn sibling_transition_pivots_on_parent() {
        let mut fixture = Fixture::new();
        fixture.activate("d");

        let plan = fixture.plan("e");

        assert_eq!(plan.exits, fixture.ids(&["d", "b"]));
        assert_eq!(plan.enters, fixture.ids(&["e"]));
        assert_eq!(plan.pivot, Ancestor::State(fixture.id("a")));
    }

    #[test]
    fn unrelated_subtrees_pivot_on_root() {
        let mut fixture = Fixture::new();
        fixture.activate("b");

        let plan = fixture.plan("c");

        assert_eq!(plan.exits, fixture.ids(&["b", "a"]));
        assert_eq!(plan.enters, fixture.ids(&["c"]));
        assert_eq!(plan.pivot, Ancestor::Root);
    }

    #[test]
    fn moving_to_an_ancestor_only_exits() {
        let mut fixture = Fixture::new();
        fixture.activate("d");

        let plan = fixture.plan("a");

        assert_eq!(plan.exits, fixture.ids(&["d", "b"]));
        assert!(plan.enters.is_empty());
        assert_eq!(plan.pivot, Ancestor::State(fixture.id("a")));
    }

    #[test]
    fn moving_to_a_descendant_only_enters() {
        let mut fixture = Fixture::new();
        fixture.activate("a");

        let plan = fixture.plan("d");

        assert!(plan.exits.is_empty());
        assert_eq!(plan.enters, fixture.ids(&["b", "d"]));
    }

    #[test]
    fn self_transition_runs_nothing() {
        let mut fixture = Fixture::new();
        fixture.activate("b");

        let plan = fixture.plan("b");

        assert!(plan.is_self_transition());
        assert!(plan.exits.is_empty());
        assert!(plan.enters.is_empty());
        assert_eq!(plan.pivot, Ancestor::State(fixture.id("b")));
    }

    #[test]
    fn broken_link_in_exit_chain_fails_planning() {
        let mut fixture = Fixture::new();
        fixture.activate("d");
        fixture
            .registry
            .set_parent(DEFAULT_TREE, "b", Some("missing"))
            .unwrap();

        let err = plan(&fixture.registry, fixture.tree, fixture.id("c")).unwrap_err();

        assert!(matches!(err, RegistryError::BrokenParentLink { .. }));
    }
}
