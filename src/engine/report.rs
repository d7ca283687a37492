//! Outcome of offering one action to every parallel tree.

use crate::core::{StateId, TreeId};

/// What happened in one tree during a dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeOutcome {
    pub tree: TreeId,
    /// The state that handled the action, if any.
    pub responder: Option<StateId>,
    /// Every state the action was offered to, leaf first.
    pub consulted: Vec<StateId>,
}

impl TreeOutcome {
    pub fn is_handled(&self) -> bool {
        self.responder.is_some()
    }
}

/// Per-tree outcomes of a dispatch: the default tree first, then other
/// trees in the order they were first entered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchReport {
    pub action: String,
    pub outcomes: Vec<TreeOutcome>,
}

impl DispatchReport {
    /// Responder of the last tree processed.
    ///
    /// This is the single result `dispatch_event` reports: a responder found
    /// in an earlier tree is not reported if the last tree had none.
    pub fn responder(&self) -> Option<StateId> {
        self.outcomes.last().and_then(|outcome| outcome.responder)
    }

    /// Every responder, one per tree that handled the action.
    pub fn responders(&self) -> impl Iterator<Item = (TreeId, StateId)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.responder.map(|state| (outcome.tree, state)))
    }

    /// Whether any tree handled the action.
    pub fn is_handled(&self) -> bool {
        self.outcomes.iter().any(TreeOutcome::is_handled)
    }

    pub fn outcome(&self, tree: TreeId) -> Option<&TreeOutcome> {
        self.outcomes.iter().find(|outcome| outcome.tree == tree)
    }
}
