//! Running planned transitions against the registry.

use super::Statechart;
use crate::core::{Phase, StateId};
use crate::engine::{plan, TransitionError, TransitionRecord};
use crate::registry::RegistryError;
use chrono::Utc;

impl<Env> Statechart<Env> {
    /// Move `tree` to the state called `target`.
    ///
    /// Exit hooks run leaf first up to, but not including, the lowest
    /// common ancestor of the current and target states; enter hooks then
    /// run from just below that ancestor down to the target. A transition to
    /// the already-active state runs no hooks.
    ///
    /// Unknown trees, unknown targets and broken parent links are reported
    /// before any hook runs. A failing hook aborts the transition where it
    /// stands: hooks that already ran are not undone and the tree keeps its
    /// previous active state.
    ///
    /// Transitions requested by hooks through their [`Scope`] run after
    /// this one completes, in request order.
    ///
    /// [`Scope`]: crate::core::Scope
    pub fn transition(
        &mut self,
        tree: &str,
        target: &str,
    ) -> Result<TransitionRecord, TransitionError> {
        let result = self
            .apply(tree, target)
            .and_then(|record| self.settle().map(|()| record));
        if result.is_err() {
            self.directives.clear();
        }
        result
    }

    /// Run queued directives until none remain.
    pub(crate) fn settle(&mut self) -> Result<(), TransitionError> {
        while let Some(directive) = self.directives.pop() {
            self.apply(&directive.tree, &directive.target)?;
        }
        Ok(())
    }

    fn apply(&mut self, tree: &str, target: &str) -> Result<TransitionRecord, TransitionError> {
        let tree_id = self
            .registry
            .tree_id(tree)
            .ok_or_else(|| RegistryError::UnknownTree {
                tree: tree.to_string(),
            })?;
        let target_id =
            self.registry
                .resolve(tree_id, target)
                .ok_or_else(|| RegistryError::UnknownState {
                    tree: tree.to_string(),
                    name: target.to_string(),
                })?;

        let plan = plan(&self.registry, tree_id, target_id)?;

        for &state in &plan.exits {
            self.run_hook(tree, state, Phase::Exit)?;
        }
        for &state in &plan.enters {
            self.run_hook(tree, state, Phase::Enter)?;
        }
        self.registry.set_active(tree_id, target_id);

        tracing::debug!(
            chart = %self.id,
            tree,
            state = target,
            exited = plan.exits.len(),
            entered = plan.enters.len(),
            "transition complete"
        );

        let record = TransitionRecord {
            tree: tree_id,
            from: plan.from,
            to: target_id,
            exited: plan.exits,
            entered: plan.enters,
            timestamp: Utc::now(),
        };
        self.journal.record(record.clone());
        Ok(record)
    }

    fn run_hook(&mut self, tree: &str, state: StateId, phase: Phase) -> Result<(), TransitionError> {
        match self.registry.run_hook(state, phase, &mut self.directives) {
            Ok(()) => Ok(()),
            Err(source) => {
                let state = self.state_name(state).unwrap_or_default().to_string();
                tracing::warn!(
                    chart = %self.id,
                    tree,
                    state = %state,
                    %phase,
                    error = %source,
                    "state hook failed"
                );
                Err(TransitionError::HookFailed {
                    tree: tree.to_string(),
                    state,
                    phase,
                    source,
                })
            }
        }
    }
}
