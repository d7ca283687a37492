//! Offering actions to the active states of every parallel tree.

use super::Statechart;
use crate::core::{StateId, TreeId};
use crate::engine::{DispatchReport, TransitionError, TreeOutcome};

impl<Env> Statechart<Env> {
    /// Offer `action` to every tree.
    ///
    /// In each tree the action goes to the active state first and then up
    /// its parent chain until some state handles it or no parent resolves.
    /// The default tree is always visited first, even before it has an
    /// active state, in which case it has no responder. Other trees are
    /// visited in the order they were first entered; a tree that was never
    /// entered is skipped. Trees never stop one another.
    ///
    /// Transitions a handler requests through its scope run as soon as that
    /// handler returns, before the walk moves on. The walk itself continues
    /// from the parent of the state it just offered the action to.
    pub fn dispatch(
        &mut self,
        action: &str,
        sender: Option<&str>,
        context: &Env,
    ) -> Result<DispatchReport, TransitionError> {
        self.dispatching = true;
        let result = self.dispatch_all(action, sender, context);
        self.dispatching = false;
        if result.is_err() {
            self.directives.clear();
        }
        result
    }

    /// Offer `action` to every tree and report the responder of the last
    /// tree processed.
    ///
    /// Only one responder is reported even when several trees handle the
    /// action; use [`dispatch`](Self::dispatch) to see all of them.
    pub fn dispatch_event(
        &mut self,
        action: &str,
        sender: Option<&str>,
        context: &Env,
    ) -> Result<Option<StateId>, TransitionError> {
        self.dispatch(action, sender, context)
            .map(|report| report.responder())
    }

    /// Same as [`dispatch_event`](Self::dispatch_event).
    pub fn send_action(
        &mut self,
        action: &str,
        sender: Option<&str>,
        context: &Env,
    ) -> Result<Option<StateId>, TransitionError> {
        self.dispatch_event(action, sender, context)
    }

    fn dispatch_all(
        &mut self,
        action: &str,
        sender: Option<&str>,
        context: &Env,
    ) -> Result<DispatchReport, TransitionError> {
        let trace = self.config.trace;
        if trace {
            tracing::info!(chart = %self.id, action, sender = ?sender, "begin action");
        }

        let trees: Vec<TreeId> = self.registry.activated_trees().collect();
        let mut outcomes = Vec::with_capacity(trees.len());
        for tree in trees {
            let outcome = self.offer_to_tree(tree, action, sender, context)?;
            if trace {
                self.trace_outcome(action, &outcome);
            }
            outcomes.push(outcome);
        }

        let report = DispatchReport {
            action: action.to_string(),
            outcomes,
        };
        if trace {
            let responder = report
                .responder()
                .and_then(|state| self.state_name(state));
            tracing::info!(chart = %self.id, action, responder = ?responder, "end action");
        }
        Ok(report)
    }

    fn offer_to_tree(
        &mut self,
        tree: TreeId,
        action: &str,
        sender: Option<&str>,
        context: &Env,
    ) -> Result<TreeOutcome, TransitionError> {
        let mut consulted = Vec::new();
        let mut candidate = self.registry.active(tree);

        while let Some(state) = candidate {
            // A parent loop would otherwise offer the action forever.
            if consulted.contains(&state) {
                break;
            }
            consulted.push(state);

            let response = self
                .registry
                .offer(state, action, sender, context, &mut self.directives);
            self.settle()?;

            if response.is_handled() {
                return Ok(TreeOutcome {
                    tree,
                    responder: Some(state),
                    consulted,
                });
            }
            candidate = self.registry.parent_of(state);
        }

        Ok(TreeOutcome {
            tree,
            responder: None,
            consulted,
        })
    }

    fn trace_outcome(&self, action: &str, outcome: &TreeOutcome) {
        let tree = self.tree_name(outcome.tree).unwrap_or_default();
        match outcome.responder.and_then(|state| self.state_name(state)) {
            Some(responder) => {
                tracing::info!(chart = %self.id, action, tree, responder, "action handled")
            }
            None => tracing::info!(chart = %self.id, action, tree, "action not handled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Response, Scope, State, StateDefinition, DEFAULT_TREE};
    use crate::{Statechart, StatechartConfig};
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<String>>>;

    struct Handler {
        log: Log,
        handles: &'static [&'static str],
        redirect: Option<&'static str>,
    }

    impl State<u8> for Handler {
        fn try_to_perform(
            &mut self,
            action: &str,
            _sender: Option<&str>,
            _context: &u8,
            scope: &mut Scope<'_>,
        ) -> Response {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:{}", scope.name(), action));
            let handled = self.handles.iter().any(|handled| *handled == action);
            if handled {
                if let Some(target) = self.redirect {
                    scope.go_to_state(target);
                }
            }
            handled.into()
        }
    }

    fn handler(log: &Log, handles: &'static [&'static str]) -> Handler {
        Handler {
            log: Arc::clone(log),
            handles,
            redirect: None,
        }
    }

    fn offered(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.lock().unwrap())
    }

    #[test]
    fn walks_up_until_handled() {
        let log = Log::default();
        let mut chart = Statechart::<u8>::new();
        chart
            .add_state("a", StateDefinition::new(handler(&log, &["save"])))
            .unwrap();
        chart
            .add_state("b", StateDefinition::new(handler(&log, &[])).parent("a"))
            .unwrap();
        chart
            .add_state("c", StateDefinition::new(handler(&log, &["save"])))
            .unwrap();
        chart.go_to_state("b", None).unwrap();

        let responder = chart.dispatch_event("save", Some("toolbar"), &0).unwrap();

        assert_eq!(responder, chart.lookup(DEFAULT_TREE, "a"));
        assert_eq!(offered(&log), vec!["b:save", "a:save"]);
    }

    #[test]
    fn unhandled_action_exhausts_chain() {
        let log = Log::default();
        let mut chart = Statechart::<u8>::new();
        chart
            .add_state("a", StateDefinition::new(handler(&log, &[])))
            .unwrap();
        chart
            .add_state("b", StateDefinition::new(handler(&log, &[])).parent("a"))
            .unwrap();
        chart.go_to_state("b", None).unwrap();

        let report = chart.dispatch("quit", None, &0).unwrap();

        assert!(!report.is_handled());
        assert_eq!(report.outcomes[0].consulted.len(), 2);
        assert_eq!(offered(&log), vec!["b:quit", "a:quit"]);
    }

    #[test]
    fn tree_without_active_state_yields_nothing() {
        let mut chart = Statechart::<u8>::new();
        chart
            .add_state("idle", StateDefinition::passive())
            .unwrap();

        let report = chart.dispatch("save", None, &0).unwrap();

        assert_eq!(report.responder(), None);
        assert!(report.outcomes[0].consulted.is_empty());
    }

    #[test]
    fn unresolvable_parent_ends_walk_quietly() {
        let log = Log::default();
        let mut chart = Statechart::<u8>::new();
        chart
            .add_state("b", StateDefinition::new(handler(&log, &[])))
            .unwrap();
        chart.go_to_state("b", None).unwrap();
        chart
            .set_parent_state(DEFAULT_TREE, "b", Some("ghost"))
            .unwrap();

        let responder = chart.dispatch_event("save", None, &0).unwrap();

        assert_eq!(responder, None);
        assert_eq!(offered(&log), vec!["b:save"]);
    }

    #[test]
    fn parent_loop_ends_walk() {
        let log = Log::default();
        let mut chart = Statechart::<u8>::new();
        chart
            .add_state("a", StateDefinition::new(handler(&log, &[])))
            .unwrap();
        chart
            .add_state("b", StateDefinition::new(handler(&log, &[])).parent("a"))
            .unwrap();
        chart.go_to_state("b", None).unwrap();
        chart.set_parent_state(DEFAULT_TREE, "a", Some("b")).unwrap();

        let responder = chart.dispatch_event("save", None, &0).unwrap();

        assert_eq!(responder, None);
        assert_eq!(offered(&log), vec!["b:save", "a:save"]);
    }

    #[test]
    fn handler_requested_transition_runs_immediately() {
        let log = Log::default();
        let mut chart = Statechart::<u8>::new();
        let mut editing = handler(&log, &["save"]);
        editing.redirect = Some("saving");
        chart
            .add_state("editing", StateDefinition::new(editing))
            .unwrap();
        chart
            .add_state("saving", StateDefinition::passive())
            .unwrap();
        chart.go_to_state("editing", None).unwrap();

        let responder = chart.dispatch_event("save", None, &0).unwrap();

        assert_eq!(responder, chart.lookup(DEFAULT_TREE, "editing"));
        assert_eq!(chart.current_state(None), chart.lookup(DEFAULT_TREE, "saving"));
        assert!(!chart.is_dispatching());
    }

    #[test]
    fn failing_requested_transition_propagates() {
        let log = Log::default();
        let mut chart = Statechart::<u8>::new();
        let mut editing = handler(&log, &["save"]);
        editing.redirect = Some("nowhere");
        chart
            .add_state("editing", StateDefinition::new(editing))
            .unwrap();
        chart.go_to_state("editing", None).unwrap();

        let err = chart.dispatch_event("save", None, &0).unwrap_err();

        assert!(err.to_string().contains("nowhere"));
        assert!(!chart.is_dispatching());
    }

    #[test]
    fn trace_mode_does_not_change_outcome() {
        let log = Log::default();
        let config = StatechartConfig {
            trace: true,
            ..StatechartConfig::default()
        };
        let mut chart = Statechart::<u8>::with_config(config);
        chart
            .add_state("a", StateDefinition::new(handler(&log, &["save"])))
            .unwrap();
        chart.go_to_state("a", None).unwrap();

        let responder = chart.send_action("save", None, &1).unwrap();

        assert_eq!(responder, chart.lookup(DEFAULT_TREE, "a"));
    }
}
