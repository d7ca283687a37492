//! How hosts hand states to a statechart.

use super::Statechart;
use crate::core::{PendingState, StateDefinition, StateId};
use crate::registry::RegistryError;

/// An object that may own a statechart.
///
/// Hosts that embed a [`Statechart`] implement this to expose it, so that
/// states can be registered through the host. A host without a statechart
/// returns `None`.
pub trait StateManager<Env> {
    fn statechart_mut(&mut self) -> Option<&mut Statechart<Env>>;
}

impl<Env> StateManager<Env> for Statechart<Env> {
    fn statechart_mut(&mut self) -> Option<&mut Statechart<Env>> {
        Some(self)
    }
}

/// A host that declares states before its statechart exists.
///
/// When a statechart is built from a host, every state the host still holds
/// unregistered is taken and registered under its declared name. This scan
/// happens once.
pub trait StateHost<Env> {
    fn take_unregistered_states(&mut self) -> Vec<(String, PendingState<Env>)>;
}

/// Result of [`register_state`].
#[derive(Debug)]
pub enum Registration<Env> {
    /// Added to the manager's statechart.
    Registered(StateId),
    /// Built but not added anywhere yet.
    Pending(PendingState<Env>),
}

impl<Env> Registration<Env> {
    pub fn state_id(&self) -> Option<StateId> {
        match self {
            Self::Registered(id) => Some(*id),
            Self::Pending(_) => None,
        }
    }

    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered(_))
    }
}

/// Build a state from `definition`.
///
/// With both a manager and a name the state is registered in the manager's
/// statechart, under its declared tree or the default one. Otherwise it is
/// returned as a [`PendingState`] for a later host scan to pick up.
pub fn register_state<Env>(
    definition: StateDefinition<Env>,
    manager: Option<&mut dyn StateManager<Env>>,
    name: Option<&str>,
) -> Result<Registration<Env>, RegistryError> {
    match (manager, name) {
        (Some(manager), Some(name)) => {
            let chart = manager
                .statechart_mut()
                .ok_or_else(|| RegistryError::NotAStatechart {
                    state: name.to_string(),
                })?;
            chart.add_state(name, definition).map(Registration::Registered)
        }
        _ => Ok(Registration::Pending(PendingState::new(definition))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DEFAULT_TREE;

    struct Widget;

    impl StateManager<()> for Widget {
        fn statechart_mut(&mut self) -> Option<&mut Statechart<()>> {
            None
        }
    }

    struct Window {
        chart: Statechart<()>,
    }

    impl StateManager<()> for Window {
        fn statechart_mut(&mut self) -> Option<&mut Statechart<()>> {
            Some(&mut self.chart)
        }
    }

    #[test]
    fn registers_into_statechart_manager() {
        let mut chart = Statechart::<()>::new();

        let registration =
            register_state::<()>(StateDefinition::passive(), Some(&mut chart), Some("idle")).unwrap();

        assert!(registration.is_registered());
        assert_eq!(chart.lookup(DEFAULT_TREE, "idle"), registration.state_id());
    }

    #[test]
    fn registers_through_embedding_host() {
        let mut window = Window {
            chart: Statechart::new(),
        };

        let registration = register_state::<()>(
            StateDefinition::passive().tree("toolbar"),
            Some(&mut window),
            Some("hidden"),
        )
        .unwrap();

        assert_eq!(
            window.chart.lookup("toolbar", "hidden"),
            registration.state_id()
        );
    }

    #[test]
    fn manager_without_statechart_is_rejected() {
        let mut widget = Widget;

        let err = register_state::<()>(StateDefinition::passive(), Some(&mut widget), Some("idle"))
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::NotAStatechart {
                state: "idle".to_string(),
            }
        );
    }

    #[test]
    fn missing_manager_or_name_yields_pending_state() {
        let mut chart = Statechart::<()>::new();

        let no_manager = register_state::<()>(StateDefinition::passive(), None, Some("a")).unwrap();
        let no_name = register_state::<()>(StateDefinition::passive(), Some(&mut chart), None).unwrap();

        for registration in [no_manager, no_name] {
            match registration {
                Registration::Pending(pending) => assert!(!pending.is_registered()),
                Registration::Registered(_) => panic!("expected a pending state"),
            }
        }
        assert!(chart.registry().is_empty());
    }

    #[test]
    fn duplicate_through_manager_is_reported() {
        let mut chart = Statechart::<()>::new();
        register_state::<()>(StateDefinition::passive(), Some(&mut chart), Some("idle")).unwrap();

        let err = register_state::<()>(StateDefinition::passive(), Some(&mut chart), Some("idle"))
            .unwrap_err();

        assert!(matches!(err, RegistryError::DuplicateState { .. }));
    }
}
