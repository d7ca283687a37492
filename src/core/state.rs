//! The capability contract every statechart state implements.
//!
//! The engine never inspects a state's concrete type. It only offers actions
//! to it and notifies it when it is entered or exited.

use super::scope::Scope;
use std::fmt;
use thiserror::Error;

/// Whether a state claimed an offered action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response {
    /// The state handled the action; dispatch stops in this tree.
    Handled,
    /// The state declined; dispatch moves on to its parent.
    Unhandled,
}

impl Response {
    pub fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}

impl From<bool> for Response {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Handled
        } else {
            Self::Unhandled
        }
    }
}

/// Which lifecycle hook was running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Enter,
    Exit,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter => f.write_str("enter"),
            Self::Exit => f.write_str("exit"),
        }
    }
}

/// Failure reported by an enter or exit hook.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Trait for statechart states.
///
/// `Env` is the context type handed to dispatched actions. Every method has
/// a default, so a state only overrides what it cares about: a state that
/// handles nothing and has no lifecycle behaviour is a valid state (see
/// [`Passive`]).
///
/// States must be `Send` so that a whole statechart can be moved behind a
/// single lock.
///
/// # Example
///
/// ```rust
/// use statechart::core::{Response, Scope, State};
///
/// struct Editing;
///
/// impl State<()> for Editing {
///     fn try_to_perform(
///         &mut self,
///         action: &str,
///         _sender: Option<&str>,
///         _context: &(),
///         scope: &mut Scope<'_>,
///     ) -> Response {
///         match action {
///             "save" => {
///                 scope.go_to_state("saving");
///                 Response::Handled
///             }
///             _ => Response::Unhandled,
///         }
///     }
/// }
/// ```
pub trait State<Env>: Send {
    /// Offer an action to this state.
    ///
    /// Default implementation declines every action.
    fn try_to_perform(
        &mut self,
        _action: &str,
        _sender: Option<&str>,
        _context: &Env,
        _scope: &mut Scope<'_>,
    ) -> Response {
        Response::Unhandled
    }

    /// Called when a transition enters this state.
    fn enter_state(&mut self, _scope: &mut Scope<'_>) -> Result<(), HookError> {
        Ok(())
    }

    /// Called when a transition leaves this state.
    fn exit_state(&mut self, _scope: &mut Scope<'_>) -> Result<(), HookError> {
        Ok(())
    }
}

/// A state with no behaviour of its own.
///
/// Useful for composite states that only group their children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Passive;

impl<Env> State<Env> for Passive {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scope::Directives;

    struct Saver;

    impl State<u32> for Saver {
        fn try_to_perform(
            &mut self,
            action: &str,
            _sender: Option<&str>,
            context: &u32,
            _scope: &mut Scope<'_>,
        ) -> Response {
            (action == "save" && *context > 0).into()
        }
    }

    #[test]
    fn passive_state_declines_everything() {
        let mut directives = Directives::default();
        let mut scope = Scope::new("group", "default", &mut directives);
        let mut state = Passive;

        let response = State::<()>::try_to_perform(&mut state, "save", None, &(), &mut scope);

        assert_eq!(response, Response::Unhandled);
        assert!(State::<()>::enter_state(&mut state, &mut scope).is_ok());
        assert!(State::<()>::exit_state(&mut state, &mut scope).is_ok());
        assert!(directives.is_empty());
    }

    #[test]
    fn custom_state_sees_action_and_context() {
        let mut directives = Directives::default();
        let mut scope = Scope::new("saver", "default", &mut directives);
        let mut state = Saver;

        assert!(state
            .try_to_perform("save", Some("toolbar"), &1, &mut scope)
            .is_handled());
        assert!(!state
            .try_to_perform("save", Some("toolbar"), &0, &mut scope)
            .is_handled());
        assert!(!state
            .try_to_perform("load", None, &1, &mut scope)
            .is_handled());
    }

    #[test]
    fn response_converts_from_bool() {
        assert_eq!(Response::from(true), Response::Handled);
        assert_eq!(Response::from(false), Response::Unhandled);
    }

    #[test]
    fn hook_error_displays_message() {
        let err = HookError::new("disk full");
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(err.message(), "disk full");
        assert_eq!(Phase::Exit.to_string(), "exit");
    }
}
