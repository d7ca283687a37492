//! Statechart: hierarchical, multi-region state machines
//!
//! A statechart holds any number of named, parallel state trees. Each tree
//! has at most one active state at a time. States are nested through
//! parent links, and moving a tree from one state to another runs the exit
//! and enter hooks of exactly the states that change.
//!
//! # Core Concepts
//!
//! - **State**: Behaviour supplied by the host via the `State` trait, with
//!   an action handler and enter/exit hooks
//! - **Trees**: Independent regions, each with its own active state
//! - **Transitions**: Exits leaf first up to the lowest common ancestor,
//!   then enters down to the target
//! - **Dispatch**: An action is offered to every tree, bubbling from the
//!   active state up its parent chain until handled
//!
//! # Example
//!
//! ```rust
//! use statechart::{Response, Scope, State, StateDefinition, Statechart};
//!
//! struct Editing;
//!
//! impl State<()> for Editing {
//!     fn try_to_perform(
//!         &mut self,
//!         action: &str,
//!         _sender: Option<&str>,
//!         _context: &(),
//!         scope: &mut Scope<'_>,
//!     ) -> Response {
//!         if action == "save" {
//!             scope.go_to_state("saved");
//!             return Response::Handled;
//!         }
//!         Response::Unhandled
//!     }
//! }
//!
//! let mut chart: Statechart<()> = Statechart::builder()
//!     .state("document", StateDefinition::passive())
//!     .state("editing", StateDefinition::new(Editing).parent("document"))
//!     .state("saved", StateDefinition::passive().parent("document"))
//!     .initial("editing")
//!     .build()
//!     .unwrap();
//!
//! let responder = chart.dispatch_event("save", None, &()).unwrap();
//!
//! assert_eq!(responder, chart.lookup("default", "editing"));
//! let current = chart.current_state(None).unwrap();
//! assert_eq!(chart.state_name(current), Some("saved"));
//! ```

pub mod builder;
pub mod chart;
pub mod core;
pub mod engine;
pub mod registry;
pub mod snapshot;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, StatechartBuilder};
pub use chart::{
    register_state, Registration, StateHost, StateManager, Statechart, StatechartConfig,
};
pub use core::{
    HookError, Passive, PendingState, Phase, Response, Scope, State, StateDefinition, StateId,
    TreeId, DEFAULT_TREE, ROOT,
};
pub use engine::{DispatchReport, Journal, TransitionError, TransitionRecord};
pub use registry::{Registry, RegistryError};
pub use snapshot::{Snapshot, SnapshotError};
