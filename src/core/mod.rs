//! The state contract shared by every part of the engine.
//!
//! This module holds:
//! - the `State` trait hosts implement, with its enter/exit hooks
//! - declarative `StateDefinition`s and not-yet-registered `PendingState`s
//! - arena handles (`StateId`, `TreeId`) and the `Scope` states use to
//!   request transitions

mod definition;
mod id;
mod scope;
mod state;

pub use definition::{PendingState, StateDefinition};
pub use id::{StateId, TreeId, DEFAULT_TREE, ROOT};
pub use scope::{Directive, Scope};
pub use state::{HookError, Passive, Phase, Response, State};

pub(crate) use scope::Directives;
