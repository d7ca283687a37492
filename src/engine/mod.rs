//! Transition planning and the records transitions and dispatches leave
//! behind.
//!
//! The statechart drives these pieces: it plans with [`plan`], runs the
//! planned hooks, and keeps completed transitions in a [`Journal`].

mod error;
mod journal;
mod plan;
mod report;

pub use error::TransitionError;
pub use journal::{Journal, TransitionRecord};
pub use plan::{plan, TransitionPlan};
pub use report::{DispatchReport, TreeOutcome};
