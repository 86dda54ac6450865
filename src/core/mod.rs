//! Core state machine types and logic.
//!
//! This module contains the declaration model and the queries over it:
//! - State identifiers and the `State` trait
//! - Events and the `StateMachine` they are declared on
//! - Per-object state tracking with assignment history
//! - Transition queries and state predicates
//!
//! Nothing here performs I/O; queries never mutate a machine or a tracker.

mod error;
mod event;
mod history;
mod machine;
mod query;
mod state;
mod tracker;

pub use error::{StatesError, TransitionError};
pub use event::{Event, EventOptions};
pub use history::{StateHistory, StateTransition};
pub use machine::{StateMachine, DEFAULT_INITIAL_STATE};
pub use query::{Predicate, Requirements, TransitionDescriptor};
pub use state::{State, StateId, StateSet};
pub use tracker::StateTracker;
