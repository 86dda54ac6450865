//! Statemark: declarative state machine metadata for stateful records
//!
//! A type declares its states, its initial state and its events once.
//! Each instance then carries a current state and the history of states it
//! held, and can answer questions about both: which state it is in, whether
//! it ever was in a given state, and which declared events lead into or out
//! of a state.
//!
//! Statemark only records and queries. It does not run guards, callbacks or
//! side effects when a state changes.
//!
//! # Core Concepts
//!
//! - **StateMachine**: the declared states, initial state and events of a type
//! - **StateTracker**: an instance's current state and assignment history
//! - **Requirements**: filters that turn events into transition descriptors
//! - **Predicates**: `draft?` / `was_draft?` style queries resolved by name
//!
//! # Example
//!
//! ```rust
//! use statemark::core::{Requirements, StateId, StateSet, StateTracker};
//! use statemark::state_machine;
//!
//! let machine = state_machine! {
//!     initial: draft;
//!     event submit: draft => review;
//!     event approve: [review] => approved;
//! };
//!
//! let mut tracker = StateTracker::initialized(&machine);
//! assert_eq!(tracker.query(&machine, "draft?"), Ok(true));
//!
//! tracker.set_state("review");
//! tracker.set_state("approved");
//! assert_eq!(tracker.query(&machine, "was_draft?"), Ok(true));
//! assert_eq!(tracker.past_states().len(), 2);
//!
//! let approvals = tracker.state_transitions(&machine, &Requirements::new().on("approve"));
//! assert_eq!(approvals[0].from, StateSet::from(vec!["review"]));
//! assert_eq!(approvals[0].to, Some(StateId::from("approved")));
//! ```

pub mod builder;
pub mod core;
mod stateful;

// Re-export commonly used types
pub use crate::builder::{MachineDefinition, StateMachineBuilder};
pub use crate::core::{
    EventOptions, Requirements, State, StateId, StateMachine, StateTracker, StatesError,
    TransitionDescriptor,
};
pub use crate::stateful::Stateful;
