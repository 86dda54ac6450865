//! Error types.

use super::state::StateId;
use thiserror::Error;

/// Errors raised by state machine declarations and queries.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StatesError {
    /// A predicate query named no known state.
    #[error("undefined state query `{name}`")]
    UnrecognizedQuery { name: String },

    /// A state machine definition document could not be read.
    #[error("invalid state machine definition: {0}")]
    InvalidDefinition(String),
}

/// Errors for executing transitions.
///
/// Nothing in this crate executes transitions; the type exists so hosts that
/// layer guarded execution on top can report failures consistently.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionError {
    #[error("event `{event}` cannot fire from state {}", state_name(.from))]
    NotPermitted {
        event: String,
        from: Option<StateId>,
    },
}

fn state_name(state: &Option<StateId>) -> &str {
    state.as_ref().map_or("<none>", StateId::as_str)
}
