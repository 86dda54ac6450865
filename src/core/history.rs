//! State assignment history.
//!
//! Every assignment to a tracked object's state archives the value it
//! replaced. The archive is an append-only log of [`StateTransition`]
//! records; the list of past states, the path walked and the time spent
//! are derived from it.

use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single state assignment.
///
/// `from` is `None` when the object had no state yet at the time of the
/// assignment. Such entries are kept, not discarded.
///
/// # Example
///
/// ```rust
/// use statemark::core::{StateId, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: Some(StateId::from("draft")),
///     to: StateId::from("review"),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.from.as_ref().map(StateId::as_str), Some("draft"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being replaced
    pub from: Option<StateId>,
    /// The newly assigned state
    pub to: StateId,
    /// When the assignment happened
    pub timestamp: DateTime<Utc>,
}

/// Ordered log of state assignments.
///
/// Trackers append with [`push`](Self::push). [`record`](Self::record)
/// leaves the receiver alone and returns an extended copy.
///
/// # Example
///
/// ```rust
/// use statemark::core::{StateHistory, StateId, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: Some(StateId::from("draft")),
///         to: StateId::from("review"),
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: Some(StateId::from("review")),
///         to: StateId::from("approved"),
///         timestamp: Utc::now(),
///     });
///
/// let past: Vec<&str> = history
///     .past_states()
///     .into_iter()
///     .flatten()
///     .map(StateId::as_str)
///     .collect();
/// assert_eq!(past, vec!["draft", "review"]);
/// assert_eq!(history.get_path().len(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append an assignment in place.
    pub fn push(&mut self, transition: StateTransition) {
        self.transitions.push(transition);
    }

    /// Record an assignment, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut history = self.clone();
        history.push(transition);
        history
    }

    /// States held before each assignment, oldest first.
    ///
    /// Repeats and `None` entries are preserved.
    pub fn past_states(&self) -> Vec<Option<&StateId>> {
        self.transitions.iter().map(|t| t.from.as_ref()).collect()
    }

    /// Whether `state` was held before any recorded assignment.
    pub fn contains(&self, state: &StateId) -> bool {
        self.transitions
            .iter()
            .any(|t| t.from.as_ref() == Some(state))
    }

    /// The path of states traversed: the state replaced by the first
    /// assignment, followed by the target of every assignment.
    pub fn get_path(&self) -> Vec<Option<&StateId>> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(first.from.as_ref());
        }
        for transition in &self.transitions {
            path.push(Some(&transition.to));
        }
        path
    }

    /// Time between the first and last recorded assignment.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// All recorded assignments in order.
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    /// Number of recorded assignments.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether nothing was ever assigned.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
