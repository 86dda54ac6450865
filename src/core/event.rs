//! Declared events.

use super::state::{StateId, StateSet};
use serde::{Deserialize, Serialize};

/// Options supplied when declaring an event.
///
/// Neither field is validated: an event without a target state is
/// accepted and reports `None` as its destination in query results.
///
/// # Example
///
/// ```rust
/// use statemark::core::{EventOptions, StateId};
///
/// let options = EventOptions::new().from_any_of(["draft", "rejected"]).to("review");
/// assert_eq!(options.to, Some(StateId::from("review")));
/// assert!(options.from.contains(&StateId::from("rejected")));
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct EventOptions {
    #[serde(default)]
    pub from: StateSet,
    #[serde(default)]
    pub to: Option<StateId>,
}

impl EventOptions {
    /// Options with no source and no target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single source state.
    pub fn from(mut self, state: impl Into<StateId>) -> Self {
        self.from = StateSet::One(state.into());
        self
    }

    /// Set an ordered list of source states.
    pub fn from_any_of<I>(mut self, states: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<StateId>,
    {
        self.from = StateSet::Many(states.into_iter().map(Into::into).collect());
        self
    }

    /// Set the target state.
    pub fn to(mut self, state: impl Into<StateId>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// States referenced by these options: the target first, then sources.
    pub(crate) fn referenced_states(&self) -> impl Iterator<Item = Option<StateId>> + '_ {
        std::iter::once(self.to.clone()).chain(self.from.iter().cloned().map(Some))
    }
}

/// A named event and the states it connects.
///
/// Events are plain metadata and never change after construction.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Event {
    name: String,
    #[serde(flatten)]
    options: EventOptions,
}

impl Event {
    /// Create an event, storing `options` as given.
    pub fn new(name: impl Into<String>, options: EventOptions) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    /// Event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared source states.
    pub fn from(&self) -> &StateSet {
        &self.options.from
    }

    /// Declared target state, if any.
    pub fn to(&self) -> Option<&StateId> {
        self.options.to.as_ref()
    }

    /// The options the event was declared with.
    pub fn options(&self) -> &EventOptions {
        &self.options
    }

    /// Whether the event's target is `state`.
    pub fn leads_to(&self, state: &StateId) -> bool {
        self.to() == Some(state)
    }
}
