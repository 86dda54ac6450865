//! Builder for declaring state machines.

use crate::core::{EventOptions, StateId, StateMachine};

/// Fluent wrapper around [`StateMachine`] declarations.
///
/// Each call is applied immediately, in order, exactly as the matching
/// `declare_*` method would apply it. Building never fails.
///
/// # Example
///
/// ```rust
/// use statemark::builder::StateMachineBuilder;
/// use statemark::core::{EventOptions, StateId};
///
/// let machine = StateMachineBuilder::new()
///     .initial("draft")
///     .states(["review", "approved"])
///     .event("submit", EventOptions::new().from("draft").to("review"))
///     .build();
///
/// assert_eq!(machine.initial_state(), &StateId::from("draft"));
/// assert_eq!(machine.states().len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StateMachineBuilder {
    machine: StateMachine,
}

impl StateMachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            machine: StateMachine::new(),
        }
    }

    /// Start from an existing machine, keeping its declarations.
    pub fn extending(machine: &StateMachine) -> Self {
        Self {
            machine: machine.clone(),
        }
    }

    /// Set the initial state.
    pub fn initial(mut self, state: impl Into<StateId>) -> Self {
        self.machine
            .declare_states(Some(state.into()), std::iter::empty::<StateId>());
        self
    }

    /// Declare additional states.
    pub fn states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<StateId>,
    {
        self.machine.declare_states(None, states);
        self
    }

    /// Declare an event.
    pub fn event(mut self, name: impl Into<String>, options: EventOptions) -> Self {
        self.machine.declare_event(name, options);
        self
    }

    /// Shorthand for an event with a single source and a target.
    pub fn transition(
        self,
        name: impl Into<String>,
        from: impl Into<StateId>,
        to: impl Into<StateId>,
    ) -> Self {
        self.event(name, EventOptions::new().from(from).to(to))
    }

    /// Finish and return the machine.
    pub fn build(self) -> StateMachine {
        self.machine
    }
}
