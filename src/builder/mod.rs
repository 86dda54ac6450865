//! Ways to declare a state machine.
//!
//! Besides calling the `declare_*` methods on [`StateMachine`] directly,
//! a machine can be assembled with the fluent [`StateMachineBuilder`], the
//! [`state_machine!`](crate::state_machine) macro, or loaded from a
//! [`MachineDefinition`] document.

pub mod definition;
pub mod machine;
pub mod macros;

pub use definition::MachineDefinition;
pub use machine::StateMachineBuilder;

use crate::core::{EventOptions, StateId, StateMachine};

/// Declare a machine whose events walk `states` in order.
///
/// The first state is the initial one; each adjacent pair is joined by the
/// event named in `events` at the same position.
///
/// # Example
///
/// ```
/// use statemark::builder::linear;
/// use statemark::core::Requirements;
///
/// let machine = linear(["draft", "review", "published"], ["submit", "publish"]);
///
/// assert_eq!(machine.initial_state().as_str(), "draft");
/// let found = machine.transitions(&Requirements::new().on("publish"), None);
/// assert_eq!(found[0].to.as_ref().map(|s| s.as_str()), Some("published"));
/// ```
pub fn linear<S, E>(states: S, events: E) -> StateMachine
where
    S: IntoIterator,
    S::Item: Into<StateId>,
    E: IntoIterator,
    E::Item: Into<String>,
{
    let states: Vec<StateId> = states.into_iter().map(Into::into).collect();
    let mut machine = StateMachine::new();
    let Some((initial, rest)) = states.split_first() else {
        return machine;
    };
    machine.declare_states(Some(initial.clone()), rest);
    for (pair, name) in states.windows(2).zip(events) {
        machine.declare_event(name, EventOptions::new().from(&pair[0]).to(&pair[1]));
    }
    machine
}
