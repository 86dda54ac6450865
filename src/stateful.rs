//! Attaching a state machine to a host type.

use std::time::Duration;

use crate::core::{
    Requirements, StateHistory, StateId, StateMachine, StateTracker, StatesError,
    TransitionDescriptor,
};

/// A type whose instances carry a tracked state.
///
/// Implementors point at the machine declared for the type and at the
/// tracker stored in each instance; everything else is provided. Hosts
/// should call [`init_state`](Self::init_state) when an instance is created
/// or loaded.
///
/// # Example
///
/// ```rust
/// use std::sync::OnceLock;
/// use statemark::{state_machine, StateMachine, StateTracker, Stateful};
///
/// fn order_states() -> &'static StateMachine {
///     static MACHINE: OnceLock<StateMachine> = OnceLock::new();
///     MACHINE.get_or_init(|| {
///         state_machine! {
///             initial: pending;
///             event ship: pending => shipped;
///         }
///     })
/// }
///
/// struct Order {
///     tracker: StateTracker,
/// }
///
/// impl Stateful for Order {
///     fn state_machine(&self) -> &StateMachine {
///         order_states()
///     }
///     fn tracker(&self) -> &StateTracker {
///         &self.tracker
///     }
///     fn tracker_mut(&mut self) -> &mut StateTracker {
///         &mut self.tracker
///     }
/// }
///
/// let mut order = Order { tracker: StateTracker::new() };
/// order.init_state();
/// assert_eq!(order.query("pending?"), Ok(true));
///
/// order.set_state("shipped");
/// assert_eq!(order.query("was_pending?"), Ok(true));
/// ```
pub trait Stateful {
    /// The machine declared for this type.
    fn state_machine(&self) -> &StateMachine;

    /// This instance's tracker.
    fn tracker(&self) -> &StateTracker;

    /// Mutable access to this instance's tracker.
    fn tracker_mut(&mut self) -> &mut StateTracker;

    /// Enter the initial state unless a state was already loaded.
    fn init_state(&mut self) {
        let initial = self.state_machine().initial_state().clone();
        self.tracker_mut().init_to(&initial);
    }

    /// The current state.
    fn state(&self) -> Option<&StateId> {
        self.tracker().state()
    }

    /// Assign a new state, archiving the current one.
    fn set_state(&mut self, state: impl Into<StateId>)
    where
        Self: Sized,
    {
        self.tracker_mut().set_state(state);
    }

    /// States held before the current one, oldest first.
    fn past_states(&self) -> Vec<Option<&StateId>> {
        self.tracker().past_states()
    }

    /// Every assignment made so far, with its timestamp.
    fn state_history(&self) -> &StateHistory {
        self.tracker().history()
    }

    /// States walked so far, ending with the current one.
    fn state_path(&self) -> Vec<Option<&StateId>> {
        self.tracker().path()
    }

    /// Time between the first and the latest assignment.
    fn time_in_flight(&self) -> Option<Duration> {
        self.tracker().time_in_flight()
    }

    /// Whether the instance is in `state` now.
    fn is_state(&self, state: impl Into<StateId>) -> bool
    where
        Self: Sized,
    {
        self.tracker().is_state(&state.into(), false)
    }

    /// Whether the instance is or ever was in `state`.
    fn was_state(&self, state: impl Into<StateId>) -> bool
    where
        Self: Sized,
    {
        self.tracker().was_state(&state.into())
    }

    /// Transitions matching `requirements`, relative to the current state.
    fn state_transitions(&self, requirements: &Requirements) -> Vec<TransitionDescriptor> {
        self.tracker()
            .state_transitions(self.state_machine(), requirements)
    }

    /// Whether [`query`](Self::query) would answer `name`.
    fn responds_to(&self, name: &str) -> bool {
        self.tracker().responds_to(self.state_machine(), name)
    }

    /// Answer `<state>?` or `was_<state>?`.
    fn query(&self, name: &str) -> Result<bool, StatesError> {
        self.tracker().query(self.state_machine(), name)
    }
}
