//! Per-instance state tracking.

use super::error::StatesError;
use super::history::{StateHistory, StateTransition};
use super::machine::StateMachine;
use super::query::{Requirements, TransitionDescriptor};
use super::state::StateId;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, trace};

/// Current state and state history of one object.
///
/// A tracker starts out without a state. [`init`](Self::init) gives it the
/// machine's initial state unless one was already loaded through
/// [`rehydrate`](Self::rehydrate). After that, [`set_state`](Self::set_state)
/// is the only way to change it; every assignment archives the replaced
/// value.
///
/// Trackers are not synchronized. Sharing one across threads for mutation
/// requires external locking.
///
/// # Example
///
/// ```rust
/// use statemark::core::{StateId, StateMachine, StateTracker};
///
/// let mut machine = StateMachine::new();
/// machine.declare_states(Some("draft".into()), ["review", "approved"]);
///
/// let mut tracker = StateTracker::new();
/// tracker.init(&machine);
/// tracker.set_state("review");
/// tracker.set_state("approved");
///
/// assert!(tracker.is_state(&"approved".into(), false));
/// assert!(tracker.was_state(&"draft".into()));
/// assert_eq!(tracker.query(&machine, "was_review?"), Ok(true));
/// assert!(tracker.query(&machine, "rejected?").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateTracker {
    current: Option<StateId>,
    history: StateHistory,
}

impl StateTracker {
    /// Create a tracker with no state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker around a previously stored state.
    pub fn rehydrate(stored: Option<StateId>) -> Self {
        Self {
            current: stored,
            history: StateHistory::new(),
        }
    }

    /// Create a tracker already in the machine's initial state.
    pub fn initialized(machine: &StateMachine) -> Self {
        let mut tracker = Self::new();
        tracker.init(machine);
        tracker
    }

    /// Enter the machine's initial state unless a state is already set.
    ///
    /// Initialization is not an assignment and leaves the history empty.
    pub fn init(&mut self, machine: &StateMachine) {
        self.init_to(machine.initial_state());
    }

    /// Enter `initial` unless a state is already set.
    pub fn init_to(&mut self, initial: &StateId) {
        if self.current.is_none() {
            trace!(state = %initial, "initialized state");
            self.current = Some(initial.clone());
        }
    }

    /// Whether a state was ever set.
    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    /// The current state.
    pub fn state(&self) -> Option<&StateId> {
        self.current.as_ref()
    }

    /// Assign a new state, archiving the current one.
    pub fn set_state(&mut self, state: impl Into<StateId>) {
        let state = state.into();
        trace!(from = ?self.current, to = %state, "assigned state");
        self.history.push(StateTransition {
            from: self.current.take(),
            to: state.clone(),
            timestamp: Utc::now(),
        });
        self.current = Some(state);
    }

    /// States held before the current one, oldest first.
    pub fn past_states(&self) -> Vec<Option<&StateId>> {
        self.history.past_states()
    }

    /// The assignment log behind [`past_states`](Self::past_states).
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// States walked so far: the state replaced by the first assignment,
    /// then every assigned state. A tracker that was never assigned
    /// reports just its current state.
    pub fn path(&self) -> Vec<Option<&StateId>> {
        if self.history.is_empty() {
            return self.current.iter().map(Some).collect();
        }
        self.history.get_path()
    }

    /// Time between the first and the latest assignment.
    pub fn time_in_flight(&self) -> Option<Duration> {
        self.history.duration()
    }

    /// Whether the object is in `state`, or with `include_past` whether it
    /// ever was.
    pub fn is_state(&self, state: &StateId, include_past: bool) -> bool {
        if include_past {
            self.was_state(state)
        } else {
            self.current.as_ref() == Some(state)
        }
    }

    /// Whether `state` is the current state or appears in the history.
    pub fn was_state(&self, state: &StateId) -> bool {
        self.current.as_ref() == Some(state) || self.history.contains(state)
    }

    /// Transitions of `machine` matching `requirements`, relative to the
    /// current state.
    pub fn state_transitions(
        &self,
        machine: &StateMachine,
        requirements: &Requirements,
    ) -> Vec<TransitionDescriptor> {
        machine.transitions(requirements, self.current.as_ref())
    }

    /// Whether [`query`](Self::query) would answer `name`.
    pub fn responds_to(&self, machine: &StateMachine, name: &str) -> bool {
        machine.predicate(name).is_some()
    }

    /// Answer a predicate named after a state of `machine`.
    ///
    /// `<state>?` asks whether the object is in the state; `was_<state>?`
    /// whether it ever was. Any other name is an error.
    pub fn query(&self, machine: &StateMachine, name: &str) -> Result<bool, StatesError> {
        self.query_with(machine, name, false)
    }

    /// Like [`query`](Self::query), passing `include_past` through to
    /// [`is_state`](Self::is_state). `was_` queries always include the past.
    pub fn query_with(
        &self,
        machine: &StateMachine,
        name: &str,
        include_past: bool,
    ) -> Result<bool, StatesError> {
        let Some(predicate) = machine.predicate(name) else {
            debug!(query = name, "unrecognized state query");
            return Err(StatesError::UnrecognizedQuery {
                name: name.to_string(),
            });
        };
        Ok(self.is_state(&predicate.state, predicate.include_past || include_past))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EventOptions, StateSet};

    fn machine() -> StateMachine {
        let mut machine = StateMachine::new();
        machine.declare_states(Some("a".into()), ["b", "c"]);
        machine
    }

    fn ids(names: &[&str]) -> Vec<StateId> {
        names.iter().map(|n| StateId::from(*n)).collect()
    }

    #[test]
    fn new_tracker_is_uninitialized() {
        let tracker = StateTracker::new();

        assert!(!tracker.is_initialized());
        assert_eq!(tracker.state(), None);
        assert!(tracker.past_states().is_empty());
    }

    #[test]
    fn init_enters_initial_state_without_history() {
        let tracker = StateTracker::initialized(&machine());

        assert_eq!(tracker.state(), Some(&StateId::from("a")));
        assert!(tracker.past_states().is_empty());
    }

    #[test]
    fn init_keeps_rehydrated_state() {
        let mut tracker = StateTracker::rehydrate(Some("c".into()));
        tracker.init(&machine());

        assert_eq!(tracker.state(), Some(&StateId::from("c")));
        assert!(tracker.history().is_empty());
    }

    #[test]
    fn init_is_idempotent() {
        let machine = machine();
        let mut tracker = StateTracker::initialized(&machine);
        tracker.set_state("b");
        tracker.init(&machine);

        assert_eq!(tracker.state(), Some(&StateId::from("b")));
        assert_eq!(tracker.history().len(), 1);
    }

    #[test]
    fn assignments_archive_previous_state() {
        let mut tracker = StateTracker::initialized(&machine());
        tracker.set_state("b");
        tracker.set_state("c");

        let expected = ids(&["a", "b"]);
        assert_eq!(tracker.state(), Some(&StateId::from("c")));
        assert_eq!(
            tracker.past_states(),
            expected.iter().map(Some).collect::<Vec<_>>()
        );
    }

    #[test]
    fn repeated_states_are_kept_in_history() {
        let mut tracker = StateTracker::initialized(&machine());
        tracker.set_state("a");
        tracker.set_state("b");
        tracker.set_state("a");

        let expected = ids(&["a", "a", "b"]);
        assert_eq!(
            tracker.past_states(),
            expected.iter().map(Some).collect::<Vec<_>>()
        );
    }

    #[test]
    fn long_assignment_runs_keep_every_entry() {
        let mut tracker = StateTracker::initialized(&machine());
        for round in 0..20_000 {
            tracker.set_state(if round % 2 == 0 { "b" } else { "a" });
        }

        assert_eq!(tracker.history().len(), 20_000);
        assert_eq!(tracker.state(), Some(&StateId::from("a")));
        assert_eq!(tracker.past_states()[19_999], Some(&StateId::from("b")));
        assert_eq!(tracker.path().len(), 20_001);
    }

    #[test]
    fn path_follows_assignments() {
        let mut tracker = StateTracker::initialized(&machine());
        assert_eq!(tracker.path(), vec![Some(&StateId::from("a"))]);
        assert!(tracker.time_in_flight().is_none());

        tracker.set_state("b");
        tracker.set_state("c");

        let expected = ids(&["a", "b", "c"]);
        assert_eq!(tracker.path(), expected.iter().map(Some).collect::<Vec<_>>());
        assert!(tracker.time_in_flight().is_some());
    }

    #[test]
    fn uninitialized_tracker_has_empty_path() {
        assert!(StateTracker::new().path().is_empty());
    }

    #[test]
    fn assignment_before_init_records_none() {
        let mut tracker = StateTracker::new();
        tracker.set_state("b");

        assert_eq!(tracker.past_states(), vec![None]);
        assert!(tracker.was_state(&"b".into()));
        assert!(!tracker.was_state(&"a".into()));
    }

    #[test]
    fn is_state_checks_current_only() {
        let mut tracker = StateTracker::initialized(&machine());
        tracker.set_state("b");

        assert!(tracker.is_state(&"b".into(), false));
        assert!(!tracker.is_state(&"a".into(), false));
        assert!(tracker.is_state(&"a".into(), true));
    }

    #[test]
    fn was_state_includes_current() {
        let tracker = StateTracker::initialized(&machine());

        assert!(tracker.was_state(&"a".into()));
        assert!(!tracker.was_state(&"b".into()));
    }

    #[test]
    fn uninitialized_tracker_is_in_no_state() {
        let tracker = StateTracker::new();

        assert!(!tracker.is_state(&"a".into(), false));
        assert!(!tracker.was_state(&"a".into()));
    }

    #[test]
    fn queries_do_not_mutate() {
        let machine = machine();
        let mut tracker = StateTracker::initialized(&machine);
        tracker.set_state("b");
        let before = tracker.clone();

        let _ = tracker.was_state(&"a".into());
        let _ = tracker.query(&machine, "was_a?");
        let _ = tracker.state_transitions(&machine, &Requirements::new());

        assert_eq!(tracker, before);
    }

    #[test]
    fn predicate_queries_dispatch_on_state_names() {
        let machine = machine();
        let mut tracker = StateTracker::initialized(&machine);

        assert_eq!(tracker.query(&machine, "a?"), Ok(true));
        assert_eq!(tracker.query(&machine, "b?"), Ok(false));

        tracker.set_state("b");

        assert_eq!(tracker.query(&machine, "a?"), Ok(false));
        assert_eq!(tracker.query(&machine, "was_a?"), Ok(true));
        assert_eq!(tracker.query(&machine, "was_c?"), Ok(false));
    }

    #[test]
    fn query_with_past_widens_plain_predicate() {
        let machine = machine();
        let mut tracker = StateTracker::initialized(&machine);
        tracker.set_state("b");

        assert_eq!(tracker.query_with(&machine, "a?", true), Ok(true));
        assert_eq!(tracker.query_with(&machine, "a?", false), Ok(false));
    }

    #[test]
    fn unknown_predicate_is_an_error() {
        let machine = machine();
        let tracker = StateTracker::initialized(&machine);

        assert_eq!(
            tracker.query(&machine, "nonexistent_state?"),
            Err(StatesError::UnrecognizedQuery {
                name: "nonexistent_state?".to_string()
            })
        );
        assert!(tracker.query(&machine, "a").is_err());
        assert!(tracker.query(&machine, "is_a?").is_err());
        assert!(!tracker.responds_to(&machine, "nonexistent_state?"));
        assert!(tracker.responds_to(&machine, "was_c?"));
    }

    #[test]
    fn late_declared_states_are_queryable() {
        let mut machine = machine();
        let tracker = StateTracker::initialized(&machine);
        assert!(!tracker.responds_to(&machine, "d?"));

        machine.declare_event("finish", EventOptions::new().from("c").to("d"));

        assert_eq!(tracker.query(&machine, "d?"), Ok(false));
    }

    #[test]
    fn state_transitions_default_to_current_state() {
        let mut machine = machine();
        machine.declare_event("reset", EventOptions::new().from("c").to("a"));
        machine.declare_event("advance", EventOptions::new().from("a").to("b"));
        let tracker = StateTracker::initialized(&machine);

        let found = tracker.state_transitions(&machine, &Requirements::new());

        assert_eq!(
            found,
            vec![TransitionDescriptor {
                event: "reset".to_string(),
                from: StateSet::from("a"),
                to: Some("a".into()),
            }]
        );
    }
}
