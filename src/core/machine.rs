//! State machine declarations.

use super::event::{Event, EventOptions};
use super::query::{self, Predicate, PredicateTable, Requirements, TransitionDescriptor};
use super::state::StateId;
use tracing::debug;

/// Initial state used when none is declared.
pub const DEFAULT_INITIAL_STATE: &str = "created";

/// Declared states, initial state and events of one kind of stateful object.
///
/// A machine is assembled once, through [`declare_states`](Self::declare_states)
/// and [`declare_event`](Self::declare_event), and only read afterwards.
/// Declarations accumulate without validation: duplicate events are kept and
/// an event may omit its target state. Every state an event mentions is added
/// to the state list automatically, after the initial state.
///
/// Deriving a machine from another is a `clone()` followed by further
/// declarations; the source machine is unaffected.
///
/// # Example
///
/// ```rust
/// use statemark::core::{EventOptions, Requirements, StateId, StateMachine};
///
/// let mut machine = StateMachine::new();
/// machine.declare_states(Some("draft".into()), ["review"]);
/// machine.declare_event("approve", EventOptions::new().from_any_of(["review"]).to("approved"));
///
/// let names: Vec<&str> = machine.states().iter().map(StateId::as_str).collect();
/// assert_eq!(names, vec!["draft", "review", "approved"]);
///
/// let found = machine.transitions(&Requirements::new().to("approved"), None);
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].event, "approve");
/// ```
#[derive(Clone, Debug)]
pub struct StateMachine {
    initial_state: StateId,
    state_names: Option<Vec<StateId>>,
    events: Vec<Event>,
    predicates: PredicateTable,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a machine with no declarations and the default initial state.
    pub fn new() -> Self {
        let mut machine = Self {
            initial_state: StateId::from(DEFAULT_INITIAL_STATE),
            state_names: None,
            events: Vec::new(),
            predicates: PredicateTable::default(),
        };
        machine.reindex();
        machine
    }

    /// Declare states, optionally replacing the initial state.
    ///
    /// The initial state and `states` are merged into the state list in
    /// order, skipping names already present.
    pub fn declare_states<I>(&mut self, initial: Option<StateId>, states: I)
    where
        I: IntoIterator,
        I::Item: Into<StateId>,
    {
        if let Some(initial) = initial {
            debug!(state = %initial, "declared initial state");
            self.initial_state = initial;
        }
        let initial = Some(self.initial_state.clone());
        self.add_states(
            std::iter::once(initial).chain(states.into_iter().map(|s| Some(s.into()))),
        );
    }

    /// Declare an event. Its source and target states become known states.
    pub fn declare_event(&mut self, name: impl Into<String>, options: EventOptions) {
        self.add_states(options.referenced_states());

        let event = Event::new(name, options);
        debug!(event = %event.name(), from = ?event.from(), to = ?event.to(), "declared event");
        self.events.push(event);
    }

    fn add_states(&mut self, states: impl IntoIterator<Item = Option<StateId>>) {
        let initial = &self.initial_state;
        let names = self
            .state_names
            .get_or_insert_with(|| vec![initial.clone()]);
        for state in states.into_iter().flatten() {
            if !names.contains(&state) {
                debug!(state = %state, "declared state");
                names.push(state);
            }
        }
        self.reindex();
    }

    fn reindex(&mut self) {
        self.predicates = PredicateTable::build(self.states().iter());
    }

    /// State new instances start in.
    pub fn initial_state(&self) -> &StateId {
        &self.initial_state
    }

    /// Known states in declaration order.
    ///
    /// Before anything is declared this is just the initial state.
    pub fn states(&self) -> &[StateId] {
        match &self.state_names {
            Some(names) => names,
            None => std::slice::from_ref(&self.initial_state),
        }
    }

    /// Whether `state` is a known state.
    pub fn has_state(&self, state: &StateId) -> bool {
        self.states().contains(state)
    }

    /// Declared events in declaration order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Resolve a predicate name such as `draft?` or `was_draft?`.
    pub fn predicate(&self, name: &str) -> Option<&Predicate> {
        self.predicates.lookup(name)
    }

    /// Transitions matching `requirements`.
    ///
    /// Filters apply in priority order: event name, then source and target
    /// together, source alone, target alone. With no filters at all, events
    /// whose target is `current` are returned and `current` is reported as
    /// their source.
    pub fn transitions(
        &self,
        requirements: &Requirements,
        current: Option<&StateId>,
    ) -> Vec<TransitionDescriptor> {
        query::resolve(&self.events, requirements, current)
    }
}
