//! Transition queries and state predicate lookup.

use super::event::Event;
use super::state::{StateId, StateSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Filters for [`StateMachine::transitions`](super::StateMachine::transitions).
///
/// All fields are optional. Blank values count as absent.
///
/// # Example
///
/// ```rust
/// use statemark::core::Requirements;
///
/// let requirements = Requirements::new().from("draft").to("review");
/// assert_eq!(requirements.on_event(), None);
/// assert_eq!(requirements.from_state().map(|s| s.as_str()), Some("draft"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub on: Option<String>,
    #[serde(default)]
    pub from: Option<StateId>,
    #[serde(default)]
    pub to: Option<StateId>,
}

impl Requirements {
    /// No filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only events with this name.
    pub fn on(mut self, event: impl Into<String>) -> Self {
        self.on = Some(event.into());
        self
    }

    /// Events leaving this state.
    pub fn from(mut self, state: impl Into<StateId>) -> Self {
        self.from = Some(state.into());
        self
    }

    /// Events entering this state.
    pub fn to(mut self, state: impl Into<StateId>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// The event filter, unless blank.
    pub fn on_event(&self) -> Option<&str> {
        self.on.as_deref().filter(|name| !name.trim().is_empty())
    }

    /// The source filter, unless blank.
    pub fn from_state(&self) -> Option<&StateId> {
        self.from.as_ref().filter(|state| !state.is_blank())
    }

    /// The target filter, unless blank.
    pub fn to_state(&self) -> Option<&StateId> {
        self.to.as_ref().filter(|state| !state.is_blank())
    }
}

/// One event's state change, narrowed by the query that produced it.
///
/// `from` and `to` echo the requirement values when they were given and the
/// event's own declaration otherwise. A `None` target means the event never
/// declared one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDescriptor {
    pub event: String,
    pub from: StateSet,
    pub to: Option<StateId>,
}

enum Filter<'a> {
    On(&'a str),
    FromTo(&'a StateId, &'a StateId),
    From(&'a StateId),
    To(&'a StateId),
    // Without explicit filters the current state is matched against each
    // event's target, not its sources.
    IntoCurrent(Option<&'a StateId>),
}

impl Filter<'_> {
    fn matches(&self, event: &Event) -> bool {
        match self {
            Self::On(name) => event.name() == *name,
            Self::FromTo(from, to) => event.from().contains(from) && event.leads_to(to),
            Self::From(from) => event.from().contains(from),
            Self::To(to) => event.leads_to(to),
            Self::IntoCurrent(current) => current.is_some_and(|state| event.leads_to(state)),
        }
    }
}

/// Resolve `requirements` against `events` in declaration order.
pub(crate) fn resolve(
    events: &[Event],
    requirements: &Requirements,
    current: Option<&StateId>,
) -> Vec<TransitionDescriptor> {
    let to = requirements.to_state();
    let filter = match (requirements.on_event(), requirements.from_state(), to) {
        (Some(on), _, _) => Filter::On(on),
        (None, Some(from), Some(to)) => Filter::FromTo(from, to),
        (None, Some(from), None) => Filter::From(from),
        (None, None, Some(to)) => Filter::To(to),
        (None, None, None) => Filter::IntoCurrent(current),
    };
    let from = match filter {
        Filter::IntoCurrent(current) => current.filter(|state| !state.is_blank()),
        _ => requirements.from_state(),
    };

    events
        .iter()
        .filter(|event| filter.matches(event))
        .map(|event| TransitionDescriptor {
            event: event.name().to_owned(),
            from: from.map_or_else(|| event.from().clone(), |state| StateSet::One(state.clone())),
            to: to.or(event.to()).cloned(),
        })
        .collect()
}

/// What a predicate name such as `draft?` or `was_draft?` asks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Predicate {
    pub state: StateId,
    pub include_past: bool,
}

/// Lookup table from predicate names to the state they test.
#[derive(Clone, Debug, Default)]
pub(crate) struct PredicateTable {
    entries: HashMap<String, Predicate>,
}

impl PredicateTable {
    pub(crate) fn build<'a>(states: impl IntoIterator<Item = &'a StateId> + Clone) -> Self {
        let mut entries = HashMap::new();
        for state in states.clone() {
            entries.insert(
                format!("{state}?"),
                Predicate {
                    state: state.clone(),
                    include_past: false,
                },
            );
        }
        // `was_` wins when a state is itself named `was_<other>`.
        for state in states {
            entries.insert(
                format!("was_{state}?"),
                Predicate {
                    state: state.clone(),
                    include_past: true,
                },
            );
        }
        Self { entries }
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<&Predicate> {
        self.entries.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EventOptions;

    fn events() -> Vec<Event> {
        vec![
            Event::new("submit", EventOptions::new().from("draft").to("review")),
            Event::new(
                "approve",
                EventOptions::new().from_any_of(["review"]).to("approved"),
            ),
            Event::new(
                "fast_track",
                EventOptions::new().from_any_of(["draft", "review"]).to("approved"),
            ),
            Event::new("anywhere", EventOptions::new().to("draft")),
        ]
    }

    fn names(descriptors: &[TransitionDescriptor]) -> Vec<&str> {
        descriptors.iter().map(|d| d.event.as_str()).collect()
    }

    #[test]
    fn on_selects_events_by_name() {
        let result = resolve(&events(), &Requirements::new().on("approve"), None);

        assert_eq!(
            result,
            vec![TransitionDescriptor {
                event: "approve".to_string(),
                from: StateSet::from(vec!["review"]),
                to: Some("approved".into()),
            }]
        );
    }

    #[test]
    fn on_takes_precedence_over_states() {
        let requirements = Requirements::new().on("submit").from("nowhere").to("elsewhere");
        let result = resolve(&events(), &requirements, None);

        assert_eq!(
            result,
            vec![TransitionDescriptor {
                event: "submit".to_string(),
                from: StateSet::from("nowhere"),
                to: Some("elsewhere".into()),
            }]
        );
    }

    #[test]
    fn from_and_to_must_both_match() {
        let requirements = Requirements::new().from("draft").to("approved");
        let result = resolve(&events(), &requirements, None);

        assert_eq!(names(&result), vec!["fast_track"]);
        assert_eq!(result[0].from, StateSet::from("draft"));
        assert_eq!(result[0].to, Some("approved".into()));
    }

    #[test]
    fn from_alone_matches_source_sets() {
        let result = resolve(&events(), &Requirements::new().from("review"), None);

        assert_eq!(names(&result), vec!["approve", "fast_track"]);
        assert!(result.iter().all(|d| d.from == StateSet::from("review")));
        assert!(result.iter().all(|d| d.to == Some("approved".into())));
    }

    #[test]
    fn undeclared_source_never_matches_from() {
        let result = resolve(&events(), &Requirements::new().from("approved"), None);
        assert!(result.is_empty());
    }

    #[test]
    fn to_alone_keeps_declaration_order() {
        let result = resolve(&events(), &Requirements::new().to("approved"), None);

        assert_eq!(names(&result), vec!["approve", "fast_track"]);
        assert_eq!(result[1].from, StateSet::from(vec!["draft", "review"]));
    }

    #[test]
    fn no_requirements_match_current_state_as_target() {
        let current = StateId::from("draft");
        let result = resolve(&events(), &Requirements::new(), Some(&current));

        assert_eq!(names(&result), vec!["anywhere"]);
        assert_eq!(result[0].from, StateSet::from("draft"));
        assert_eq!(result[0].to, Some("draft".into()));
    }

    #[test]
    fn no_requirements_and_no_state_match_nothing() {
        let result = resolve(&events(), &Requirements::new(), None);
        assert!(result.is_empty());
    }

    #[test]
    fn blank_requirements_count_as_absent() {
        let current = StateId::from("review");
        let requirements = Requirements::new().on("").from(" ").to("");
        let result = resolve(&events(), &requirements, Some(&current));

        assert_eq!(names(&result), vec!["submit"]);
    }

    #[test]
    fn missing_target_surfaces_as_none() {
        let events = vec![Event::new("broken", EventOptions::new().from("draft"))];
        let result = resolve(&events, &Requirements::new().on("broken"), None);

        assert_eq!(result[0].to, None);
    }

    #[test]
    fn duplicate_event_names_are_all_returned() {
        let events = vec![
            Event::new("retry", EventOptions::new().from("failed").to("queued")),
            Event::new("retry", EventOptions::new().from("stalled").to("queued")),
        ];
        let result = resolve(&events, &Requirements::new().on("retry"), None);

        assert_eq!(result.len(), 2);
        assert_eq!(result[1].from, StateSet::from("stalled"));
    }

    #[test]
    fn predicate_table_maps_both_forms() {
        let states = [StateId::from("draft"), StateId::from("approved")];
        let table = PredicateTable::build(states.iter());

        assert_eq!(
            table.lookup("draft?"),
            Some(&Predicate {
                state: "draft".into(),
                include_past: false
            })
        );
        assert_eq!(
            table.lookup("was_approved?"),
            Some(&Predicate {
                state: "approved".into(),
                include_past: true
            })
        );
        assert_eq!(table.lookup("draft"), None);
        assert_eq!(table.lookup("was_draft"), None);
        assert_eq!(table.lookup("rejected?"), None);
    }

    #[test]
    fn was_prefix_takes_priority_over_similarly_named_state() {
        let states = [StateId::from("draft"), StateId::from("was_draft")];
        let table = PredicateTable::build(states.iter());

        let predicate = table.lookup("was_draft?").unwrap();
        assert_eq!(predicate.state, StateId::from("draft"));
        assert!(predicate.include_past);
    }
}
