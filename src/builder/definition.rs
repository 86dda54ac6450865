//! Data-driven state machine definitions.

use crate::core::{Event, StateId, StateMachine, StatesError};
use serde::{Deserialize, Serialize};

/// Serializable description of a state machine's declarations.
///
/// ```json
/// {
///   "initial": "draft",
///   "states": ["review"],
///   "events": [
///     { "name": "submit", "from": "draft", "to": "review" },
///     { "name": "approve", "from": ["review"], "to": "approved" }
///   ]
/// }
/// ```
///
/// Every field is optional. `from` may be a name, a list of names or
/// absent; `to` may be absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<StateId>,
    #[serde(default)]
    pub states: Vec<StateId>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl StateMachine {
    /// Build a machine by replaying a definition's declarations: states
    /// first, then events in order.
    pub fn from_definition(definition: &MachineDefinition) -> Self {
        let mut machine = Self::new();
        if definition.initial.is_some() || !definition.states.is_empty() {
            machine.declare_states(definition.initial.clone(), &definition.states);
        }
        for event in &definition.events {
            machine.declare_event(event.name(), event.options().clone());
        }
        machine
    }

    /// Parse a JSON [`MachineDefinition`] and build the machine.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statemark::core::{Requirements, StateMachine};
    ///
    /// let machine = StateMachine::from_json(
    ///     r#"{
    ///         "initial": "draft",
    ///         "events": [{ "name": "submit", "from": "draft", "to": "review" }]
    ///     }"#,
    /// )?;
    /// assert_eq!(machine.transitions(&Requirements::new().on("submit"), None).len(), 1);
    /// # Ok::<(), statemark::core::StatesError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, StatesError> {
        let definition: MachineDefinition = serde_json::from_str(json)
            .map_err(|e| StatesError::InvalidDefinition(e.to_string()))?;
        Ok(Self::from_definition(&definition))
    }

    /// Export the machine's declarations.
    ///
    /// Rebuilding from the export reproduces states, initial state and
    /// events.
    pub fn to_definition(&self) -> MachineDefinition {
        MachineDefinition {
            initial: Some(self.initial_state().clone()),
            states: self.states().to_vec(),
            events: self.events().to_vec(),
        }
    }

    /// Serialize the machine's declarations as JSON.
    pub fn to_json(&self) -> Result<String, StatesError> {
        serde_json::to_string_pretty(&self.to_definition())
            .map_err(|e| StatesError::InvalidDefinition(e.to_string()))
    }
}
