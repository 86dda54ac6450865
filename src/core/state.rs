//! State identifiers.
//!
//! States are referred to by name. A [`StateId`] is the normalized form every
//! declaration and query is compared in; typed enums can participate through
//! the [`State`] trait.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};

/// Normalized identifier of a state.
///
/// Two identifiers are the same state when their names are equal.
///
/// # Example
///
/// ```rust
/// use statemark::core::StateId;
///
/// let draft = StateId::from("draft");
/// assert_eq!(draft, StateId::from(String::from("draft")));
/// assert_eq!(draft.as_str(), "draft");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    /// Create an identifier from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The state's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank identifiers are treated as absent in queries.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for StateId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&StateId> for StateId {
    fn from(id: &StateId) -> Self {
        id.clone()
    }
}

impl PartialEq<str> for StateId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StateId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The source states of an event.
///
/// An event may name a single source state, an ordered set of them, or
/// none at all. Membership treats `One` as a one-element set; `Any` only
/// records that no source was declared and therefore contains nothing.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateSet {
    /// No source declared.
    #[default]
    Any,
    /// A single source state.
    One(StateId),
    /// An ordered list of source states.
    Many(Vec<StateId>),
}

impl StateSet {
    /// Whether `state` is explicitly listed.
    pub fn contains(&self, state: &StateId) -> bool {
        match self {
            Self::Any => false,
            Self::One(id) => id == state,
            Self::Many(ids) => ids.contains(state),
        }
    }

    /// Listed states in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &StateId> {
        let ids: &[StateId] = match self {
            Self::Any => &[],
            Self::One(id) => std::slice::from_ref(id),
            Self::Many(ids) => ids,
        };
        ids.iter()
    }

    /// Whether no source state was declared.
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl From<StateId> for StateSet {
    fn from(id: StateId) -> Self {
        Self::One(id)
    }
}

impl From<&str> for StateSet {
    fn from(name: &str) -> Self {
        Self::One(name.into())
    }
}

impl<S: Into<StateId>> From<Vec<S>> for StateSet {
    fn from(ids: Vec<S>) -> Self {
        Self::Many(ids.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<StateId>> From<Option<S>> for StateSet {
    fn from(id: Option<S>) -> Self {
        id.map_or(Self::Any, |id| Self::One(id.into()))
    }
}

/// Trait for typed states.
///
/// Enums implementing `State` can be used wherever a [`StateId`] is
/// expected through [`State::id`]. The [`state_enum!`](crate::state_enum)
/// macro generates the implementation along with `From` conversions.
///
/// # Example
///
/// ```rust
/// use statemark::core::{State, StateId};
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum TaskState {
///     Pending,
///     Running,
/// }
///
/// impl State for TaskState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "pending",
///             Self::Running => "running",
///         }
///     }
/// }
///
/// assert_eq!(TaskState::Running.id(), StateId::from("running"));
/// ```
pub trait State: Clone + PartialEq + Debug {
    /// The identifier name of this state.
    fn name(&self) -> &str;

    /// Normalized identifier for this state.
    fn id(&self) -> StateId {
        StateId::from(self.name())
    }
}
