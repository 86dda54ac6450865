//! Macros for declaring states and state machines.

/// Generate a typed state enum with `State` and `StateId` conversions.
///
/// Each variant names the identifier it stands for.
///
/// # Example
///
/// ```
/// use statemark::state_enum;
/// use statemark::core::{State, StateId};
///
/// state_enum! {
///     pub enum DocState {
///         Draft => draft,
///         Review => review,
///         Published => published,
///     }
/// }
///
/// assert_eq!(DocState::Review.name(), "review");
/// assert_eq!(StateId::from(DocState::Draft), StateId::from("draft"));
/// assert_eq!(DocState::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $id:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($id)),*
                }
            }
        }

        impl ::core::convert::From<$name> for $crate::core::StateId {
            fn from(state: $name) -> Self {
                $crate::core::State::id(&state)
            }
        }

        impl ::core::convert::From<&$name> for $crate::core::StateId {
            fn from(state: &$name) -> Self {
                $crate::core::State::id(state)
            }
        }
    };
}

/// Declare a [`StateMachine`](crate::core::StateMachine).
///
/// Clauses are replayed in the order written: the optional `initial` and
/// `states` clauses, then one `event` line per event. An event's source is
/// a state, a bracketed list of states, or `_` for none; its target is a
/// state or `_`.
///
/// # Example
///
/// ```
/// use statemark::state_machine;
/// use statemark::core::{Requirements, StateId};
///
/// let machine = state_machine! {
///     initial: draft;
///     states: [review];
///     event submit: draft => review;
///     event approve: [review] => approved;
///     event reject: [review, approved] => rejected;
///     event reset: _ => draft;
/// };
///
/// assert_eq!(machine.initial_state(), &StateId::from("draft"));
/// assert_eq!(machine.states().len(), 4);
/// assert_eq!(machine.transitions(&Requirements::new().from("review"), None).len(), 2);
/// ```
#[macro_export]
macro_rules! state_machine {
    (
        $(initial: $initial:ident;)?
        $(states: [$($state:ident),* $(,)?];)?
        $(event $event:ident: $from:tt => $to:tt;)*
    ) => {{
        #[allow(unused_mut)]
        let mut machine = $crate::core::StateMachine::new();
        $(
            machine.declare_states(
                ::core::option::Option::Some($crate::core::StateId::from(stringify!($initial))),
                ::core::iter::empty::<$crate::core::StateId>(),
            );
        )?
        $(
            let states: ::std::vec::Vec<$crate::core::StateId> =
                ::std::vec![$($crate::core::StateId::from(stringify!($state))),*];
            machine.declare_states(::core::option::Option::None, states);
        )?
        $(
            machine.declare_event(
                stringify!($event),
                $crate::core::EventOptions {
                    from: $crate::__state_set!($from),
                    to: $crate::__target_state!($to),
                },
            );
        )*
        machine
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __state_set {
    (_) => {
        $crate::core::StateSet::Any
    };
    ([$($state:ident),* $(,)?]) => {
        $crate::core::StateSet::Many(::std::vec![
            $($crate::core::StateId::from(stringify!($state))),*
        ])
    };
    ($state:ident) => {
        $crate::core::StateSet::One($crate::core::StateId::from(stringify!($state)))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __target_state {
    (_) => {
        ::core::option::Option::None
    };
    ($state:ident) => {
        ::core::option::Option::Some($crate::core::StateId::from(stringify!($state)))
    };
}
