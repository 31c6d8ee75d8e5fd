//! Reducer trait for slice state transitions.

use super::intent::Intent;
use super::state::SliceState;

/// Reducer transforms slice state based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Intent) -> State. It never performs
/// I/O and never fails; intents that do not apply return the state unchanged.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: SliceState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the new state.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
