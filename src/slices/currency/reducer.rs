use crate::mvi::Reducer;
use crate::phase::Phase;

use super::intent::CurrencyIntent;
use super::state::{CurrencyState, CurrencyVerb};

pub struct CurrencyReducer;

impl Reducer for CurrencyReducer {
    type State = CurrencyState;
    type Intent = CurrencyIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            CurrencyIntent::Pull => CurrencyState {
                phase: Phase::Pending(CurrencyVerb::Pull),
                ..state
            },
            CurrencyIntent::SetCurrencies(currencies) => CurrencyState { currencies, ..state },
            CurrencyIntent::SetPhase(phase) => CurrencyState { phase, ..state },
            CurrencyIntent::ResetPhase => CurrencyState {
                phase: Phase::Idle,
                ..state
            },
        }
    }
}
