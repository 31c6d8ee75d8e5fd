use crate::domain::Currency;
use crate::mvi::Intent;
use crate::phase::Phase;

use super::state::CurrencyVerb;

#[derive(Debug, Clone)]
pub enum CurrencyIntent {
    /// Fetch the full currency list from the backend.
    Pull,
    /// Replace the held list (effect result).
    SetCurrencies(Vec<Currency>),
    SetPhase(Phase<CurrencyVerb>),
    /// View acknowledged the terminal phase.
    ResetPhase,
}

impl CurrencyIntent {
    pub fn verb(&self) -> Option<CurrencyVerb> {
        match self {
            CurrencyIntent::Pull => Some(CurrencyVerb::Pull),
            _ => None,
        }
    }
}

impl Intent for CurrencyIntent {}
