use serde::{Deserialize, Serialize};

use crate::domain::{Currency, CurrencyId};
use crate::mvi::SliceState;
use crate::phase::{Phase, Verb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyVerb {
    Pull,
}

impl Verb for CurrencyVerb {
    fn pending_tag(self) -> &'static str {
        "loading"
    }

    fn success_tag(self) -> &'static str {
        "success"
    }

    fn error_tag(self) -> &'static str {
        "error"
    }
}

/// Authoritative list of currencies known to the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrencyState {
    pub currencies: Vec<Currency>,
    #[serde(default)]
    pub phase: Phase<CurrencyVerb>,
}

impl SliceState for CurrencyState {
    const KEY: &'static str = "currencies";

    fn restored(mut self) -> Self {
        self.phase = self.phase.settle_pending();
        self
    }
}

impl CurrencyState {
    pub fn find(&self, id: CurrencyId) -> Option<&Currency> {
        self.currencies.iter().find(|c| c.id == id)
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Currency> {
        self.currencies
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }
}
