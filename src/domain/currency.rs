use serde::{Deserialize, Serialize};

pub type CurrencyId = i64;

/// Reference currency entity, fetched in bulk and never edited locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub id: CurrencyId,
    pub code: String,
    pub name: String,
    pub symbol: String,
}
