mod intent;
mod reducer;
mod state;

pub use intent::CurrencyIntent;
pub use reducer::CurrencyReducer;
pub use state::{CurrencyState, CurrencyVerb};
