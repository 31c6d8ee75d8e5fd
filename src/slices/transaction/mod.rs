mod intent;
mod reducer;
mod state;

pub use intent::TransactionIntent;
pub use reducer::TransactionReducer;
pub use state::{TransactionState, TransactionVerb};
