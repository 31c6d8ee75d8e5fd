//! Entities mirrored from the finance backend.
//!
//! All of them are local copies of server-owned records: ids are assigned
//! by the server and the client never invents one.

mod currency;
mod transaction;
mod user;
mod wire;

pub use currency::{Currency, CurrencyId};
pub use transaction::{NewTransaction, Transaction, TransactionId, TransactionKind, TransactionUpdate};
pub use user::{AccessToken, Theme, User, UserId, UserLocale};
pub use wire::parse_timestamp;
