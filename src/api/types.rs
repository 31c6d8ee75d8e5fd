//! Response envelopes of the finance backend.

use serde::Deserialize;

use crate::domain::{AccessToken, Currency, Transaction, User};

/// Result of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Session {
    pub access_token: AccessToken,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserDataEnvelope {
    #[serde(rename = "userData")]
    pub user_data: User,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrenciesEnvelope {
    pub currencies: Vec<Currency>,
}

/// `/get-expenses` and `/create-expense` both use the `expenses` key,
/// holding a list and a single record respectively.
#[derive(Debug, Deserialize)]
pub(crate) struct ExpensesEnvelope<T> {
    pub expenses: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdatedExpenseEnvelope {
    #[serde(alias = "expenses")]
    pub expense: Transaction,
}
