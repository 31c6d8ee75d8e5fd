use serde::Serialize;

use crate::mvi::Reducer;
use crate::slices::auth::{AuthIntent, AuthReducer, AuthState};
use crate::slices::currency::{CurrencyIntent, CurrencyReducer, CurrencyState};
use crate::slices::transaction::{TransactionIntent, TransactionReducer, TransactionState};

/// The three slices held by the store.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AppState {
    pub auth: AuthState,
    pub currency: CurrencyState,
    pub transactions: TransactionState,
}

/// Any intent the store accepts, routed to its slice.
#[derive(Debug, Clone)]
pub enum AppIntent {
    Auth(AuthIntent),
    Currency(CurrencyIntent),
    Transaction(TransactionIntent),
}

impl From<AuthIntent> for AppIntent {
    fn from(intent: AuthIntent) -> Self {
        AppIntent::Auth(intent)
    }
}

impl From<CurrencyIntent> for AppIntent {
    fn from(intent: CurrencyIntent) -> Self {
        AppIntent::Currency(intent)
    }
}

impl From<TransactionIntent> for AppIntent {
    fn from(intent: TransactionIntent) -> Self {
        AppIntent::Transaction(intent)
    }
}

/// Which slices a batch of intents touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Changed {
    pub auth: bool,
    pub currency: bool,
    pub transactions: bool,
    /// A logout was applied, whether or not a user was logged in.
    pub session_ended: bool,
}

impl Changed {
    pub fn any(&self) -> bool {
        self.auth || self.currency || self.transactions
    }
}

impl AppState {
    /// Reduce one intent into the owning slice and record whether it changed.
    ///
    /// Logout also forgets the transaction list, which belongs to the user
    /// being logged out.
    pub(crate) fn apply(&mut self, intent: AppIntent, changed: &mut Changed) {
        match intent {
            AppIntent::Auth(intent) => {
                let logout = matches!(intent, AuthIntent::Logout);
                let next = AuthReducer::reduce(self.auth.clone(), intent);
                if next != self.auth {
                    self.auth = next;
                    changed.auth = true;
                }
                if logout {
                    changed.session_ended = true;
                    self.apply(TransactionIntent::Clear.into(), changed);
                }
            }
            AppIntent::Currency(intent) => {
                let next = CurrencyReducer::reduce(self.currency.clone(), intent);
                if next != self.currency {
                    self.currency = next;
                    changed.currency = true;
                }
            }
            AppIntent::Transaction(intent) => {
                let next = TransactionReducer::reduce(self.transactions.clone(), intent);
                if next != self.transactions {
                    self.transactions = next;
                    changed.transactions = true;
                }
            }
        }
    }
}
