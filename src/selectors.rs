//! Read-only projections of `AppState` for the view layer.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Currency, Transaction, TransactionKind, User};
use crate::phase::{ErrorCode, Phase};
use crate::slices::auth::AuthVerb;
use crate::slices::currency::CurrencyVerb;
use crate::slices::transaction::TransactionVerb;
use crate::store::AppState;

pub fn auth_phase(state: &AppState) -> &Phase<AuthVerb> {
    &state.auth.phase
}

pub fn currency_phase(state: &AppState) -> &Phase<CurrencyVerb> {
    &state.currency.phase
}

pub fn transaction_phase(state: &AppState) -> &Phase<TransactionVerb> {
    &state.transactions.phase
}

pub fn auth_error(state: &AppState) -> Option<&ErrorCode> {
    state.auth.phase.error()
}

pub fn currency_error(state: &AppState) -> Option<&ErrorCode> {
    state.currency.phase.error()
}

pub fn transaction_error(state: &AppState) -> Option<&ErrorCode> {
    state.transactions.phase.error()
}

pub fn current_user(state: &AppState) -> Option<&User> {
    state.auth.user.as_ref()
}

/// The user's preferred currency, resolved against the currency list.
///
/// `None` when logged out, when no currency was chosen, or when the list has
/// not been pulled yet.
pub fn selected_currency(state: &AppState) -> Option<&Currency> {
    let id = state.auth.user.as_ref()?.currency_id?;
    state.currency.find(id)
}

/// Income, expense and balance over the transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

pub fn totals(state: &AppState) -> Totals {
    summarize(&state.transactions.transactions)
}

fn summarize(transactions: &[Transaction]) -> Totals {
    let (income, expense) = transactions.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expense), t| match t.kind {
            TransactionKind::Income => (income + t.amount, expense),
            TransactionKind::Expense => (income, expense + t.amount),
        },
    );
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;

    fn tx(id: i64, kind: TransactionKind, amount: &str) -> Transaction {
        Transaction {
            id,
            title: format!("t{}", id),
            amount: Decimal::from_str(amount).unwrap(),
            kind,
            category_id: 1,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            user_id: 1,
            currency_id: None,
        }
    }

    fn currency(id: i64, code: &str) -> Currency {
        Currency {
            id,
            code: code.into(),
            name: code.into(),
            symbol: "$".into(),
        }
    }

    #[test]
    fn totals_use_exact_decimals() {
        let mut state = AppState::default();
        state.transactions.transactions = vec![
            tx(1, TransactionKind::Income, "0.1"),
            tx(2, TransactionKind::Income, "0.2"),
            tx(3, TransactionKind::Expense, "10.5"),
        ];
        let totals = totals(&state);
        assert_eq!(totals.income, Decimal::from_str("0.3").unwrap());
        assert_eq!(totals.expense, Decimal::from_str("10.5").unwrap());
        assert_eq!(totals.balance, Decimal::from_str("-10.2").unwrap());
    }

    #[test]
    fn empty_list_totals_zero() {
        assert_eq!(totals(&AppState::default()), Totals::default());
    }

    #[test]
    fn selected_currency_follows_foreign_key() {
        let mut state = AppState::default();
        state.currency.currencies = vec![currency(1, "USD"), currency(2, "EUR")];
        assert_eq!(selected_currency(&state), None);

        state.auth.user = Some(User {
            id: 7,
            name: None,
            email: None,
            user_type_title: None,
            is_active: None,
            profile_pic: None,
            currency_id: Some(2),
        });
        assert_eq!(selected_currency(&state).map(|c| c.code.as_str()), Some("EUR"));

        state.currency.currencies.clear();
        assert_eq!(selected_currency(&state), None);
    }

    #[test]
    fn error_projects_failed_phase_only() {
        let mut state = AppState::default();
        assert_eq!(transaction_error(&state), None);
        state.transactions.phase = Phase::Failed(TransactionVerb::Add, ErrorCode::InvalidResponse);
        assert_eq!(transaction_error(&state), Some(&ErrorCode::InvalidResponse));
        assert_eq!(transaction_phase(&state).tag(), Some("adding-error"));
        assert!(auth_error(&state).is_none() && currency_error(&state).is_none());
    }
}
