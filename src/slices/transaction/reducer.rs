use crate::mvi::Reducer;
use crate::phase::Phase;

use super::intent::TransactionIntent;
use super::state::{TransactionState, TransactionVerb};

pub struct TransactionReducer;

impl Reducer for TransactionReducer {
    type State = TransactionState;
    type Intent = TransactionIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            TransactionIntent::Pull => pending(state, TransactionVerb::Pull),
            TransactionIntent::Add(_) => pending(state, TransactionVerb::Add),
            TransactionIntent::Update(_) => pending(state, TransactionVerb::Update),
            TransactionIntent::Delete { .. } => pending(state, TransactionVerb::Delete),

            TransactionIntent::SetTransactions(transactions) => TransactionState {
                transactions,
                ..state
            },
            TransactionIntent::Upsert(transaction) => {
                let mut transactions = state.transactions;
                match transactions.iter().position(|t| t.id == transaction.id) {
                    Some(index) => transactions[index] = transaction,
                    None => transactions.insert(0, transaction),
                }
                TransactionState {
                    transactions,
                    ..state
                }
            }
            TransactionIntent::Remove { id } => {
                let mut transactions = state.transactions;
                transactions.retain(|t| t.id != id);
                TransactionState {
                    transactions,
                    ..state
                }
            }
            TransactionIntent::Clear => TransactionState::default(),

            TransactionIntent::SetPhase(phase) => TransactionState { phase, ..state },
            TransactionIntent::ResetPhase => TransactionState {
                phase: Phase::Idle,
                ..state
            },
        }
    }
}

fn pending(state: TransactionState, verb: TransactionVerb) -> TransactionState {
    TransactionState {
        phase: Phase::Pending(verb),
        ..state
    }
}
