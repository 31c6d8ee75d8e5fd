use crate::domain::{NewTransaction, Transaction, TransactionId, TransactionUpdate};
use crate::mvi::Intent;
use crate::phase::Phase;

use super::state::TransactionVerb;

#[derive(Debug, Clone)]
pub enum TransactionIntent {
    /// Fetch every transaction of the logged-in user.
    Pull,
    /// Create a transaction for the logged-in user.
    Add(NewTransaction),
    /// Edit title and amount of an existing transaction.
    Update(TransactionUpdate),
    /// Delete a transaction on the backend.
    Delete { id: TransactionId },

    /// Replace the whole list (effect result).
    SetTransactions(Vec<Transaction>),
    /// Replace by id in place, or insert at the head if unknown.
    Upsert(Transaction),
    /// Drop the entry with this id, if any.
    Remove { id: TransactionId },
    /// Forget every record, e.g. after logout.
    Clear,

    SetPhase(Phase<TransactionVerb>),
    /// View acknowledged the terminal phase.
    ResetPhase,
}

impl TransactionIntent {
    /// Backend operation this intent starts, if it is a domain intent.
    pub fn verb(&self) -> Option<TransactionVerb> {
        match self {
            TransactionIntent::Pull => Some(TransactionVerb::Pull),
            TransactionIntent::Add(_) => Some(TransactionVerb::Add),
            TransactionIntent::Update(_) => Some(TransactionVerb::Update),
            TransactionIntent::Delete { .. } => Some(TransactionVerb::Delete),
            _ => None,
        }
    }
}

impl Intent for TransactionIntent {}
