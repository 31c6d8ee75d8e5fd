use serde::{Deserialize, Serialize};

use crate::domain::{Transaction, TransactionId};
use crate::mvi::SliceState;
use crate::phase::{Phase, Verb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionVerb {
    Pull,
    Add,
    Update,
    Delete,
}

impl Verb for TransactionVerb {
    fn pending_tag(self) -> &'static str {
        match self {
            TransactionVerb::Pull => "loading",
            TransactionVerb::Add => "adding",
            TransactionVerb::Update => "updating",
            TransactionVerb::Delete => "deleting",
        }
    }

    fn success_tag(self) -> &'static str {
        match self {
            TransactionVerb::Pull => "success",
            TransactionVerb::Add => "adding-success",
            TransactionVerb::Update => "updating-success",
            TransactionVerb::Delete => "deleted-success",
        }
    }

    fn error_tag(self) -> &'static str {
        match self {
            TransactionVerb::Pull => "error",
            TransactionVerb::Add => "adding-error",
            TransactionVerb::Update => "updating-error",
            TransactionVerb::Delete => "deleting-error",
        }
    }
}

/// Transactions of the logged-in user, newest insertion first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionState {
    #[serde(rename = "userTransactions")]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub phase: Phase<TransactionVerb>,
}

impl SliceState for TransactionState {
    const KEY: &'static str = "userTransactions";

    fn restored(mut self) -> Self {
        self.phase = self.phase.settle_pending();
        self
    }
}

impl TransactionState {
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TransactionId) -> bool {
        self.get(id).is_some()
    }
}
