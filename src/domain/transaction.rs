use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::CurrencyId;
use super::user::UserId;
use super::wire;

pub type TransactionId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// An income or expense record owned by one user.
///
/// `created_at` is the canonical date field; older backend revisions named
/// it `transaction_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "wire::id")]
    pub id: TransactionId,
    pub title: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(deserialize_with = "wire::id")]
    pub category_id: i64,
    #[serde(alias = "transaction_date", deserialize_with = "wire::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "wire::id")]
    pub user_id: UserId,
    #[serde(default, deserialize_with = "wire::optional_id")]
    pub currency_id: Option<CurrencyId>,
}

/// Payload of an add intent. The server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub title: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Payload of an update intent: the editable fields of an existing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionUpdate {
    pub id: TransactionId,
    pub title: String,
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn decodes_backend_record() {
        let json = r#"{
            "id": 99, "title": "Coffee", "amount": "10.50", "type": "expense",
            "category_id": "1", "created_at": "2024-05-01 08:30:00",
            "user_id": 1, "currency_id": null
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id, 99);
        assert_eq!(tx.amount, Decimal::from_str("10.50").unwrap());
        assert_eq!(tx.kind, TransactionKind::Expense);
        assert_eq!(tx.category_id, 1);
        assert_eq!(tx.currency_id, None);
    }

    #[test]
    fn accepts_legacy_date_field_and_numeric_amount() {
        let json = r#"{
            "id": 3, "title": "Salary", "amount": 1200, "type": "income",
            "category_id": 2, "transaction_date": "2024-05-01", "user_id": 1
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.amount, Decimal::from(1200));
        assert_eq!(tx.kind, TransactionKind::Income);
    }

    #[test]
    fn snapshot_round_trip_keeps_record() {
        let json = r#"{"id":3,"title":"T","amount":"1.25","type":"income",
            "category_id":2,"created_at":"2024-05-01T00:00:00Z","user_id":1}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        let back: Transaction =
            serde_json::from_str(&serde_json::to_string(&tx).unwrap()).unwrap();
        assert_eq!(back, tx);
    }

    #[test]
    fn kind_parse_is_case_insensitive() {
        assert_eq!(TransactionKind::parse("Income"), Some(TransactionKind::Income));
        assert_eq!(TransactionKind::parse("EXPENSE"), Some(TransactionKind::Expense));
        assert_eq!(TransactionKind::parse("transfer"), None);
    }
}
