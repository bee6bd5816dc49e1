use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Amount, Transaction, ValidationError};

/// Persisted record shape. `inflow` is read but never trusted.
#[derive(Debug, Deserialize)]
struct StoredTransaction {
    description: String,
    amount: Amount,
    #[serde(default)]
    inflow: Option<bool>,
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed transactions data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid stored transaction at position {position}: {source}")]
    InvalidRecord {
        position: usize,
        #[source]
        source: ValidationError,
    },
}

/// Transactions recovered from a persisted blob.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedTransactions {
    pub transactions: Vec<Transaction>,
    /// Records whose stored `inflow` flag disagreed with the sign of `amount`
    pub inflow_mismatches: usize,
}

/// Serialize transactions as an ordered JSON array of
/// `{description, amount, inflow}` objects.
pub fn encode(transactions: &[Transaction]) -> Result<String, serde_json::Error> {
    serde_json::to_string(transactions)
}

/// Deserialize a persisted JSON array back into transactions, in order.
/// `inflow` is re-derived from `amount`. A single invalid record makes the
/// whole blob invalid.
pub fn decode(blob: &str) -> Result<DecodedTransactions, DecodeError> {
    let records: Vec<StoredTransaction> = serde_json::from_str(blob)?;

    let mut transactions = Vec::with_capacity(records.len());
    let mut inflow_mismatches = 0;

    for (position, record) in records.into_iter().enumerate() {
        let transaction = Transaction::new(&record.description, record.amount)
            .map_err(|source| DecodeError::InvalidRecord { position, source })?;

        if record.inflow.is_some_and(|inflow| inflow != transaction.is_inflow()) {
            inflow_mismatches += 1;
        }
        transactions.push(transaction);
    }

    Ok(DecodedTransactions {
        transactions,
        inflow_mismatches,
    })
}
