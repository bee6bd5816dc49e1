use std::fmt;

use serde::Serialize;

use super::Amount;

/// A single described, signed monetary entry.
/// Transactions are immutable - the ledger only inserts and removes them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Trimmed, non-empty label
    description: String,
    /// Signed amount: >= 0 is money coming in, < 0 is money going out
    amount: Amount,
    /// Always equal to `amount >= 0`
    inflow: bool,
}

impl Transaction {
    /// Create a new transaction, deriving `inflow` from the sign of `amount`.
    pub fn new(description: &str, amount: Amount) -> Result<Self, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if !amount.is_finite() {
            return Err(ValidationError::InvalidAmount);
        }

        Ok(Self {
            description: description.to_string(),
            amount,
            inflow: amount >= 0.0,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn is_inflow(&self) -> bool {
        self.inflow
    }
}

/// Rejected input for a new transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyDescription,
    InvalidAmount,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyDescription => write!(f, "description must not be empty"),
            ValidationError::InvalidAmount => write!(f, "amount must be a finite number"),
        }
    }
}

impl std::error::Error for ValidationError {}
