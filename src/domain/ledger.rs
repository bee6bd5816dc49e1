use std::fmt;

use serde::Serialize;

use super::{Amount, Transaction, ValidationError};

/// Derived totals over a list of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Sum of all non-negative amounts
    pub income: Amount,
    /// Sum of the absolute values of all negative amounts
    pub expense: Amount,
    /// income - expense
    pub balance: Amount,
}

/// Compute income, expense and balance from a list of transactions.
/// Always recomputed from scratch, never maintained incrementally.
pub fn compute_summary(transactions: &[Transaction]) -> Summary {
    let (income, expense) = transactions.iter().fold((0.0, 0.0), |(income, expense), tx| {
        if tx.amount() >= 0.0 {
            (income + tx.amount(), expense)
        } else {
            (income, expense + tx.amount().abs())
        }
    });

    Summary {
        income,
        expense,
        balance: income - expense,
    }
}

/// An ordered collection of transactions. Insertion order is display order,
/// and a transaction's position is its address for removal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from already validated transactions, e.g. after loading
    /// persisted state.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Append a new transaction at the end of the ledger.
    /// Nothing changes if the input is rejected.
    pub fn add(
        &mut self,
        description: &str,
        amount: Amount,
    ) -> Result<&Transaction, ValidationError> {
        let transaction = Transaction::new(description, amount)?;
        self.transactions.push(transaction);
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Remove the transaction at `index`. Later transactions shift down by one.
    pub fn remove_at(&mut self, index: usize) -> Result<Transaction, IndexError> {
        if index >= self.transactions.len() {
            return Err(IndexError {
                index,
                len: self.transactions.len(),
            });
        }
        Ok(self.transactions.remove(index))
    }

    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn summary(&self) -> Summary {
        compute_summary(&self.transactions)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// A removal addressed a position that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No transaction at position {} (ledger has {} transaction{})",
            self.index,
            self.len,
            if self.len == 1 { "" } else { "s" }
        )
    }
}

impl std::error::Error for IndexError {}
