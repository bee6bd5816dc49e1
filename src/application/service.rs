use anyhow::Context;

use crate::domain::{parse_amount, Amount, Ledger, Summary, Transaction, ValidationError};
use crate::storage::{decode, encode, Store, CORRUPT_TRANSACTIONS_KEY, TRANSACTIONS_KEY};

use super::{AppError, Renderer, StorageReport, StorageStatus};

/// Application service owning the one ledger instance.
/// This is the primary interface for any client (CLI, shell, tests, etc.).
///
/// Every successful mutation clears the error area, re-renders, and saves
/// the full transaction list. A rejected mutation only reports the error.
pub struct LedgerService<S: Store, R: Renderer> {
    ledger: Ledger,
    store: S,
    renderer: R,
}

impl<S: Store, R: Renderer> LedgerService<S, R> {
    /// Load the persisted ledger from `store`.
    ///
    /// Missing data gives an empty ledger. Unreadable data also gives an
    /// empty ledger, after a copy of it is kept under
    /// [`CORRUPT_TRANSACTIONS_KEY`].
    pub async fn open(store: S, renderer: R) -> Result<Self, AppError> {
        let ledger = load_ledger(&store).await?;
        Ok(Self {
            ledger,
            store,
            renderer,
        })
    }

    /// Render the current list and summary without changing anything.
    pub fn refresh(&mut self) -> Result<(), AppError> {
        self.renderer
            .render(self.ledger.list(), &self.ledger.summary())?;
        Ok(())
    }

    /// Add a transaction from raw form input.
    /// The amount is parsed here; anything that is not a finite number is
    /// rejected like a blank description.
    pub async fn add(&mut self, description: &str, amount: &str) -> Result<Transaction, AppError> {
        match parse_amount(amount) {
            Ok(amount) => self.add_amount(description, amount).await,
            Err(err) => {
                tracing::debug!(input = amount, error = %err, "rejected amount");
                self.reject(ValidationError::InvalidAmount.into())
            }
        }
    }

    /// Add a transaction with an already parsed amount.
    pub async fn add_amount(
        &mut self,
        description: &str,
        amount: Amount,
    ) -> Result<Transaction, AppError> {
        let transaction = match self.ledger.add(description, amount) {
            Ok(transaction) => transaction.clone(),
            Err(err) => return self.reject(err.into()),
        };

        tracing::debug!(
            description = transaction.description(),
            amount = transaction.amount(),
            inflow = transaction.is_inflow(),
            "added transaction"
        );

        self.commit().await?;
        Ok(transaction)
    }

    /// Remove the transaction at `index` in the last rendered list.
    pub async fn remove_at(&mut self, index: usize) -> Result<Transaction, AppError> {
        let removed = match self.ledger.remove_at(index) {
            Ok(removed) => removed,
            Err(err) => return self.reject(err.into()),
        };

        tracing::debug!(
            index,
            description = removed.description(),
            "removed transaction"
        );

        self.commit().await?;
        Ok(removed)
    }

    pub fn list(&self) -> &[Transaction] {
        self.ledger.list()
    }

    pub fn summary(&self) -> Summary {
        self.ledger.summary()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Inspect the persisted data without touching the in-memory ledger.
    pub async fn check(&self) -> Result<StorageReport, AppError> {
        let has_corrupt_backup = self.store.get(CORRUPT_TRANSACTIONS_KEY).await?.is_some();

        let report = match self.store.get(TRANSACTIONS_KEY).await? {
            None => StorageReport {
                status: StorageStatus::Absent,
                transaction_count: 0,
                inflow_mismatches: 0,
                summary: Summary::default(),
                has_corrupt_backup,
            },
            Some(blob) => match decode(&blob) {
                Ok(decoded) => StorageReport {
                    status: StorageStatus::Ok,
                    transaction_count: decoded.transactions.len(),
                    inflow_mismatches: decoded.inflow_mismatches,
                    summary: Ledger::from_transactions(decoded.transactions).summary(),
                    has_corrupt_backup,
                },
                Err(err) => StorageReport {
                    status: StorageStatus::Malformed(err.to_string()),
                    transaction_count: 0,
                    inflow_mismatches: 0,
                    summary: Summary::default(),
                    has_corrupt_backup,
                },
            },
        };

        Ok(report)
    }

    /// Delete all persisted transactions, including any kept corrupt copy.
    /// Consumes the service so the stale in-memory ledger cannot be saved
    /// back afterwards.
    pub async fn reset(self) -> Result<(), AppError> {
        self.store.clear(TRANSACTIONS_KEY).await?;
        self.store.clear(CORRUPT_TRANSACTIONS_KEY).await?;
        tracing::info!(
            discarded = self.ledger.len(),
            "cleared persisted transactions"
        );
        Ok(())
    }

    fn reject<T>(&mut self, error: AppError) -> Result<T, AppError> {
        self.renderer.show_error(&error.user_message())?;
        Err(error)
    }

    async fn commit(&mut self) -> Result<(), AppError> {
        self.renderer.clear_error()?;
        self.refresh()?;
        self.save().await
    }

    async fn save(&self) -> Result<(), AppError> {
        let blob = encode(self.ledger.list()).context("Failed to serialize transactions")?;
        self.store.set(TRANSACTIONS_KEY, &blob).await?;
        tracing::debug!(count = self.ledger.len(), "saved transactions");
        Ok(())
    }
}

async fn load_ledger<S: Store>(store: &S) -> Result<Ledger, AppError> {
    let Some(blob) = store.get(TRANSACTIONS_KEY).await? else {
        tracing::info!("no stored transactions, starting with an empty ledger");
        return Ok(Ledger::new());
    };

    match decode(&blob) {
        Ok(decoded) => {
            if decoded.inflow_mismatches > 0 {
                tracing::warn!(
                    mismatches = decoded.inflow_mismatches,
                    "stored inflow flags disagree with amounts, using the amount sign"
                );
            }
            tracing::info!(count = decoded.transactions.len(), "loaded transactions");
            Ok(Ledger::from_transactions(decoded.transactions))
        }
        Err(err) => {
            tracing::warn!(
                error = %err,
                backup_key = CORRUPT_TRANSACTIONS_KEY,
                "stored transactions are unreadable, starting with an empty ledger"
            );
            store.set(CORRUPT_TRANSACTIONS_KEY, &blob).await?;
            Ok(Ledger::new())
        }
    }
}
