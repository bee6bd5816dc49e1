// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::io;

use anyhow::Result;
use cashbook::application::{LedgerService, Renderer};
use cashbook::domain::{Summary, Transaction};
use cashbook::storage::{MemoryStore, SqliteStore};
use tempfile::TempDir;

pub const EPSILON: f64 = 1e-9;

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

/// Renderer that remembers what it was asked to show.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Number of full renders
    pub renders: usize,
    /// Transactions and summary from the latest render
    pub last_render: Option<(Vec<Transaction>, Summary)>,
    /// Current content of the error area
    pub error_area: Option<String>,
    /// Every message ever shown in the error area
    pub errors_shown: Vec<String>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, transactions: &[Transaction], summary: &Summary) -> io::Result<()> {
        self.renders += 1;
        self.last_render = Some((transactions.to_vec(), *summary));
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> io::Result<()> {
        self.error_area = Some(message.to_string());
        self.errors_shown.push(message.to_string());
        Ok(())
    }

    fn clear_error(&mut self) -> io::Result<()> {
        self.error_area = None;
        Ok(())
    }
}

pub type MemoryService = LedgerService<MemoryStore, RecordingRenderer>;
pub type SqliteService = LedgerService<SqliteStore, RecordingRenderer>;

/// Helper to create a service over a fresh in-memory store.
/// The returned store handle shares data with the service.
pub async fn memory_service() -> Result<(MemoryService, MemoryStore)> {
    let store = MemoryStore::new();
    let service = LedgerService::open(store.clone(), RecordingRenderer::default()).await?;
    Ok((service, store))
}

/// Helper to create a test service with a temporary database
pub async fn sqlite_service() -> Result<(SqliteService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let service = open_sqlite(&temp_dir).await?;
    Ok((service, temp_dir))
}

/// Open (or reopen) the database inside `temp_dir`.
pub async fn open_sqlite(temp_dir: &TempDir) -> Result<SqliteService> {
    let db_path = temp_dir.path().join("test.db");
    let store = SqliteStore::open(db_path.to_str().unwrap()).await?;
    Ok(LedgerService::open(store, RecordingRenderer::default()).await?)
}

/// Scenario A: Paycheck then Rent.
pub async fn add_paycheck_and_rent<S: cashbook::storage::Store>(
    service: &mut LedgerService<S, RecordingRenderer>,
) -> Result<()> {
    service.add("Paycheck", "1000").await?;
    service.add("Rent", "-500").await?;
    Ok(())
}

pub fn descriptions(transactions: &[Transaction]) -> Vec<&str> {
    transactions.iter().map(|t| t.description()).collect()
}
