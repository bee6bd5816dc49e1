use anyhow::{Context, Result};
use std::io::Write;

use crate::domain::Ledger;
use crate::storage::encode;

/// Exporter for writing ledger contents to external formats
pub struct Exporter<'a> {
    ledger: &'a Ledger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Export transactions as a JSON array, the same shape that is persisted.
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<usize> {
        let json = encode(self.ledger.list()).context("Failed to serialize transactions")?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;
        Ok(self.ledger.len())
    }

    /// Export transactions to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write header
        csv_writer.write_record(["description", "amount", "inflow"])?;

        let mut count = 0;
        for tx in self.ledger.list() {
            csv_writer.write_record([
                tx.description().to_string(),
                tx.amount().to_string(),
                tx.is_inflow().to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }
}
