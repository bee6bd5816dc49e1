use serde::Serialize;

use crate::domain::Summary;

/// Result of inspecting the persisted transactions without loading them.
#[derive(Debug, Clone, Serialize)]
pub struct StorageReport {
    pub status: StorageStatus,
    /// Number of records, when the blob could be read
    pub transaction_count: usize,
    /// Records whose stored `inflow` flag disagreed with their amount
    pub inflow_mismatches: usize,
    /// Totals over the stored records
    pub summary: Summary,
    /// Whether a copy of a previously unreadable blob is being kept
    pub has_corrupt_backup: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum StorageStatus {
    /// Nothing stored yet
    Absent,
    /// Stored data reads back cleanly
    Ok,
    /// Stored data cannot be read; the ledger would start empty
    Malformed(String),
}

impl StorageReport {
    pub fn is_consistent(&self) -> bool {
        !matches!(self.status, StorageStatus::Malformed(_)) && self.inflow_mismatches == 0
    }

    /// Human-readable issues found in the stored data.
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if let StorageStatus::Malformed(reason) = &self.status {
            issues.push(format!("Stored transactions are unreadable: {}", reason));
        }
        if self.inflow_mismatches > 0 {
            issues.push(format!(
                "{} stored transaction(s) have an inflow flag that disagrees with the amount sign",
                self.inflow_mismatches
            ));
        }
        if self.has_corrupt_backup {
            issues.push("A backup of earlier unreadable data is kept".to_string());
        }
        issues
    }
}
