mod codec;
mod memory;
mod repository;

use std::future::Future;

use anyhow::Result;

pub use codec::*;
pub use memory::*;
pub use repository::*;

/// SQL migration for initial schema
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

/// Key under which the serialized transaction list is stored.
pub const TRANSACTIONS_KEY: &str = "transactions";

/// Key that receives a copy of an unreadable transactions blob.
pub const CORRUPT_TRANSACTIONS_KEY: &str = "transactions.corrupt";

/// A key-value store holding serialized blobs by name.
pub trait Store {
    /// Fetch the value stored under `key`, if any.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;

    /// Remove the value stored under `key`. Clearing a missing key is not an error.
    fn clear(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}
