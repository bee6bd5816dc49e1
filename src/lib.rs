pub mod application;
pub mod cli;
pub mod domain;
pub mod io;
pub mod storage;

pub use application::{AppError, LedgerService, Renderer};
pub use domain::*;
pub use storage::{MemoryStore, SqliteStore, Store};
