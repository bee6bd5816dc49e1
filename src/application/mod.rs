// Application layer - the single owner of the ledger, wiring each operation
// to the renderer and the persistence store.

pub mod error;
pub mod render;
pub mod reporting;
pub mod service;

pub use error::*;
pub use render::*;
pub use reporting::*;
pub use service::*;
