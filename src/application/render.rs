use std::io;

use crate::domain::{Summary, Transaction};

/// Presentation target for the ledger.
///
/// `render` receives the full list and summary after every successful
/// mutation. Positions in `transactions` are the indices accepted by
/// removal until the next render.
pub trait Renderer {
    fn render(&mut self, transactions: &[Transaction], summary: &Summary) -> io::Result<()>;

    /// Show a message in the error area.
    fn show_error(&mut self, message: &str) -> io::Result<()>;

    /// Clear the error area. Called on every successful operation.
    fn clear_error(&mut self) -> io::Result<()>;
}

/// Renderer that discards everything, for callers that only need the ledger.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _transactions: &[Transaction], _summary: &Summary) -> io::Result<()> {
        Ok(())
    }

    fn show_error(&mut self, _message: &str) -> io::Result<()> {
        Ok(())
    }

    fn clear_error(&mut self) -> io::Result<()> {
        Ok(())
    }
}
