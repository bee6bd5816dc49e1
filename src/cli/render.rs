use std::io::{self, Write};

use crate::application::Renderer;
use crate::domain::{format_amount, Summary, Transaction};

const DESCRIPTION_WIDTH: usize = 30;

/// Renders the ledger as a plain-text table.
/// The list and summary go to `out`; the error area is `err`.
pub struct TerminalRenderer<O: Write, E: Write> {
    out: O,
    err: E,
    currency: String,
}

impl TerminalRenderer<io::Stdout, io::Stderr> {
    pub fn stdio(currency: impl Into<String>) -> Self {
        Self::new(io::stdout(), io::stderr(), currency)
    }
}

impl<O: Write, E: Write> TerminalRenderer<O, E> {
    pub fn new(out: O, err: E, currency: impl Into<String>) -> Self {
        Self {
            out,
            err,
            currency: currency.into(),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Print only the income / expense / balance lines.
    pub fn render_summary(&mut self, summary: &Summary) -> io::Result<()> {
        writeln!(self.out, "Income:  {}", format_amount(summary.income, &self.currency))?;
        writeln!(self.out, "Expense: {}", format_amount(summary.expense, &self.currency))?;
        writeln!(self.out, "Balance: {}", format_amount(summary.balance, &self.currency))?;
        self.out.flush()
    }

    /// Print a plain informational line.
    pub fn message(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> Renderer for TerminalRenderer<O, E> {
    fn render(&mut self, transactions: &[Transaction], summary: &Summary) -> io::Result<()> {
        if transactions.is_empty() {
            writeln!(self.out, "No transactions yet.")?;
        } else {
            writeln!(
                self.out,
                "{:<4} {:<width$} {:>12}",
                "#",
                "DESCRIPTION",
                "AMOUNT",
                width = DESCRIPTION_WIDTH + 2
            )?;
            writeln!(self.out, "{}", "-".repeat(DESCRIPTION_WIDTH + 20))?;
            for (index, tx) in transactions.iter().enumerate() {
                let marker = if tx.is_inflow() { '+' } else { '-' };
                writeln!(
                    self.out,
                    "{:<4} {} {:<width$} {:>12}",
                    index,
                    marker,
                    truncate(tx.description(), DESCRIPTION_WIDTH),
                    format_amount(tx.amount(), &self.currency),
                    width = DESCRIPTION_WIDTH
                )?;
            }
            writeln!(self.out, "{}", "-".repeat(DESCRIPTION_WIDTH + 20))?;
        }
        self.render_summary(summary)
    }

    fn show_error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.err, "error: {}", message)?;
        self.err.flush()
    }

    fn clear_error(&mut self) -> io::Result<()> {
        // Lines already written to a terminal stay; nothing to clear
        Ok(())
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
