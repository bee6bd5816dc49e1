use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::application::{AppError, LedgerService, Renderer};
use crate::domain::format_amount;
use crate::storage::Store;

const PROMPT: &str = "> ";

const HELP: &str = "\
Commands:
  add <description...> <amount>   Record a transaction (negative amount = expense)
  rm <index>                      Remove the transaction at <index>
  list                            Show all transactions and totals
  summary                         Show income, expense and balance
  help                            Show this help
  quit                            Leave the shell";

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add { description: String, amount: String },
    Remove(usize),
    List,
    Summary,
    Help,
    Quit,
    Empty,
}

/// Parse a line of shell input.
/// For `add`, the last word is the amount and everything before it is the
/// description; missing parts are left empty for the ledger to reject.
pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(ShellCommand::Empty);
    };
    let rest: Vec<&str> = words.collect();

    match command.to_lowercase().as_str() {
        "add" | "a" => {
            let (amount, description) = match rest.split_last() {
                Some((amount, description)) => (amount.to_string(), description.join(" ")),
                None => (String::new(), String::new()),
            };
            Ok(ShellCommand::Add {
                description,
                amount,
            })
        }
        "rm" | "remove" | "delete" => match rest.as_slice() {
            [index] => index
                .parse()
                .map(ShellCommand::Remove)
                .map_err(|_| format!("'{}' is not a valid position", index)),
            _ => Err("Usage: rm <index>".to_string()),
        },
        "list" | "ls" => Ok(ShellCommand::List),
        "summary" | "sum" => Ok(ShellCommand::Summary),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!("Unknown command '{}'. Type 'help' for a list.", other)),
    }
}

/// Run the interactive loop until `quit` or end of input.
///
/// Each line is handled to completion before the next one is read, so
/// positions shown by the last render stay valid for `rm`.
pub async fn run_shell<S, R, I, W>(
    service: &mut LedgerService<S, R>,
    input: I,
    mut out: W,
    currency: &str,
) -> Result<()>
where
    S: Store,
    R: Renderer,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    service.refresh()?;

    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(message) => {
                service.renderer_mut().show_error(&message)?;
                continue;
            }
        };

        let outcome = match command {
            ShellCommand::Add {
                description,
                amount,
            } => service.add(&description, &amount).await.map(|_| ()),
            ShellCommand::Remove(index) => service.remove_at(index).await.map(|_| ()),
            ShellCommand::List => service.refresh(),
            ShellCommand::Summary => {
                let summary = service.summary();
                writeln!(out, "Income:  {}", format_amount(summary.income, currency))?;
                writeln!(out, "Expense: {}", format_amount(summary.expense, currency))?;
                writeln!(out, "Balance: {}", format_amount(summary.balance, currency))?;
                Ok(())
            }
            ShellCommand::Help => {
                writeln!(out, "{}", HELP)?;
                Ok(())
            }
            ShellCommand::Quit => break,
            ShellCommand::Empty => Ok(()),
        };

        match outcome {
            Ok(()) => {}
            // Already shown in the error area
            Err(err) if err.is_user_error() => {}
            Err(AppError::Storage(err)) => return Err(err),
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
