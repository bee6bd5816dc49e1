mod render;
mod shell;

use std::fs::File;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{AppError, LedgerService, NullRenderer, Renderer};
use crate::domain::DEFAULT_CURRENCY;
use crate::io::Exporter;
use crate::storage::{MemoryStore, SqliteStore, Store};

pub use render::TerminalRenderer;
pub use shell::{parse_line, run_shell, ShellCommand};

/// Cashbook - Personal Income and Expense Ledger
#[derive(Parser)]
#[command(name = "cashbook")]
#[command(about = "A local-first ledger of income and expenses")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, env = "CASHBOOK_DATABASE", default_value = "cashbook.db")]
    pub database: String,

    /// Currency prefix used when displaying amounts
    #[arg(short, long, env = "CASHBOOK_CURRENCY", default_value = DEFAULT_CURRENCY)]
    pub currency: String,

    /// Keep everything in memory instead of a database file
    #[arg(long, global = true)]
    pub memory: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a transaction (negative amount = expense)
    Add {
        /// What the money was for
        description: String,

        /// Amount (e.g., "1000", "-42.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Remove a transaction by its position in `list`
    #[command(alias = "rm")]
    Remove {
        /// Position shown in the first column of `list`
        index: usize,
    },

    /// List all transactions with totals
    #[command(alias = "ls")]
    List,

    /// Show income, expense and balance
    Summary,

    /// Delete all stored transactions
    Reset,

    /// Verify the stored data
    Check,

    /// Export transactions to JSON or CSV
    Export {
        /// Format: json, csv
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Interactive session reading one command per line
    Shell,
}

impl Cli {
    /// Run the selected command. Returns `false` when the command was
    /// rejected because of bad input, which has already been reported.
    pub async fn run(self) -> Result<bool> {
        if self.memory {
            self.dispatch(MemoryStore::new()).await
        } else {
            let store = SqliteStore::open(&self.database)
                .await
                .with_context(|| format!("Failed to open database '{}'", self.database))?;
            self.dispatch(store).await
        }
    }

    async fn dispatch<S: Store>(self, store: S) -> Result<bool> {
        let renderer = TerminalRenderer::stdio(self.currency.clone());

        match self.command {
            Commands::Add {
                description,
                amount,
            } => {
                let mut service = LedgerService::open(store, renderer).await?;
                accepted(service.add(&description, &amount).await)
            }

            Commands::Remove { index } => {
                let mut service = LedgerService::open(store, renderer).await?;
                accepted(service.remove_at(index).await)
            }

            Commands::List => {
                let mut service = LedgerService::open(store, renderer).await?;
                service.refresh()?;
                Ok(true)
            }

            Commands::Summary => {
                let mut service = LedgerService::open(store, renderer).await?;
                let summary = service.summary();
                service.renderer_mut().render_summary(&summary)?;
                Ok(true)
            }

            Commands::Reset => {
                let service = LedgerService::open(store, NullRenderer).await?;
                let count = service.list().len();
                service.reset().await?;
                println!("Removed {} stored transaction(s).", count);
                Ok(true)
            }

            Commands::Check => {
                let service = LedgerService::open(store, NullRenderer).await?;
                run_check_command(&service).await
            }

            Commands::Export { format, output } => {
                let service = LedgerService::open(store, NullRenderer).await?;
                run_export_command(&service, &format, output.as_deref())?;
                Ok(true)
            }

            Commands::Shell => {
                let mut service = LedgerService::open(store, renderer).await?;
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                run_shell(&mut service, stdin, io::stdout(), &self.currency).await?;
                Ok(true)
            }
        }
    }
}

/// Map a service result to "accepted or not", keeping real failures as errors.
fn accepted<T>(result: Result<T, AppError>) -> Result<bool> {
    match result {
        Ok(_) => Ok(true),
        Err(err) if err.is_user_error() => Ok(false),
        Err(err) => Err(err.into()),
    }
}

async fn run_check_command<S: Store, R: Renderer>(service: &LedgerService<S, R>) -> Result<bool> {
    println!("Checking stored transactions...\n");

    let report = service.check().await?;

    println!("Transactions: {}", report.transaction_count);
    println!("Income:       {:.2}", report.summary.income);
    println!("Expense:      {:.2}", report.summary.expense);
    println!("Balance:      {:.2}", report.summary.balance);
    println!();

    let issues = report.issues();
    if issues.is_empty() {
        println!("Stored data is consistent.");
    } else {
        println!("Issues found:");
        for issue in &issues {
            println!("  - {}", issue);
        }
    }

    Ok(report.is_consistent())
}

fn run_export_command<S: Store, R: Renderer>(
    service: &LedgerService<S, R>,
    format: &str,
    output: Option<&str>,
) -> Result<()> {
    let exporter = Exporter::new(service.ledger());

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create '{}'", path))?,
        ),
        None => Box::new(io::stdout()),
    };

    let count = match format {
        "json" => exporter.export_json(writer)?,
        "csv" => exporter.export_csv(writer)?,
        other => anyhow::bail!("Unknown export format '{}'. Valid formats: json, csv", other),
    };

    if let Some(path) = output {
        eprintln!("Exported {} transaction(s) to {}", count, path);
    }
    Ok(())
}
