use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cashbook::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.run().await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Log to stderr so table output on stdout stays clean.
/// `RUST_LOG` directives take precedence over the default level.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "cashbook=debug" } else { "cashbook=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
