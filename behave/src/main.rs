//! # Behave CLI Entry Point
//!
//! The main executable for the Behave tool. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and installs the
//!    log subscriber (filtered through `RUST_LOG`, written to stderr).
//! 2. **Configuration**: Builds the `behave_core` client once from the URL and token.
//! 3. **Execution**: Delegates the command to [`commands::execute`].
//! 4. **Presentation**: Prints the resulting data to standard output, or the error to
//!    standard error with a non-zero exit code.
mod cli;
mod commands;
mod formatter;

use behave_core::{BehaveClient, ClientConfig};
use clap::Parser;
use cli::Cli;
use formatter::FormattedString;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::new(args.token).with_base_url(args.url);

    let client = match BehaveClient::new(&config) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    };

    tracing::debug!(base_url = %config.base_url, "client ready");

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = commands::execute(&client, args.command, &mut stdout).await {
        eprintln!("{}", FormattedString::from(err));
        process::exit(1);
    }
}
