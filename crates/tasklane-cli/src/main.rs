//! tasklane - command-line client for the task API.
//!
//! A thin front end over `tasklane-http`: it keeps the session in a file,
//! runs one API call per command and prints the outcome.

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{auth, task};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let client = session::open_client(&cli.api, cli.session_file.as_deref())?;
    let mut events = client.subscribe();

    let result = match cli.command {
        Commands::Auth(cmd) => auth::handle(cmd, &client).await,
        Commands::Task(cmd) => task::handle(cmd, &client).await,
    };

    if result.is_err() && session::was_invalidated(&mut events) {
        output::error("Your session has ended. Run 'tasklane auth login' to sign in again.");
    }

    result
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
