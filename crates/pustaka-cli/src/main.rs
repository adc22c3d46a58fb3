//! pustaka - CLI storefront for the pustaka bookstore API.
//!
//! This is a thin wrapper over the `pustaka` library: it plays the role
//! of the view pages (catalog browsing, login/register, checkout,
//! transaction history) on top of the shared session context.

mod cli;
mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let api = cli.api.as_deref();

    match cli.command {
        Commands::Auth(cmd) => commands::auth::handle(cmd, api).await,
        Commands::Books(cmd) => commands::books::handle(cmd, api).await,
        Commands::Tx(cmd) => commands::tx::handle(cmd, api).await,
    }
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
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
