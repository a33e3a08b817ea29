mod cli;
mod commands;
mod error;
mod output;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stockly_api::{InventoryClient, TransportConfig};
use stockly_config::Config;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Completions don't need a client
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "stockly", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let (client, page_size) = build_client(&cli.global)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, client, page_size, &cli.global).await
        }
    }
}

/// Build the API client from the config file merged with CLI overrides.
fn build_client(global: &GlobalOpts) -> Result<(InventoryClient, u32), CliError> {
    let config = match &global.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let url = global.server.clone().unwrap_or(config.server.url);
    let timeout = global.timeout.unwrap_or(config.server.timeout);
    let page_size = global.page_size.unwrap_or(config.page_size);

    if page_size == 0 {
        return Err(CliError::Validation {
            field: "page-size".into(),
            reason: "must be at least 1".into(),
        });
    }

    let transport = TransportConfig {
        timeout: Duration::from_secs(timeout),
    };
    let client = InventoryClient::new(&url, &transport).map_err(|e| CliError::Config {
        reason: e.to_string(),
    })?;

    Ok((client, page_size))
}
