// ABOUTME: Opsdesk CLI entry point
// ABOUTME: Command dispatch, config loading, gateway construction, and logging setup

use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;

use opsdesk_config::{constants, Config};
use opsdesk_gateway::HttpGateway;
use opsdesk_session::{CredentialStore, FileCredentialStore};

mod auth;
mod rca;
mod tickets;

use auth::AuthCommands;
use tickets::TicketsCommands;

#[derive(Parser)]
#[command(name = "opsdesk")]
#[command(about = "Opsdesk - incident console with an AI-assisted RCA wizard")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and manage tickets
    #[command(subcommand)]
    Tickets(TicketsCommands),
    /// Run the guided root cause analysis wizard for a ticket
    Rca {
        /// Ticket ID to analyze
        ticket_id: String,
    },
    /// Manage the local session
    #[command(subcommand)]
    Auth(AuthCommands),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(constants::OPSDESK_LOG)
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let store = Arc::new(FileCredentialStore::open_default()?);
    // An explicit env token wins over the cached session artifact.
    let token = config.api_token.clone().or_else(|| store.token());
    let gateway = Arc::new(HttpGateway::new(
        config.api_url.clone(),
        token,
        Duration::from_secs(config.http_timeout_secs),
    )?);

    match cli.command {
        Commands::Tickets(command) => tickets::handle(command, gateway).await,
        Commands::Rca { ticket_id } => rca::run(&ticket_id, gateway, store, &config).await,
        Commands::Auth(command) => auth::handle(command, store),
    }
}
