// ABOUTME: Local session management commands
// ABOUTME: Store, inspect, and clear the cached API session token

use std::sync::Arc;

use clap::Subcommand;
use colored::*;
use inquire::Password;

use opsdesk_session::{CredentialStore, FileCredentialStore};

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Store an API session token locally
    Login {
        /// Token value; prompted for when omitted
        #[arg(long)]
        token: Option<String>,
    },
    /// Clear all local session artifacts
    Logout,
    /// Show local session state
    Status,
}

pub fn handle(command: AuthCommands, store: Arc<FileCredentialStore>) -> anyhow::Result<()> {
    match command {
        AuthCommands::Login { token } => {
            let token = match token {
                Some(token) => token,
                None => Password::new("API token:").without_confirmation().prompt()?,
            };
            store.store_token(token.trim())?;
            println!("{}", "Session token stored".green());
            Ok(())
        }
        AuthCommands::Logout => {
            store.clear_all()?;
            println!("{}", "Signed out; local session artifacts cleared".green());
            Ok(())
        }
        AuthCommands::Status => {
            if store.has_credentials() {
                println!("{}", "Local session present".green());
                if let Some(at) = store.last_validation() {
                    println!("Last validated: {}", at.to_rfc3339().dimmed());
                }
            } else {
                println!("{}", "No local session".yellow());
                println!("{}", "Use 'opsdesk auth login' to store a token".dimmed());
            }
            Ok(())
        }
    }
}
