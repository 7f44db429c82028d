// ABOUTME: Ticket browsing and management commands
// ABOUTME: List, show, create, delete, and similarity search over the gateway

use std::sync::Arc;

use clap::Subcommand;
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use inquire::{Confirm, Select, Text};

use opsdesk_gateway::RemoteGateway;
use opsdesk_models::{NewTicket, Pagination, TicketFilters, TicketPriority, TicketStatus};

#[derive(Subcommand)]
pub enum TicketsCommands {
    /// List tickets
    List {
        /// Filter by status (open, in-progress, resolved, closed, cancelled)
        #[arg(long)]
        status: Option<String>,
        /// Free-text search
        #[arg(long)]
        search: Option<String>,
        /// Page number
        #[arg(long, default_value = "1")]
        page: u32,
    },
    /// Show ticket details
    Show {
        /// Ticket ID to show
        id: String,
    },
    /// Create a new ticket
    Create,
    /// Delete a ticket
    Delete {
        /// Ticket ID to delete
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Find tickets similar to an existing one
    Similar {
        /// Ticket ID to compare against
        id: String,
    },
}

pub async fn handle(
    command: TicketsCommands,
    gateway: Arc<dyn RemoteGateway>,
) -> anyhow::Result<()> {
    match command {
        TicketsCommands::List { status, search, page } => {
            list_tickets(gateway, status, search, page).await
        }
        TicketsCommands::Show { id } => show_ticket(gateway, &id).await,
        TicketsCommands::Create => create_ticket(gateway).await,
        TicketsCommands::Delete { id, yes } => delete_ticket(gateway, &id, yes).await,
        TicketsCommands::Similar { id } => similar_tickets(gateway, &id).await,
    }
}

fn parse_status(raw: &str) -> anyhow::Result<TicketStatus> {
    match raw.to_lowercase().as_str() {
        "open" => Ok(TicketStatus::Open),
        "in-progress" | "in_progress" => Ok(TicketStatus::InProgress),
        "resolved" => Ok(TicketStatus::Resolved),
        "closed" => Ok(TicketStatus::Closed),
        "cancelled" => Ok(TicketStatus::Cancelled),
        _ => Err(anyhow::anyhow!("unknown status: {raw}")),
    }
}

async fn list_tickets(
    gateway: Arc<dyn RemoteGateway>,
    status: Option<String>,
    search: Option<String>,
    page: u32,
) -> anyhow::Result<()> {
    let filters = TicketFilters {
        status: status.as_deref().map(parse_status).transpose()?,
        search,
        ..Default::default()
    };
    let result = gateway
        .list_tickets(filters, Pagination { page, per_page: 25 })
        .await?;

    if result.tickets.is_empty() {
        println!("{}", "No tickets found".yellow());
        return Ok(());
    }

    println!("{}", "Opsdesk Tickets".blue().bold());
    println!();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Summary", "Priority", "Status", "Source", "Opened"]);

    for ticket in &result.tickets {
        table.add_row(vec![
            ticket.id.clone(),
            truncate(&ticket.short_description, 40),
            priority_text(&ticket.priority).to_string(),
            status_text(&ticket.status).to_string(),
            ticket.source_system.clone().unwrap_or_else(|| "—".to_string()),
            ticket.opened_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    println!("{table}");
    println!(
        "{}",
        format!("Page {} of {} tickets total", result.page, result.total).dimmed()
    );
    Ok(())
}

async fn show_ticket(gateway: Arc<dyn RemoteGateway>, id: &str) -> anyhow::Result<()> {
    let ticket = gateway.get_ticket(id).await?;

    println!("{} {}", ticket.id.blue().bold(), ticket.short_description.bold());
    println!("Status:   {}", status_text(&ticket.status));
    println!("Priority: {}", priority_text(&ticket.priority));
    if let Some(category) = &ticket.category {
        println!("Category: {}", category);
    }
    if let Some(source) = &ticket.source_system {
        println!("Source:   {}", source);
    }
    println!("Opened:   {}", ticket.opened_at.to_rfc3339());
    if let Some(description) = &ticket.description {
        println!();
        println!("{}", description);
    }
    if !ticket.log_entries.is_empty() {
        println!();
        println!("{}", "Log entries:".bold());
        for entry in &ticket.log_entries {
            println!("  {}", entry.dimmed());
        }
    }

    match gateway.get_resolution(id).await? {
        Some(record) => {
            println!();
            println!("{}", "RCA progress:".bold());
            for (i, name) in ["Problem Definition", "Impact Assessment", "Root Cause", "Corrective Actions"]
                .iter()
                .enumerate()
            {
                let mark = if record.step_completed(i) {
                    "✓".green()
                } else {
                    "○".dimmed()
                };
                println!("  {} {}", mark, name);
            }
        }
        None => {
            println!();
            println!("{}", "No RCA started. Run 'opsdesk rca <id>' to begin.".dimmed());
        }
    }
    Ok(())
}

async fn create_ticket(gateway: Arc<dyn RemoteGateway>) -> anyhow::Result<()> {
    let short_description = Text::new("Short description:").prompt()?;
    let description = Text::new("Details (optional):").prompt()?;
    let priority = Select::new("Priority:", vec!["low", "medium", "high", "critical"]).prompt()?;

    let priority = match priority {
        "low" => TicketPriority::Low,
        "high" => TicketPriority::High,
        "critical" => TicketPriority::Critical,
        _ => TicketPriority::Medium,
    };

    let ticket = gateway
        .create_ticket(NewTicket {
            short_description,
            description: if description.trim().is_empty() {
                None
            } else {
                Some(description)
            },
            category: None,
            priority,
            source_system: Some("opsdesk-cli".to_string()),
        })
        .await?;

    println!("{} {}", "Created".green(), ticket.id.bold());
    Ok(())
}

async fn delete_ticket(gateway: Arc<dyn RemoteGateway>, id: &str, yes: bool) -> anyhow::Result<()> {
    if !yes {
        let confirmed = Confirm::new(&format!("Delete ticket {id}?"))
            .with_default(false)
            .prompt()?;
        if !confirmed {
            println!("{}", "Cancelled".yellow());
            return Ok(());
        }
    }

    gateway.delete_ticket(id).await?;
    println!("{} {}", "Deleted".green(), id);
    Ok(())
}

async fn similar_tickets(gateway: Arc<dyn RemoteGateway>, id: &str) -> anyhow::Result<()> {
    let ticket = gateway.get_ticket(id).await?;
    let similar = gateway.get_similar_tickets(&ticket.summary()).await?;

    if similar.is_empty() {
        println!("{}", "No similar tickets found".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Score", "ID", "Summary", "Status"]);

    for scored in &similar {
        table.add_row(vec![
            format!("{:.0}%", scored.score * 100.0),
            scored.ticket.id.clone(),
            truncate(&scored.ticket.short_description, 40),
            status_text(&scored.ticket.status).to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

pub fn status_text(status: &TicketStatus) -> &'static str {
    match status {
        TicketStatus::Open => "Open",
        TicketStatus::InProgress => "In Progress",
        TicketStatus::Resolved => "Resolved",
        TicketStatus::Closed => "Closed",
        TicketStatus::Cancelled => "Cancelled",
    }
}

pub fn priority_text(priority: &TicketPriority) -> &'static str {
    match priority {
        TicketPriority::Low => "Low",
        TicketPriority::Medium => "Medium",
        TicketPriority::High => "High",
        TicketPriority::Critical => "Critical",
    }
}

pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
