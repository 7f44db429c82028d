// ABOUTME: Ticket type definitions
// ABOUTME: Structures for tickets, filters, pagination, and similarity search results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Critical,
}

/// A support ticket as owned by the backend. Immutable from the wizard's
/// perspective except through explicit update calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub short_description: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    /// Tag identifying the system the ticket originated from.
    pub source_system: Option<String>,
    pub opened_at: DateTime<Utc>,
    /// Raw log entries attached to the ticket, newest last.
    #[serde(default)]
    pub log_entries: Vec<String>,
}

impl Ticket {
    /// One-line summary used for similarity search and AI prompts.
    pub fn summary(&self) -> String {
        match &self.description {
            Some(desc) if !desc.trim().is_empty() => {
                format!("{}: {}", self.short_description, desc.trim())
            }
            _ => self.short_description.clone(),
        }
    }
}

/// Payload for creating a ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub short_description: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: TicketPriority,
    pub source_system: Option<String>,
}

/// Partial update for an existing ticket; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
}

/// Server-side list filters
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page: 1,
            per_page: 25,
        }
    }
}

/// One page of tickets from the list endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPage {
    pub tickets: Vec<Ticket>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

/// Ticket with a backend-computed similarity score in [0, 1]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredTicket {
    pub score: f32,
    pub ticket: Ticket,
}
