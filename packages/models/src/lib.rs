// ABOUTME: Domain types shared across Opsdesk packages
// ABOUTME: Tickets, RCA resolution records, AI suggestion payloads, and category option sets

pub mod categories;
pub mod resolution;
pub mod suggestions;
pub mod ticket;

pub use categories::{Department, ImpactLevel, IssueType, Severity};
pub use resolution::{
    ActionStep, CorrectiveActionsSection, ImpactSection, ProblemStatementSection,
    ResolutionRecord, RootCauseSection,
};
pub use suggestions::{
    EnhancedOption, EnhancedOptions, ImpactAssessment, ImpactAssessments, ProblemSuggestions,
    Solution, SolutionStep, SolutionSuggestions,
};
pub use ticket::{
    NewTicket, Pagination, ScoredTicket, Ticket, TicketFilters, TicketPage, TicketPriority,
    TicketStatus, TicketUpdate,
};
