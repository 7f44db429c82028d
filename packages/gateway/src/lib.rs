// ABOUTME: Remote Data Gateway - typed operations against the Opsdesk backend
// ABOUTME: RemoteGateway trait definition plus the reqwest-backed HttpGateway

pub mod api;
pub mod error;
pub mod http;

use async_trait::async_trait;

use opsdesk_models::{
    EnhancedOptions, ImpactAssessments, NewTicket, Pagination, ProblemSuggestions,
    ResolutionRecord, ScoredTicket, SolutionSuggestions, Ticket, TicketFilters, TicketPage,
    TicketUpdate,
};

pub use api::{
    CorrectiveActionsUpdate, EnhanceRequest, ImpactAnalysisUpdate, ImpactAssessmentRequest,
    ProblemStatementRequest, ProblemStatementUpdate, RootCauseUpdate, SessionStatus,
    SolutionsRequest,
};
pub use error::{GatewayError, GatewayResult};
pub use http::HttpGateway;

/// Typed operations against the backend. Pure I/O; no business logic.
///
/// The workflow controller and session monitor depend on this trait rather
/// than the concrete HTTP client so tests can substitute a mock.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    // Ticket CRUD
    async fn get_ticket(&self, id: &str) -> GatewayResult<Ticket>;
    async fn list_tickets(
        &self,
        filters: TicketFilters,
        page: Pagination,
    ) -> GatewayResult<TicketPage>;
    async fn create_ticket(&self, data: NewTicket) -> GatewayResult<Ticket>;
    async fn update_ticket(&self, id: &str, data: TicketUpdate) -> GatewayResult<Ticket>;
    async fn delete_ticket(&self, id: &str) -> GatewayResult<()>;
    async fn get_similar_tickets(&self, summary: &str) -> GatewayResult<Vec<ScoredTicket>>;

    // AI suggestion endpoints
    async fn generate_problem_statement(
        &self,
        request: ProblemStatementRequest,
    ) -> GatewayResult<ProblemSuggestions>;
    async fn generate_impact_assessment(
        &self,
        request: ImpactAssessmentRequest,
    ) -> GatewayResult<ImpactAssessments>;
    async fn generate_solutions(
        &self,
        request: SolutionsRequest,
    ) -> GatewayResult<SolutionSuggestions>;
    async fn enhance_text(&self, request: EnhanceRequest) -> GatewayResult<EnhancedOptions>;

    // RCA resolution record
    /// Returns `None` when the ticket has no resolution record yet (404).
    async fn get_resolution(&self, ticket_id: &str) -> GatewayResult<Option<ResolutionRecord>>;
    async fn update_problem_statement(
        &self,
        ticket_id: &str,
        payload: ProblemStatementUpdate,
    ) -> GatewayResult<ResolutionRecord>;
    async fn update_impact_analysis(
        &self,
        ticket_id: &str,
        payload: ImpactAnalysisUpdate,
    ) -> GatewayResult<ResolutionRecord>;
    async fn update_root_cause(
        &self,
        ticket_id: &str,
        payload: RootCauseUpdate,
    ) -> GatewayResult<ResolutionRecord>;
    async fn update_corrective_actions(
        &self,
        ticket_id: &str,
        payload: CorrectiveActionsUpdate,
    ) -> GatewayResult<ResolutionRecord>;

    // Session
    async fn session_status(&self) -> GatewayResult<SessionStatus>;
}
