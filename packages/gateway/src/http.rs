// ABOUTME: reqwest-backed implementation of the RemoteGateway trait
// ABOUTME: Maps HTTP status codes onto the gateway error taxonomy per endpoint

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use opsdesk_models::{
    EnhancedOptions, ImpactAssessments, NewTicket, Pagination, ProblemSuggestions,
    ResolutionRecord, ScoredTicket, SolutionSuggestions, Ticket, TicketFilters, TicketPage,
    TicketUpdate,
};

use crate::api::{
    ApiErrorBody, CorrectiveActionsUpdate, EnhanceRequest, ImpactAnalysisUpdate,
    ImpactAssessmentRequest, ProblemStatementRequest, ProblemStatementUpdate, RootCauseUpdate,
    SessionStatus, SimilarTicketsRequest, SolutionsRequest,
};
use crate::error::{GatewayError, GatewayResult};
use crate::RemoteGateway;

const API_PREFIX: &str = "/api/v1";

/// HTTP client for the Opsdesk backend
#[derive(Clone)]
pub struct HttpGateway {
    http_client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGateway {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> GatewayResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Ok(HttpGateway {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Shared response handling: decode the body on success, map known
    /// statuses onto the error enum otherwise.
    async fn decode<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
        let status = response.status();
        match status {
            StatusCode::OK | StatusCode::CREATED => response
                .json::<T>()
                .await
                .map_err(|e| GatewayError::InvalidResponse(e.to_string())),
            StatusCode::UNAUTHORIZED => {
                Err(GatewayError::Unauthorized("Invalid or expired session".to_string()))
            }
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound(Self::error_message(response).await)),
            _ => Err(GatewayError::Http {
                status: status.as_u16(),
                message: Self::error_message(response).await,
            }),
        }
    }

    async fn error_message(response: Response) -> String {
        let status = response.status();
        match response.json::<ApiErrorBody>().await {
            Ok(body) => body.message.unwrap_or(body.error),
            Err(_) => status.to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        debug!(path, "gateway GET");
        let response = self.authorize(self.http_client.get(self.url(path))).send().await?;
        Self::decode(response).await
    }

    async fn post_json<B: serde::Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> GatewayResult<T> {
        debug!(path, "gateway POST");
        let response = self
            .authorize(self.http_client.post(self.url(path)))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn put_json<B: serde::Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> GatewayResult<T> {
        debug!(path, "gateway PUT");
        let response = self
            .authorize(self.http_client.put(self.url(path)))
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn get_ticket(&self, id: &str) -> GatewayResult<Ticket> {
        self.get_json(&format!("/tickets/{}", id)).await
    }

    async fn list_tickets(
        &self,
        filters: TicketFilters,
        page: Pagination,
    ) -> GatewayResult<TicketPage> {
        let response = self
            .authorize(self.http_client.get(self.url("/tickets")))
            .query(&filters)
            .query(&page)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create_ticket(&self, data: NewTicket) -> GatewayResult<Ticket> {
        self.post_json("/tickets", &data).await
    }

    async fn update_ticket(&self, id: &str, data: TicketUpdate) -> GatewayResult<Ticket> {
        debug!(id, "gateway PATCH /tickets");
        let response = self
            .authorize(self.http_client.patch(self.url(&format!("/tickets/{}", id))))
            .json(&data)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_ticket(&self, id: &str) -> GatewayResult<()> {
        let response = self
            .authorize(self.http_client.delete(self.url(&format!("/tickets/{}", id))))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            StatusCode::UNAUTHORIZED => {
                Err(GatewayError::Unauthorized("Invalid or expired session".to_string()))
            }
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound(format!("Ticket {} not found", id))),
            status => Err(GatewayError::Http {
                status: status.as_u16(),
                message: Self::error_message(response).await,
            }),
        }
    }

    async fn get_similar_tickets(&self, summary: &str) -> GatewayResult<Vec<ScoredTicket>> {
        self.post_json(
            "/tickets/similar",
            &SimilarTicketsRequest {
                summary: summary.to_string(),
            },
        )
        .await
    }

    async fn generate_problem_statement(
        &self,
        request: ProblemStatementRequest,
    ) -> GatewayResult<ProblemSuggestions> {
        self.post_json("/ai/problem-statement", &request).await
    }

    async fn generate_impact_assessment(
        &self,
        request: ImpactAssessmentRequest,
    ) -> GatewayResult<ImpactAssessments> {
        self.post_json("/ai/impact-assessment", &request).await
    }

    async fn generate_solutions(
        &self,
        request: SolutionsRequest,
    ) -> GatewayResult<SolutionSuggestions> {
        self.post_json("/ai/solutions", &request).await
    }

    async fn enhance_text(&self, request: EnhanceRequest) -> GatewayResult<EnhancedOptions> {
        self.post_json("/ai/enhance", &request).await
    }

    async fn get_resolution(&self, ticket_id: &str) -> GatewayResult<Option<ResolutionRecord>> {
        match self
            .get_json::<ResolutionRecord>(&format!("/tickets/{}/resolution", ticket_id))
            .await
        {
            Ok(record) => Ok(Some(record)),
            Err(GatewayError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn update_problem_statement(
        &self,
        ticket_id: &str,
        payload: ProblemStatementUpdate,
    ) -> GatewayResult<ResolutionRecord> {
        self.put_json(
            &format!("/tickets/{}/resolution/problem-statement", ticket_id),
            &payload,
        )
        .await
    }

    async fn update_impact_analysis(
        &self,
        ticket_id: &str,
        payload: ImpactAnalysisUpdate,
    ) -> GatewayResult<ResolutionRecord> {
        self.put_json(
            &format!("/tickets/{}/resolution/impact-analysis", ticket_id),
            &payload,
        )
        .await
    }

    async fn update_root_cause(
        &self,
        ticket_id: &str,
        payload: RootCauseUpdate,
    ) -> GatewayResult<ResolutionRecord> {
        self.put_json(&format!("/tickets/{}/resolution/root-cause", ticket_id), &payload)
            .await
    }

    async fn update_corrective_actions(
        &self,
        ticket_id: &str,
        payload: CorrectiveActionsUpdate,
    ) -> GatewayResult<ResolutionRecord> {
        self.put_json(
            &format!("/tickets/{}/resolution/corrective-actions", ticket_id),
            &payload,
        )
        .await
    }

    async fn session_status(&self) -> GatewayResult<SessionStatus> {
        self.get_json("/session/status").await
    }
}
