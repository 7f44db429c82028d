// ABOUTME: Integration tests for HttpGateway against a wiremock server
// ABOUTME: Covers status mapping, resolution 404 handling, and AI payload decoding

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{bearer_token, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use opsdesk_gateway::{
    EnhanceRequest, GatewayError, HttpGateway, ImpactAnalysisUpdate, ProblemStatementRequest,
    RemoteGateway,
};
use opsdesk_models::{Department, ImpactLevel, Pagination, TicketFilters};

fn gateway(server: &MockServer) -> HttpGateway {
    HttpGateway::new(server.uri(), Some("tok-123".to_string()), Duration::from_secs(5)).unwrap()
}

fn ticket_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "shortDescription": "Checkout failing",
        "description": "500s from the payment service",
        "category": "payments",
        "priority": "high",
        "status": "open",
        "sourceSystem": "servicedesk",
        "openedAt": "2026-08-01T09:30:00Z",
        "logEntries": ["ERR payment timeout"]
    })
}

#[tokio::test]
async fn get_ticket_decodes_and_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tickets/INC-1"))
        .and(bearer_token("tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_json("INC-1")))
        .mount(&server)
        .await;

    let ticket = gateway(&server).get_ticket("INC-1").await.unwrap();
    assert_eq!(ticket.id, "INC-1");
    assert_eq!(ticket.short_description, "Checkout failing");
    assert_eq!(ticket.log_entries, vec!["ERR payment timeout"]);
}

#[tokio::test]
async fn list_tickets_passes_filters_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tickets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tickets": [ticket_json("INC-1"), ticket_json("INC-2")],
            "page": 1,
            "perPage": 25,
            "total": 2
        })))
        .mount(&server)
        .await;

    let page = gateway(&server)
        .list_tickets(TicketFilters::default(), Pagination::default())
        .await
        .unwrap();
    assert_eq!(page.tickets.len(), 2);
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn unauthorized_maps_to_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/session/status"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = gateway(&server).session_status().await.unwrap_err();
    assert!(err.is_auth_failure(), "expected Unauthorized, got {err:?}");
}

#[tokio::test]
async fn missing_resolution_is_none_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tickets/INC-9/resolution"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "not_found",
            "message": "No resolution for INC-9"
        })))
        .mount(&server)
        .await;

    let resolution = gateway(&server).get_resolution("INC-9").await.unwrap();
    assert!(resolution.is_none());
}

#[tokio::test]
async fn update_impact_analysis_round_trips_record() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/tickets/INC-1/resolution/impact-analysis"))
        .and(body_partial_json(json!({
            "department": "ItOperations",
            "impacts": ["Orders lost"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ticketId": "INC-1",
            "impactAnalysis": {
                "impactLevel": "Sev3Normal",
                "department": "ItOperations",
                "impacts": ["Orders lost"],
                "completed": true
            },
            "updatedAt": "2026-08-01T10:00:00Z"
        })))
        .mount(&server)
        .await;

    let record = gateway(&server)
        .update_impact_analysis(
            "INC-1",
            ImpactAnalysisUpdate {
                impact_level: ImpactLevel::Sev3Normal,
                department: Department::ItOperations,
                impacts: vec!["Orders lost".to_string()],
            },
        )
        .await
        .unwrap();
    assert!(record.step_completed(1));
    assert_eq!(record.step_text(1).as_deref(), Some("Orders lost"));
}

#[tokio::test]
async fn problem_statement_generation_decodes_suggestions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/ai/problem-statement"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "definitions": ["Payment service errors block checkout", "Checkout unavailable"],
            "question": "Which regions are affected?",
            "issueType": "incident",
            "severity": "High",
            "businessImpact": "Revenue loss during outage"
        })))
        .mount(&server)
        .await;

    let suggestions = gateway(&server)
        .generate_problem_statement(ProblemStatementRequest {
            short_description: "Checkout failing".to_string(),
            description: None,
            category: None,
            log_entries: vec![],
        })
        .await
        .unwrap();
    assert_eq!(suggestions.definitions.len(), 2);
    assert_eq!(suggestions.severity.as_deref(), Some("High"));
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/ai/enhance"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .enhance_text(EnhanceRequest {
            text: "root cause text".to_string(),
            reference: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::InvalidResponse(_)));
}

#[tokio::test]
async fn server_error_carries_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/tickets/INC-1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "internal",
            "message": "database unavailable"
        })))
        .mount(&server)
        .await;

    let err = gateway(&server).delete_ticket("INC-1").await.unwrap_err();
    match err {
        GatewayError::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}
