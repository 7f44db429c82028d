// ABOUTME: API request and response models for the Opsdesk backend
// ABOUTME: Step update payloads, AI generation requests, and session status

use serde::{Deserialize, Serialize};

use opsdesk_models::{ActionStep, Department, ImpactLevel, IssueType, Severity};

/// Similar-ticket search request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarTicketsRequest {
    pub summary: String,
}

/// Problem-statement generation request, built from ticket fields
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemStatementRequest {
    pub short_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub log_entries: Vec<String>,
}

/// Impact-assessment generation request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAssessmentRequest {
    pub problem_statement: String,
}

/// Solution generation request carrying the full analysis context so far
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionsRequest {
    pub ticket_summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_statement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_cause: Option<String>,
}

/// Text enhancement request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceRequest {
    pub text: String,
    /// Surrounding context the rewrite should stay faithful to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Step 1 persistence payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemStatementUpdate {
    pub definition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    pub issue_type: IssueType,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_impact: Option<String>,
}

/// Step 2 persistence payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnalysisUpdate {
    pub impact_level: ImpactLevel,
    pub department: Department,
    pub impacts: Vec<String>,
}

/// Step 3 persistence payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootCauseUpdate {
    pub analysis: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub supporting_evidence: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// Step 4 persistence payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectiveActionsUpdate {
    pub title: String,
    pub steps: Vec<ActionStep>,
}

/// Backend session status
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub valid: bool,
    /// Explicit revocation flag; authoritative even when `valid` is true.
    #[serde(default)]
    pub revoked: bool,
}

impl SessionStatus {
    pub fn is_active(&self) -> bool {
        self.valid && !self.revoked
    }
}

/// Standard API error body
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default)]
    pub message: Option<String>,
}
