// ABOUTME: RCA resolution record - the backend's durable snapshot of wizard progress
// ABOUTME: Per-step sections with completion flags, plus step-indexed accessors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::categories::{Department, ImpactLevel, IssueType, Severity};

/// One corrective action within a resolution plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionStep {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible: Option<String>,
}

/// Step 1: problem definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemStatementSection {
    pub definition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    pub issue_type: IssueType,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_impact: Option<String>,
    pub completed: bool,
}

/// Step 2: impact assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactSection {
    pub impact_level: ImpactLevel,
    pub department: Department,
    pub impacts: Vec<String>,
    pub completed: bool,
}

/// Step 3: root cause analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootCauseSection {
    pub analysis: String,
    #[serde(default)]
    pub supporting_evidence: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    pub completed: bool,
}

/// Step 4: corrective action plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectiveActionsSection {
    pub title: String,
    pub steps: Vec<ActionStep>,
    pub completed: bool,
}

/// The backend's durable, authoritative snapshot of RCA progress for a
/// ticket. Steps the user (or AI) has not reached yet are absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionRecord {
    pub ticket_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_statement: Option<ProblemStatementSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_analysis: Option<ImpactSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_cause: Option<RootCauseSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrective_actions: Option<CorrectiveActionsSection>,
    pub updated_at: DateTime<Utc>,
}

impl ResolutionRecord {
    pub fn empty(ticket_id: impl Into<String>) -> Self {
        ResolutionRecord {
            ticket_id: ticket_id.into(),
            problem_statement: None,
            impact_analysis: None,
            root_cause: None,
            corrective_actions: None,
            updated_at: Utc::now(),
        }
    }

    /// Whether the backend marks the given 0-based step as completed.
    pub fn step_completed(&self, step_index: usize) -> bool {
        match step_index {
            0 => self.problem_statement.as_ref().is_some_and(|s| s.completed),
            1 => self.impact_analysis.as_ref().is_some_and(|s| s.completed),
            2 => self.root_cause.as_ref().is_some_and(|s| s.completed),
            3 => self.corrective_actions.as_ref().is_some_and(|s| s.completed),
            _ => false,
        }
    }

    /// Free-text rendering of a completed step's content, used to hydrate
    /// the wizard's answer buffers. List-shaped steps are joined line-wise.
    pub fn step_text(&self, step_index: usize) -> Option<String> {
        match step_index {
            0 => self
                .problem_statement
                .as_ref()
                .filter(|s| s.completed)
                .map(|s| s.definition.clone()),
            1 => self
                .impact_analysis
                .as_ref()
                .filter(|s| s.completed)
                .map(|s| s.impacts.join("\n")),
            2 => self
                .root_cause
                .as_ref()
                .filter(|s| s.completed)
                .map(|s| s.analysis.clone()),
            3 => self.corrective_actions.as_ref().filter(|s| s.completed).map(|s| {
                s.steps
                    .iter()
                    .enumerate()
                    .map(|(i, step)| format!("{}. {}: {}", i + 1, step.title, step.description))
                    .collect::<Vec<_>>()
                    .join("\n")
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_two_steps() -> ResolutionRecord {
        ResolutionRecord {
            ticket_id: "INC-42".to_string(),
            problem_statement: Some(ProblemStatementSection {
                definition: "Checkout fails for EU users".to_string(),
                question: None,
                issue_type: IssueType::Incident,
                severity: Severity::High,
                business_impact: None,
                completed: true,
            }),
            impact_analysis: Some(ImpactSection {
                impact_level: ImpactLevel::Sev2Major,
                department: Department::Engineering,
                impacts: vec!["Lost orders".to_string(), "Support backlog".to_string()],
                completed: true,
            }),
            root_cause: Some(RootCauseSection {
                analysis: String::new(),
                supporting_evidence: vec![],
                confidence: None,
                completed: false,
            }),
            corrective_actions: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_step_completed() {
        let record = record_with_two_steps();
        assert!(record.step_completed(0));
        assert!(record.step_completed(1));
        assert!(!record.step_completed(2));
        assert!(!record.step_completed(3));
    }

    #[test]
    fn test_step_text_joins_lists() {
        let record = record_with_two_steps();
        assert_eq!(
            record.step_text(0).as_deref(),
            Some("Checkout fails for EU users")
        );
        assert_eq!(
            record.step_text(1).as_deref(),
            Some("Lost orders\nSupport backlog")
        );
        // Incomplete steps hydrate nothing.
        assert_eq!(record.step_text(2), None);
    }

    #[test]
    fn test_action_steps_render_numbered() {
        let mut record = ResolutionRecord::empty("INC-7");
        record.corrective_actions = Some(CorrectiveActionsSection {
            title: "Recovery plan".to_string(),
            steps: vec![
                ActionStep {
                    title: "Restart service".to_string(),
                    description: "Restarts the affected service".to_string(),
                    responsible: None,
                },
                ActionStep {
                    title: "Notify team".to_string(),
                    description: "Sends an alert".to_string(),
                    responsible: Some("On-call".to_string()),
                },
            ],
            completed: true,
        });

        assert_eq!(
            record.step_text(3).as_deref(),
            Some("1. Restart service: Restarts the affected service\n2. Notify team: Sends an alert")
        );
    }
}
