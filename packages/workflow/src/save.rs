// ABOUTME: Translation from generic step answers into step-specific backend payloads
// ABOUTME: Includes the best-effort free-text parser for corrective action plans

use opsdesk_gateway::{
    CorrectiveActionsUpdate, ImpactAnalysisUpdate, ProblemStatementUpdate, RootCauseUpdate,
};
use opsdesk_models::ActionStep;

use crate::state::StepMetadata;

pub fn build_problem_statement_update(
    answer: &str,
    meta: &StepMetadata,
) -> ProblemStatementUpdate {
    ProblemStatementUpdate {
        definition: answer.trim().to_string(),
        question: meta.question.clone(),
        issue_type: meta.issue_type.unwrap_or_default(),
        severity: meta.severity.unwrap_or_default(),
        business_impact: meta.business_impact.clone(),
    }
}

/// Missing classification never blocks the save: impact level and
/// department fall back to their documented defaults.
pub fn build_impact_analysis_update(answer: &str, meta: &StepMetadata) -> ImpactAnalysisUpdate {
    let impacts: Vec<String> = answer
        .lines()
        .map(|line| line.trim().trim_start_matches(['-', '*', '•']).trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    ImpactAnalysisUpdate {
        impact_level: meta.impact_level.unwrap_or_default(),
        department: meta.department.unwrap_or_default(),
        impacts,
    }
}

pub fn build_root_cause_update(answer: &str, meta: &StepMetadata) -> RootCauseUpdate {
    RootCauseUpdate {
        analysis: answer.trim().to_string(),
        supporting_evidence: meta.supporting_evidence.clone(),
        confidence: meta.confidence,
    }
}

/// Prefers the structured plan captured from a selected AI solution; falls
/// back to parsing the free-text answer.
pub fn build_corrective_actions_update(
    answer: &str,
    meta: &StepMetadata,
) -> CorrectiveActionsUpdate {
    let steps = if meta.plan_steps.is_empty() {
        parse_action_steps(answer)
    } else {
        meta.plan_steps.clone()
    };

    CorrectiveActionsUpdate {
        title: meta
            .plan_title
            .clone()
            .unwrap_or_else(|| "Corrective action plan".to_string()),
        steps,
    }
}

/// Best-effort parse of a corrective-actions answer.
///
/// Lines of the form `"<number>. <title>"` (optionally `"<number>. <title>:
/// <description>"`) start a new step; subsequent non-numbered, non-bulleted
/// lines accumulate into that step's description. When no numbered lines
/// exist the whole text becomes a single synthetic step.
pub fn parse_action_steps(text: &str) -> Vec<ActionStep> {
    let mut steps: Vec<ActionStep> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(rest) = strip_number_prefix(trimmed) {
            let (title, description) = match rest.split_once(':') {
                Some((title, desc)) => (title.trim().to_string(), desc.trim().to_string()),
                None => (rest.trim().to_string(), String::new()),
            };
            steps.push(ActionStep {
                title,
                description,
                responsible: None,
            });
        } else if trimmed.starts_with(['-', '*', '•']) {
            // Sub-bullets stay out of the description.
            continue;
        } else if let Some(current) = steps.last_mut() {
            if current.description.is_empty() {
                current.description = trimmed.to_string();
            } else {
                current.description.push(' ');
                current.description.push_str(trimmed);
            }
        }
    }

    if steps.is_empty() {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            let title = trimmed.lines().next().unwrap_or(trimmed).trim().to_string();
            steps.push(ActionStep {
                title,
                description: trimmed.to_string(),
                responsible: None,
            });
        }
    }

    steps
}

/// Strip a `"<number>. "` prefix, returning the remainder.
fn strip_number_prefix(line: &str) -> Option<&str> {
    let digits_end = line.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 {
        return None;
    }
    let rest = &line[digits_end..];
    rest.strip_prefix('.').map(str::trim_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdesk_models::{Department, ImpactLevel};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_numbered_steps_with_descriptions() {
        let text = "1. Restart service: Restarts the affected service\n2. Notify team: Sends an alert";
        let steps = parse_action_steps(text);

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].title, "Restart service");
        assert_eq!(steps[0].description, "Restarts the affected service");
        assert_eq!(steps[1].title, "Notify team");
        assert_eq!(steps[1].description, "Sends an alert");
    }

    #[test]
    fn test_parse_continuation_lines_accumulate() {
        let text = "1. Rotate credentials\nRevoke the leaked key.\nIssue a new one.\n- ignore this bullet\n2. Audit access";
        let steps = parse_action_steps(text);

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].title, "Rotate credentials");
        assert_eq!(steps[0].description, "Revoke the leaked key. Issue a new one.");
        assert_eq!(steps[1].title, "Audit access");
        assert_eq!(steps[1].description, "");
    }

    #[test]
    fn test_parse_without_numbers_yields_single_step() {
        let text = "Failover to the secondary region and monitor error rates.";
        let steps = parse_action_steps(text);

        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].title, text);
        assert_eq!(steps[0].description, text);
    }

    #[test]
    fn test_parse_empty_text_yields_no_steps() {
        assert!(parse_action_steps("   \n  ").is_empty());
    }

    #[test]
    fn test_impact_update_defaults_when_dropdowns_unset() {
        let meta = StepMetadata::default();
        let update = build_impact_analysis_update("- Orders lost\n- SLA breached\n", &meta);

        assert_eq!(update.impact_level, ImpactLevel::Sev3Normal);
        assert_eq!(update.department, Department::ItOperations);
        assert_eq!(update.impacts, vec!["Orders lost", "SLA breached"]);
    }

    #[test]
    fn test_corrective_update_prefers_structured_plan() {
        let mut meta = StepMetadata::default();
        meta.plan_title = Some("Failover plan".to_string());
        meta.plan_steps = vec![ActionStep {
            title: "Switch traffic".to_string(),
            description: "Point DNS at the standby".to_string(),
            responsible: Some("SRE".to_string()),
        }];

        let update = build_corrective_actions_update("1. Something else", &meta);
        assert_eq!(update.title, "Failover plan");
        assert_eq!(update.steps.len(), 1);
        assert_eq!(update.steps[0].title, "Switch traffic");
    }
}
