// ABOUTME: Step content helpers: suggestion overwrite, enhancement ranking, solution formatting
// ABOUTME: Pure functions shared by the controller and the presentation shell

use opsdesk_models::{EnhancedOption, Solution};

/// Rank enhancement options by backend confidence, highest first. The first
/// element is what the UI pre-selects.
pub fn rank_enhancements(mut options: Vec<EnhancedOption>) -> Vec<EnhancedOption> {
    options.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    options
}

/// Serialize a structured solution into the free-text answer block shown in
/// the corrective-actions step.
pub fn format_solution(solution: &Solution) -> String {
    let mut out = String::new();
    out.push_str(solution.title.trim());
    out.push('\n');
    if !solution.description.trim().is_empty() {
        out.push_str(solution.description.trim());
        out.push('\n');
    }

    for (i, step) in solution.steps.iter().enumerate() {
        out.push_str(&format!("{}. {}: {}", i + 1, step.title, step.description));
        if let Some(responsible) = &step.responsible {
            out.push_str(&format!(" (Responsible: {})", responsible));
        }
        out.push('\n');
    }

    if let Some(outcome) = &solution.expected_outcome {
        out.push_str(&format!("Expected outcome: {}\n", outcome));
    }
    if let Some(risk) = &solution.risk_level {
        out.push_str(&format!("Risk level: {}\n", risk));
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdesk_models::SolutionStep;
    use pretty_assertions::assert_eq;

    fn option(label: &str, confidence: f32) -> EnhancedOption {
        EnhancedOption {
            option: label.to_string(),
            enhanced_text: format!("{} text", label),
            confidence,
            enhancement_type: None,
            quality_level: None,
            improvements: vec![],
        }
    }

    #[test]
    fn test_rank_enhancements_highest_first() {
        let ranked = rank_enhancements(vec![option("B", 0.4), option("A", 0.9), option("C", 0.7)]);
        let labels: Vec<&str> = ranked.iter().map(|o| o.option.as_str()).collect();
        assert_eq!(labels, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_format_solution_renders_numbered_block() {
        let solution = Solution {
            title: "Restore checkout".to_string(),
            description: "Recover payment path and notify stakeholders".to_string(),
            steps: vec![
                SolutionStep {
                    title: "Restart service".to_string(),
                    description: "Restarts the affected service".to_string(),
                    responsible: Some("SRE".to_string()),
                },
                SolutionStep {
                    title: "Notify team".to_string(),
                    description: "Sends an alert".to_string(),
                    responsible: None,
                },
            ],
            expected_outcome: Some("Checkout succeeds again".to_string()),
            risk_level: Some("Low".to_string()),
            confidence: Some(0.9),
        };

        let text = format_solution(&solution);
        assert_eq!(
            text,
            "Restore checkout\n\
             Recover payment path and notify stakeholders\n\
             1. Restart service: Restarts the affected service (Responsible: SRE)\n\
             2. Notify team: Sends an alert\n\
             Expected outcome: Checkout succeeds again\n\
             Risk level: Low"
        );
    }

    #[test]
    fn test_formatted_solution_round_trips_through_parser() {
        let solution = Solution {
            title: "Plan".to_string(),
            description: String::new(),
            steps: vec![SolutionStep {
                title: "Restart service".to_string(),
                description: "Restarts the affected service".to_string(),
                responsible: None,
            }],
            expected_outcome: None,
            risk_level: None,
            confidence: None,
        };

        let parsed = crate::save::parse_action_steps(&format_solution(&solution));
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "Restart service");
        assert_eq!(parsed[0].description, "Restarts the affected service");
    }
}
