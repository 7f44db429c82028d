// ABOUTME: AI suggestion payload models returned by the backend generation endpoints
// ABOUTME: Problem statements, impact assessments, solution plans, and text enhancements

use serde::{Deserialize, Serialize};

/// Response from the problem-statement generation endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSuggestions {
    /// Alternative phrasings of the problem, best first.
    pub definitions: Vec<String>,
    #[serde(default)]
    pub question: Option<String>,
    /// Categorical values arrive as free-form labels; callers map them
    /// through the fixed option sets in `categories`.
    #[serde(default)]
    pub issue_type: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub business_impact: Option<String>,
}

/// One suggested impact assessment
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAssessment {
    #[serde(default)]
    pub impact_level: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub impacts: Vec<String>,
}

/// Response from the impact-assessment generation endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAssessments {
    pub impact_assessments: Vec<ImpactAssessment>,
}

/// One step of a structured solution plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionStep {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub responsible: Option<String>,
}

/// A structured multi-step solution suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub title: String,
    pub description: String,
    pub steps: Vec<SolutionStep>,
    #[serde(default)]
    pub expected_outcome: Option<String>,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub confidence: Option<f32>,
}

/// Response from the solution generation endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionSuggestions {
    pub solutions: Vec<Solution>,
}

/// One ranked rewrite of existing free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedOption {
    /// Short label for the option ("Option A", "Concise", ...).
    pub option: String,
    pub enhanced_text: String,
    pub confidence: f32,
    #[serde(default)]
    pub enhancement_type: Option<String>,
    #[serde(default)]
    pub quality_level: Option<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

/// Response from the text-enhancement endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedOptions {
    pub enhanced_options: Vec<EnhancedOption>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_suggestions_tolerate_missing_fields() {
        let json = r#"{"definitions": ["Service X is down"]}"#;
        let parsed: ProblemSuggestions = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.definitions, vec!["Service X is down"]);
        assert!(parsed.issue_type.is_none());
        assert!(parsed.severity.is_none());
    }

    #[test]
    fn test_enhanced_options_parse() {
        let json = r#"{
            "enhancedOptions": [
                {"option": "A", "enhancedText": "better", "confidence": 0.9},
                {"option": "B", "enhancedText": "ok", "confidence": 0.5, "improvements": ["clarity"]}
            ]
        }"#;
        let parsed: EnhancedOptions = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.enhanced_options.len(), 2);
        assert_eq!(parsed.enhanced_options[1].improvements, vec!["clarity"]);
    }
}
