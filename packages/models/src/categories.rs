// ABOUTME: Fixed category option sets used by the RCA wizard dropdowns
// ABOUTME: Lookup from AI-returned labels with documented fallback defaults

use serde::{Deserialize, Serialize};

/// Impact severity classification for step 2 of the wizard.
///
/// AI-returned labels are mapped through [`ImpactLevel::from_label`];
/// anything unrecognized falls back to `Sev3Normal` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactLevel {
    Sev1Critical,
    Sev2Major,
    Sev3Normal,
    Sev4Minor,
}

impl ImpactLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ImpactLevel::Sev1Critical => "Sev 1 - Critical Impact",
            ImpactLevel::Sev2Major => "Sev 2 - Major Impact",
            ImpactLevel::Sev3Normal => "Sev 3 - Normal Impact",
            ImpactLevel::Sev4Minor => "Sev 4 - Minor Impact",
        }
    }

    /// Map a free-form label onto the fixed option set. Tolerates case
    /// differences and a bare severity word without the "Sev N -" prefix.
    /// Unmapped values fall back to the documented default.
    pub fn from_label(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        if normalized.contains("sev 1") || normalized.contains("critical") {
            ImpactLevel::Sev1Critical
        } else if normalized.contains("sev 2") || normalized.contains("major") {
            ImpactLevel::Sev2Major
        } else if normalized.contains("sev 4") || normalized.contains("minor") {
            ImpactLevel::Sev4Minor
        } else if normalized.contains("sev 3") || normalized.contains("normal") {
            ImpactLevel::Sev3Normal
        } else {
            ImpactLevel::default()
        }
    }

    pub fn all() -> &'static [ImpactLevel] {
        &[
            ImpactLevel::Sev1Critical,
            ImpactLevel::Sev2Major,
            ImpactLevel::Sev3Normal,
            ImpactLevel::Sev4Minor,
        ]
    }
}

impl Default for ImpactLevel {
    fn default() -> Self {
        ImpactLevel::Sev3Normal
    }
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Department owning the impact, step 2 dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    ItOperations,
    Engineering,
    CustomerSupport,
    Finance,
    HumanResources,
    Sales,
}

impl Department {
    pub fn label(&self) -> &'static str {
        match self {
            Department::ItOperations => "IT Operations",
            Department::Engineering => "Engineering",
            Department::CustomerSupport => "Customer Support",
            Department::Finance => "Finance",
            Department::HumanResources => "Human Resources",
            Department::Sales => "Sales",
        }
    }

    /// Unmapped values fall back to IT Operations.
    pub fn from_label(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        Department::all()
            .iter()
            .copied()
            .find(|d| d.label().to_lowercase() == normalized)
            .unwrap_or_default()
    }

    pub fn all() -> &'static [Department] {
        &[
            Department::ItOperations,
            Department::Engineering,
            Department::CustomerSupport,
            Department::Finance,
            Department::HumanResources,
            Department::Sales,
        ]
    }
}

impl Default for Department {
    fn default() -> Self {
        Department::ItOperations
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Issue classification suggested by the AI for step 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Incident,
    Problem,
    ChangeRequest,
    ServiceRequest,
}

impl IssueType {
    pub fn label(&self) -> &'static str {
        match self {
            IssueType::Incident => "Incident",
            IssueType::Problem => "Problem",
            IssueType::ChangeRequest => "Change Request",
            IssueType::ServiceRequest => "Service Request",
        }
    }

    pub fn from_label(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "problem" => IssueType::Problem,
            "change request" | "change" => IssueType::ChangeRequest,
            "service request" | "request" => IssueType::ServiceRequest,
            _ => IssueType::Incident,
        }
    }
}

impl Default for IssueType {
    fn default() -> Self {
        IssueType::Incident
    }
}

/// Severity suggested by the AI for step 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    pub fn from_label(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "low" => Severity::Low,
            "high" => Severity::High,
            "critical" => Severity::Critical,
            _ => Severity::Medium,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impact_level_exact_labels() {
        assert_eq!(
            ImpactLevel::from_label("Sev 1 - Critical Impact"),
            ImpactLevel::Sev1Critical
        );
        assert_eq!(
            ImpactLevel::from_label("sev 4 - minor impact"),
            ImpactLevel::Sev4Minor
        );
    }

    #[test]
    fn test_impact_level_bare_words() {
        assert_eq!(ImpactLevel::from_label("Major"), ImpactLevel::Sev2Major);
        assert_eq!(ImpactLevel::from_label("critical"), ImpactLevel::Sev1Critical);
    }

    #[test]
    fn test_impact_level_unknown_falls_back() {
        assert_eq!(ImpactLevel::from_label("Unknown Tier"), ImpactLevel::Sev3Normal);
        assert_eq!(ImpactLevel::from_label(""), ImpactLevel::Sev3Normal);
        assert_eq!(ImpactLevel::Sev3Normal.label(), "Sev 3 - Normal Impact");
    }

    #[test]
    fn test_department_fallback() {
        assert_eq!(Department::from_label("Engineering"), Department::Engineering);
        assert_eq!(Department::from_label("customer support"), Department::CustomerSupport);
        assert_eq!(Department::from_label("Pet Grooming"), Department::ItOperations);
        assert_eq!(Department::ItOperations.label(), "IT Operations");
    }

    #[test]
    fn test_issue_type_and_severity_defaults() {
        assert_eq!(IssueType::from_label("weird"), IssueType::Incident);
        assert_eq!(IssueType::from_label("Change Request"), IssueType::ChangeRequest);
        assert_eq!(Severity::from_label("HIGH"), Severity::High);
        assert_eq!(Severity::from_label("???"), Severity::Medium);
    }
}
