// ABOUTME: Wizard step enumeration
// ABOUTME: Four sequential-but-revisitable steps with 1-based numbering

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

pub const STEP_COUNT: usize = 4;

/// The four RCA wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    ProblemDefinition,
    ImpactAssessment,
    RootCause,
    CorrectiveActions,
}

impl WizardStep {
    /// 1-based step number shown to users.
    pub fn number(&self) -> u8 {
        self.index0() as u8 + 1
    }

    /// 0-based index into per-step arrays.
    pub fn index0(&self) -> usize {
        match self {
            WizardStep::ProblemDefinition => 0,
            WizardStep::ImpactAssessment => 1,
            WizardStep::RootCause => 2,
            WizardStep::CorrectiveActions => 3,
        }
    }

    pub fn from_index0(index: usize) -> Result<Self, WorkflowError> {
        match index {
            0 => Ok(WizardStep::ProblemDefinition),
            1 => Ok(WizardStep::ImpactAssessment),
            2 => Ok(WizardStep::RootCause),
            3 => Ok(WizardStep::CorrectiveActions),
            _ => Err(WorkflowError::InvalidStep(index as u8)),
        }
    }

    pub fn from_number(number: u8) -> Result<Self, WorkflowError> {
        if number == 0 {
            return Err(WorkflowError::InvalidStep(number));
        }
        Self::from_index0(number as usize - 1)
    }

    pub fn next(&self) -> Option<WizardStep> {
        Self::from_index0(self.index0() + 1).ok()
    }

    pub fn prev(&self) -> Option<WizardStep> {
        self.index0().checked_sub(1).and_then(|i| Self::from_index0(i).ok())
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::ProblemDefinition => "Problem Definition",
            WizardStep::ImpactAssessment => "Impact Assessment",
            WizardStep::RootCause => "Root Cause",
            WizardStep::CorrectiveActions => "Corrective Actions",
        }
    }

    pub fn all() -> [WizardStep; STEP_COUNT] {
        [
            WizardStep::ProblemDefinition,
            WizardStep::ImpactAssessment,
            WizardStep::RootCause,
            WizardStep::CorrectiveActions,
        ]
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Step {}: {}", self.number(), self.title())
    }
}
