// ABOUTME: Workflow state owned by the controller for one open analysis session
// ABOUTME: Step answers, per-step metadata, generation guards, epochs, and resume computation

use serde::{Deserialize, Serialize};

use opsdesk_models::{
    ActionStep, Department, ImpactLevel, IssueType, ResolutionRecord, Severity, Solution,
};

use crate::step::{WizardStep, STEP_COUNT};

/// Guards against duplicate or re-triggered AI generation for one step.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GenerationFlags {
    /// Set synchronously before the generation call starts; never reset.
    pub attempted: bool,
    /// True while a generation call is in flight.
    pub in_progress: bool,
}

/// Optional structured data collected alongside a step's free-text answer.
/// AI-suggestion lists are replaced wholesale on regeneration, never merged.
#[derive(Debug, Clone, Default)]
pub struct StepMetadata {
    // Step 1 classification
    pub issue_type: Option<IssueType>,
    pub severity: Option<Severity>,
    pub business_impact: Option<String>,
    pub question: Option<String>,
    // Step 2 dropdowns
    pub impact_level: Option<ImpactLevel>,
    pub department: Option<Department>,
    // Step 3 evidence
    pub supporting_evidence: Vec<String>,
    pub confidence: Option<f32>,
    // Step 4 structured plan
    pub plan_title: Option<String>,
    pub plan_steps: Vec<ActionStep>,
    /// Most recent AI-suggested alternatives for the step's free text.
    pub suggestions: Vec<String>,
    /// Structured solution suggestions (step 4 only).
    pub solutions: Vec<Solution>,
}

/// Single source of truth for wizard progress. Created when a ticket is
/// opened for analysis and discarded on navigation away; the backend
/// resolution record is the durable truth across sessions.
#[derive(Debug, Clone)]
pub struct WorkflowState {
    pub current_step: WizardStep,
    /// Stored answers, index i = step i+1. Persisted on advance/save.
    pub answers: [String; STEP_COUNT],
    /// Working answer for the active step; committed on advance.
    pub buffer: String,
    pub metadata: [StepMetadata; STEP_COUNT],
    pub flags: [GenerationFlags; STEP_COUNT],
    /// Per-step generation epochs; navigation away bumps the departed
    /// step's epoch so late async results are discarded.
    pub epochs: [u64; STEP_COUNT],
    /// Latest persisted backend snapshot, if any.
    pub resolved: Option<ResolutionRecord>,
    /// Set after a successful advance from the final step.
    pub terminal: bool,
}

impl WorkflowState {
    /// Hydrate from an existing resolution record, or start empty.
    pub fn initialize(existing: Option<ResolutionRecord>) -> Self {
        let mut answers: [String; STEP_COUNT] = Default::default();
        if let Some(record) = &existing {
            for (i, answer) in answers.iter_mut().enumerate() {
                if let Some(text) = record.step_text(i) {
                    *answer = text;
                }
            }
        }

        let current_step = compute_resume_step(&answers);
        let buffer = answers[current_step.index0()].clone();

        WorkflowState {
            current_step,
            answers,
            buffer,
            metadata: Default::default(),
            flags: Default::default(),
            epochs: [0; STEP_COUNT],
            resolved: existing,
            terminal: false,
        }
    }

    /// The sole completeness predicate: trimmed answer text is non-empty.
    /// Dropdowns are informative but never gate completion.
    pub fn step_complete(&self, step: WizardStep) -> bool {
        !self.answers[step.index0()].trim().is_empty()
    }

    pub fn answer(&self, step: WizardStep) -> &str {
        &self.answers[step.index0()]
    }

    pub fn metadata(&self, step: WizardStep) -> &StepMetadata {
        &self.metadata[step.index0()]
    }

    /// The answer `advance` would commit: the working buffer, falling back
    /// to the stored answer when the buffer is blank.
    pub fn effective_answer(&self) -> &str {
        if self.buffer.trim().is_empty() {
            self.answer(self.current_step)
        } else {
            &self.buffer
        }
    }

    /// Move the active pointer, bumping the departed step's epoch and
    /// loading the destination's stored answer into the working buffer.
    pub(crate) fn move_to(&mut self, step: WizardStep) {
        self.epochs[self.current_step.index0()] += 1;
        self.current_step = step;
        self.buffer = self.answers[step.index0()].clone();
    }
}

/// Resume-step computation: the first step with an empty (trimmed) answer,
/// or the final step when every answer is populated. Pure.
pub fn compute_resume_step(answers: &[String; STEP_COUNT]) -> WizardStep {
    for (i, answer) in answers.iter().enumerate() {
        if answer.trim().is_empty() {
            return WizardStep::from_index0(i).unwrap_or(WizardStep::CorrectiveActions);
        }
    }
    WizardStep::CorrectiveActions
}
