// ABOUTME: RCA workflow controller - single source of truth for wizard progress
// ABOUTME: Navigation gates, the four-guard auto-generation predicate, and step persistence

use std::sync::Arc;

use tracing::{debug, info, warn};

use opsdesk_gateway::{
    EnhanceRequest, ImpactAssessmentRequest, ProblemStatementRequest, RemoteGateway,
    SolutionsRequest,
};
use opsdesk_models::{
    Department, EnhancedOption, ImpactAssessments, ImpactLevel, IssueType, ProblemSuggestions,
    ResolutionRecord, Severity, Solution, SolutionSuggestions, Ticket,
};

use crate::error::{WorkflowError, WorkflowResult};
use crate::providers::{format_solution, rank_enhancements};
use crate::save::{
    build_corrective_actions_update, build_impact_analysis_update, build_problem_statement_update,
    build_root_cause_update,
};
use crate::state::WorkflowState;
use crate::step::WizardStep;

/// Outcome of a step persistence attempt. Failures are non-blocking by
/// design: navigation proceeds and the caller decides how loudly to warn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    Failed(String),
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved)
    }
}

/// Outcome of an `advance` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceResult {
    /// The active step's answer was empty; nothing was mutated. The caller
    /// must surface this to the user.
    EmptyAnswer,
    /// Moved forward one step.
    Advanced { to: WizardStep, save: SaveStatus },
    /// Advanced from the final step; the workflow is terminal.
    Completed { save: SaveStatus },
}

impl AdvanceResult {
    pub fn ok(&self) -> bool {
        !matches!(self, AdvanceResult::EmptyAnswer)
    }
}

/// Why `maybe_generate` declined to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The backend resolution already marks this step completed.
    AlreadyResolved,
    /// The step already has a non-empty answer.
    AnswerPresent,
    /// Generation was already attempted for this step; never retried.
    AlreadyAttempted,
    /// A generation call for this step is in flight.
    InProgress,
    /// The step has no auto-generation endpoint (root cause is written
    /// manually, assisted by enhancement only).
    NoGenerator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// A generation call fired (its result may still have been discarded
    /// as stale or failed best-effort).
    Fired,
    Skipped(SkipReason),
}

/// Owns the [`WorkflowState`] for the ticket currently open and mediates
/// between the step UIs and the backend. Exactly one controller instance
/// mutates a ticket's state at a time.
pub struct WorkflowController {
    gateway: Arc<dyn RemoteGateway>,
    ticket: Ticket,
    state: WorkflowState,
}

impl WorkflowController {
    /// Open a ticket for analysis, hydrating from the existing resolution
    /// record when one exists. Performs no AI calls; the shell drives
    /// [`maybe_generate`](Self::maybe_generate) once it is ready to render.
    pub fn initialize(
        gateway: Arc<dyn RemoteGateway>,
        ticket: Ticket,
        existing_resolution: Option<ResolutionRecord>,
    ) -> Self {
        let state = WorkflowState::initialize(existing_resolution);
        info!(
            ticket_id = %ticket.id,
            resume_step = state.current_step.number(),
            "opened RCA workflow"
        );
        WorkflowController {
            gateway,
            ticket,
            state,
        }
    }

    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step
    }

    pub fn is_terminal(&self) -> bool {
        self.state.terminal
    }

    /// Pure local mutation of the active step's working answer. No side
    /// effects; persistence happens on `advance`/`save_step`.
    pub fn set_answer(&mut self, text: impl Into<String>) {
        self.state.buffer = text.into();
    }

    /// Evaluate the four-guard condition and fire the step's generation
    /// endpoint when every guard passes. Best-effort: failures are logged
    /// and the step stays manually editable; no automatic retry.
    pub async fn maybe_generate(&mut self, step: WizardStep) -> GenerationOutcome {
        let i = step.index0();

        if let Some(record) = &self.state.resolved {
            if record.step_completed(i) {
                return GenerationOutcome::Skipped(SkipReason::AlreadyResolved);
            }
        }
        if !self.state.answers[i].trim().is_empty() {
            return GenerationOutcome::Skipped(SkipReason::AnswerPresent);
        }
        if self.state.flags[i].attempted {
            return GenerationOutcome::Skipped(SkipReason::AlreadyAttempted);
        }
        if self.state.flags[i].in_progress {
            return GenerationOutcome::Skipped(SkipReason::InProgress);
        }
        if step == WizardStep::RootCause {
            return GenerationOutcome::Skipped(SkipReason::NoGenerator);
        }

        // Attempted is set synchronously before the call starts, closing
        // the duplicate-trigger race for this step.
        self.state.flags[i].attempted = true;
        self.state.flags[i].in_progress = true;
        let epoch = self.state.epochs[i];
        debug!(step = step.number(), "triggering AI generation");

        let result = self.generate(step).await;
        self.state.flags[i].in_progress = false;

        match result {
            Ok(()) => {
                if self.state.epochs[i] != epoch {
                    warn!(step = step.number(), "discarding stale generation result");
                    return GenerationOutcome::Fired;
                }
                // Fire-and-forget persistence of the generated content.
                if let SaveStatus::Failed(reason) = self.save_step(step).await {
                    warn!(step = step.number(), %reason, "auto-save after generation failed");
                }
                GenerationOutcome::Fired
            }
            Err(e) => {
                warn!(step = step.number(), error = %e, "AI generation failed; step stays manual");
                GenerationOutcome::Fired
            }
        }
    }

    async fn generate(&mut self, step: WizardStep) -> WorkflowResult<()> {
        let epoch = self.state.epochs[step.index0()];
        match step {
            WizardStep::ProblemDefinition => {
                let request = ProblemStatementRequest {
                    short_description: self.ticket.short_description.clone(),
                    description: self.ticket.description.clone(),
                    category: self.ticket.category.clone(),
                    log_entries: self.ticket.log_entries.clone(),
                };
                let suggestions = self.gateway.generate_problem_statement(request).await?;
                self.apply_problem_suggestions(epoch, suggestions);
            }
            WizardStep::ImpactAssessment => {
                let request = ImpactAssessmentRequest {
                    problem_statement: self.state.answer(WizardStep::ProblemDefinition).to_string(),
                };
                let assessments = self.gateway.generate_impact_assessment(request).await?;
                self.apply_impact_assessments(epoch, assessments);
            }
            WizardStep::CorrectiveActions => {
                let request = SolutionsRequest {
                    ticket_summary: self.ticket.summary(),
                    problem_statement: non_empty(self.state.answer(WizardStep::ProblemDefinition)),
                    impact_summary: non_empty(self.state.answer(WizardStep::ImpactAssessment)),
                    root_cause: non_empty(self.state.answer(WizardStep::RootCause)),
                };
                let solutions = self.gateway.generate_solutions(request).await?;
                self.apply_solution_suggestions(epoch, solutions);
            }
            WizardStep::RootCause => {}
        }
        Ok(())
    }

    /// Apply a problem-statement generation result unless the step's epoch
    /// advanced while the call was in flight.
    fn apply_problem_suggestions(&mut self, epoch: u64, suggestions: ProblemSuggestions) {
        let i = WizardStep::ProblemDefinition.index0();
        if self.state.epochs[i] != epoch {
            return;
        }

        let meta = &mut self.state.metadata[i];
        meta.issue_type = Some(
            suggestions
                .issue_type
                .as_deref()
                .map(IssueType::from_label)
                .unwrap_or_default(),
        );
        meta.severity = Some(
            suggestions
                .severity
                .as_deref()
                .map(Severity::from_label)
                .unwrap_or_default(),
        );
        meta.business_impact = suggestions.business_impact;
        meta.question = suggestions.question;
        meta.suggestions = suggestions.definitions;

        if let Some(primary) = meta.suggestions.first().cloned() {
            self.state.answers[i] = primary.clone();
            if self.state.current_step.index0() == i {
                self.state.buffer = primary;
            }
        }
    }

    fn apply_impact_assessments(&mut self, epoch: u64, assessments: ImpactAssessments) {
        let i = WizardStep::ImpactAssessment.index0();
        if self.state.epochs[i] != epoch {
            return;
        }

        let rendered: Vec<String> = assessments
            .impact_assessments
            .iter()
            .map(|a| a.impacts.join("\n"))
            .filter(|text| !text.trim().is_empty())
            .collect();

        let meta = &mut self.state.metadata[i];
        if let Some(first) = assessments.impact_assessments.first() {
            // Unmapped categorical values fall back to the documented
            // defaults instead of failing.
            meta.impact_level = Some(
                first
                    .impact_level
                    .as_deref()
                    .map(ImpactLevel::from_label)
                    .unwrap_or_default(),
            );
            meta.department = Some(
                first
                    .department
                    .as_deref()
                    .map(Department::from_label)
                    .unwrap_or_default(),
            );
        }
        meta.suggestions = rendered;

        if let Some(primary) = meta.suggestions.first().cloned() {
            self.state.answers[i] = primary.clone();
            if self.state.current_step.index0() == i {
                self.state.buffer = primary;
            }
        }
    }

    fn apply_solution_suggestions(&mut self, epoch: u64, suggestions: SolutionSuggestions) {
        let i = WizardStep::CorrectiveActions.index0();
        if self.state.epochs[i] != epoch {
            return;
        }

        let meta = &mut self.state.metadata[i];
        meta.solutions = suggestions.solutions;
        meta.suggestions = meta.solutions.iter().map(format_solution).collect();

        if let Some(first) = meta.solutions.first().cloned() {
            meta.plan_title = Some(first.title.clone());
            meta.plan_steps = first
                .steps
                .iter()
                .map(|s| opsdesk_models::ActionStep {
                    title: s.title.clone(),
                    description: s.description.clone(),
                    responsible: s.responsible.clone(),
                })
                .collect();
            let text = format_solution(&first);
            self.state.answers[i] = text.clone();
            if self.state.current_step.index0() == i {
                self.state.buffer = text;
            }
        }
    }

    /// Validate the active step's answer, persist it, and move forward.
    /// The empty-answer gate is the only hard validation in the wizard;
    /// persistence failure is reported but never blocks navigation.
    pub async fn advance(&mut self) -> AdvanceResult {
        let effective = self.state.effective_answer().trim().to_string();
        if effective.is_empty() {
            return AdvanceResult::EmptyAnswer;
        }

        let step = self.state.current_step;
        self.state.answers[step.index0()] = effective;
        let save = self.save_step(step).await;
        if let SaveStatus::Failed(reason) = &save {
            warn!(step = step.number(), %reason, "step save failed; continuing");
        }

        match step.next() {
            Some(next) => {
                self.state.move_to(next);
                AdvanceResult::Advanced { to: next, save }
            }
            None => {
                self.state.terminal = true;
                info!(ticket_id = %self.ticket.id, "RCA workflow completed");
                AdvanceResult::Completed { save }
            }
        }
    }

    /// Non-destructive backward navigation; no persistence.
    pub fn retreat(&mut self) {
        if let Some(prev) = self.state.current_step.prev() {
            self.state.move_to(prev);
        }
    }

    /// Unconditional navigation to any step; no persistence. Mirrors
    /// arbitrary clicks on the progress indicator.
    pub fn jump_to(&mut self, step: WizardStep) {
        if step != self.state.current_step {
            self.state.move_to(step);
        }
    }

    /// Persist one step's answer and metadata in its backend-specific
    /// shape. On success the returned snapshot replaces `resolved` so
    /// later resume and guard computations see the persisted truth.
    pub async fn save_step(&mut self, step: WizardStep) -> SaveStatus {
        let answer = self.state.answers[step.index0()].clone();
        let meta = &self.state.metadata[step.index0()];
        let ticket_id = self.ticket.id.clone();

        let result = match step {
            WizardStep::ProblemDefinition => {
                let payload = build_problem_statement_update(&answer, meta);
                self.gateway.update_problem_statement(&ticket_id, payload).await
            }
            WizardStep::ImpactAssessment => {
                let payload = build_impact_analysis_update(&answer, meta);
                self.gateway.update_impact_analysis(&ticket_id, payload).await
            }
            WizardStep::RootCause => {
                let payload = build_root_cause_update(&answer, meta);
                self.gateway.update_root_cause(&ticket_id, payload).await
            }
            WizardStep::CorrectiveActions => {
                let payload = build_corrective_actions_update(&answer, meta);
                self.gateway.update_corrective_actions(&ticket_id, payload).await
            }
        };

        match result {
            Ok(record) => {
                self.state.resolved = Some(record);
                SaveStatus::Saved
            }
            Err(e) => SaveStatus::Failed(e.to_string()),
        }
    }

    /// Overwrite the working answer with one of the step's AI suggestions.
    /// Last click wins; no merging.
    pub fn apply_suggestion(&mut self, index: usize) -> bool {
        let step = self.state.current_step;
        match self.state.metadata[step.index0()].suggestions.get(index) {
            Some(text) => {
                self.state.buffer = text.clone();
                true
            }
            None => false,
        }
    }

    /// Overwrite the working answer with a structured solution, keeping
    /// its step list for the persistence payload.
    pub fn apply_solution(&mut self, index: usize) -> bool {
        let i = WizardStep::CorrectiveActions.index0();
        let Some(solution) = self.state.metadata[i].solutions.get(index).cloned() else {
            return false;
        };
        self.state.metadata[i].plan_title = Some(solution.title.clone());
        self.state.metadata[i].plan_steps = solution
            .steps
            .iter()
            .map(|s| opsdesk_models::ActionStep {
                title: s.title.clone(),
                description: s.description.clone(),
                responsible: s.responsible.clone(),
            })
            .collect();
        self.state.buffer = format_solution(&solution);
        true
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.state.metadata[WizardStep::CorrectiveActions.index0()].solutions
    }

    /// Request ranked rewrites of the current answer (steps 3 and 4).
    /// Returns options sorted by confidence, highest first.
    pub async fn enhance_current(&mut self) -> WorkflowResult<Vec<EnhancedOption>> {
        let text = self.state.effective_answer().trim().to_string();
        if text.is_empty() {
            return Err(WorkflowError::EmptyEnhancementInput);
        }

        let options = self
            .gateway
            .enhance_text(EnhanceRequest {
                text,
                reference: Some(self.ticket.summary()),
            })
            .await?;

        Ok(rank_enhancements(options.enhanced_options))
    }

    /// Overwrite the working answer with a chosen enhancement.
    pub fn apply_enhancement(&mut self, option: &EnhancedOption) {
        self.state.buffer = option.enhanced_text.clone();
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
