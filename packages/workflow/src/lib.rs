// ABOUTME: RCA wizard workflow package
// ABOUTME: Controller, state, step enumeration, payload builders, and content helpers

pub mod controller;
pub mod error;
pub mod providers;
pub mod save;
pub mod state;
pub mod step;

pub use controller::{
    AdvanceResult, GenerationOutcome, SaveStatus, SkipReason, WorkflowController,
};
pub use error::{WorkflowError, WorkflowResult};
pub use providers::{format_solution, rank_enhancements};
pub use save::parse_action_steps;
pub use state::{compute_resume_step, GenerationFlags, StepMetadata, WorkflowState};
pub use step::{WizardStep, STEP_COUNT};
