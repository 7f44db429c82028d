// ABOUTME: Workflow error taxonomy
// ABOUTME: Thin wrapper over gateway failures plus local validation errors

use thiserror::Error;

use opsdesk_gateway::GatewayError;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Invalid wizard step: {0}")]
    InvalidStep(u8),
    #[error("Text enhancement requires a non-empty answer")]
    EmptyEnhancementInput,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
