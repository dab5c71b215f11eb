//! Execution error types

use thiserror::Error;

/// Errors that abort a pipeline run
///
/// A failing filter is reported only by its step id; whatever the filter
/// returned as an error is not carried along.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("Step with id {step_id} not found")]
    UnknownStep { step_id: String },

    #[error("Filter {filter} not found (used by step {step_id})")]
    FilterResolution { step_id: String, filter: String },

    #[error("Step {step_id} failed")]
    StepExecution { step_id: String },
}

impl ExecutionError {
    /// The step the error points at
    pub fn step_id(&self) -> &str {
        match self {
            ExecutionError::UnknownStep { step_id }
            | ExecutionError::FilterResolution { step_id, .. }
            | ExecutionError::StepExecution { step_id } => step_id,
        }
    }
}
