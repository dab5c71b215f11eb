//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a pipeline configuration
///
/// Validation is fail-fast: the first problem found is the one reported.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration file is not a valid {format} file: {message}")]
    Parse { format: &'static str, message: String },

    #[error("The steps key is not found")]
    MissingSteps,

    #[error("The steps key must be a mapping of step ids to steps")]
    InvalidSteps,

    #[error("The steps key is empty")]
    EmptySteps,

    #[error("The filter key not found on step {step_id}")]
    MissingFilter { step_id: String },

    #[error("The params key is not an array for the step {step_id}")]
    InvalidParams { step_id: String },

    #[error("Step with id {next} not found (next value for the step {step_id})")]
    DanglingNext { step_id: String, next: String },

    #[error("Step {step_id} is part of a next cycle")]
    CyclicNext { step_id: String },
}

impl ConfigError {
    /// The step the error points at, if it is a per-step error
    pub fn step_id(&self) -> Option<&str> {
        match self {
            ConfigError::MissingFilter { step_id }
            | ConfigError::InvalidParams { step_id }
            | ConfigError::DanglingNext { step_id, .. }
            | ConfigError::CyclicNext { step_id } => Some(step_id),
            _ => None,
        }
    }
}
