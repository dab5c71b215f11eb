//! Core domain models for the pipeline
//!
//! This module defines the step graph, its validation, and the per-run
//! execution state.

pub mod config;
pub mod error;
pub mod state;
pub mod step;

pub use config::{ConfigFormat, PipelineConfig};
pub use error::ConfigError;
pub use state::ExecutionState;
pub use step::StepDefinition;
