//! pipeframe - runs a chain of filters described by a declarative step graph

pub mod cli;
pub mod core;
pub mod execution;
pub mod filter;

// Re-export commonly used types
pub use core::{ConfigError, PipelineConfig, StepDefinition};
pub use execution::{ExecutionError, ExecutionEvent, PipelineExecutor, RunReport};
pub use filter::{Filter, FilterError, FilterRegistry, FilterResolver};
