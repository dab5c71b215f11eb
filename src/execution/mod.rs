//! Pipeline execution engine

pub mod engine;
pub mod error;
pub mod report;

pub use engine::{EventHandler, ExecutionEvent, PipelineExecutor};
pub use error::ExecutionError;
pub use report::{RunReport, StepRecord};
