//! Execution state models

use serde_json::Value;

/// State of a single pipeline run
///
/// `Pending(entry)` → `Running(id)` → either `Pending(next)`, `Succeeded` or
/// `Failed`. The last two are terminal and never retried.
#[derive(Debug)]
pub enum ExecutionState<E> {
    /// Step is about to run
    Pending(String),
    /// Step's filter is being invoked
    Running(String),
    /// Terminal step finished; holds the pipeline's final result
    Succeeded(Value),
    /// Some step failed; the run is over
    Failed(E),
}
