//! Summary of a finished pipeline run

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// One filter invocation within a run
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub step_id: String,
    pub filter: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Result of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Unique run ID
    pub run_id: Uuid,

    /// Step the run started at
    pub entry: String,

    /// Invoked steps in invocation order
    pub steps: Vec<StepRecord>,

    /// Output of the terminal step
    pub output: Value,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// Step ids in the order they ran
    pub fn step_order(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.step_id.as_str()).collect()
    }

    /// Wall-clock time of the whole run
    pub fn duration(&self) -> std::time::Duration {
        self.finished_at
            .signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or_default()
    }
}
