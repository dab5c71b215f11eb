//! Main execution engine - walks the step chain one filter at a time

use crate::{
    core::{ExecutionState, PipelineConfig, StepDefinition},
    execution::{ExecutionError, RunReport, StepRecord},
    filter::{Filter, FilterResolver},
};
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Events that can occur during pipeline execution
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    PipelineStarted {
        run_id: Uuid,
        entry: String,
    },
    StepStarted {
        step_id: String,
        filter: String,
    },
    StepCompleted {
        step_id: String,
        next_step: Option<String>,
    },
    StepFailed {
        step_id: String,
    },
    PipelineCompleted {
        run_id: Uuid,
        output: Value,
    },
    PipelineFailed {
        run_id: Uuid,
        error: ExecutionError,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(ExecutionEvent) + Send + Sync>;

/// A step on the chain with its filter already resolved
struct ResolvedStep<'c> {
    step: &'c StepDefinition,
    filter: Arc<dyn Filter>,
}

/// Steps reachable from the entry, keyed by id
type ExecutionPlan<'c> = HashMap<&'c str, ResolvedStep<'c>>;

/// Runs a validated pipeline against a set of filters
pub struct PipelineExecutor<R> {
    resolver: R,
    event_handlers: Vec<EventHandler>,
}

impl<R: FilterResolver> PipelineExecutor<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            event_handlers: Vec::new(),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(ExecutionEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    /// Emit an event to all handlers
    fn emit_event(&self, event: ExecutionEvent) {
        for handler in &self.event_handlers {
            handler(event.clone());
        }
    }

    /// Execute the pipeline from its default entry step
    pub async fn execute(&self, config: &PipelineConfig) -> Result<RunReport, ExecutionError> {
        self.execute_from(config, config.default_entry()).await
    }

    /// Execute the pipeline starting at `entry`.
    ///
    /// Every filter on the chain is resolved before the first step runs. Steps
    /// then run strictly one after another, each receiving the previous
    /// step's output ahead of its own params. The first failure ends the run.
    pub async fn execute_from(
        &self,
        config: &PipelineConfig,
        entry: &str,
    ) -> Result<RunReport, ExecutionError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();

        info!("Starting pipeline run {} at step {}", run_id, entry);
        self.emit_event(ExecutionEvent::PipelineStarted {
            run_id,
            entry: entry.to_string(),
        });

        let mut records = Vec::new();
        let result = match self.resolve_chain(config, entry) {
            Ok(plan) => self.run_chain(entry, &plan, &mut records).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(output) => {
                info!("Pipeline run {} completed after {} steps", run_id, records.len());
                self.emit_event(ExecutionEvent::PipelineCompleted {
                    run_id,
                    output: output.clone(),
                });
                Ok(RunReport {
                    run_id,
                    entry: entry.to_string(),
                    steps: records,
                    output,
                    started_at,
                    finished_at: Utc::now(),
                })
            }
            Err(e) => {
                error!("Pipeline run {} failed: {}", run_id, e);
                self.emit_event(ExecutionEvent::PipelineFailed {
                    run_id,
                    error: e.clone(),
                });
                Err(e)
            }
        }
    }

    /// Resolve each distinct filter on the chain starting at `entry`, once
    fn resolve_chain<'c>(
        &self,
        config: &'c PipelineConfig,
        entry: &str,
    ) -> Result<ExecutionPlan<'c>, ExecutionError> {
        let mut filters: HashMap<&str, Arc<dyn Filter>> = HashMap::new();
        let mut plan = ExecutionPlan::new();
        let mut current = Some(entry);

        // Validation rejects cycles, so the walk ends at a terminal step
        while let Some(step_id) = current {
            let (id, step) = config.steps().get_key_value(step_id).ok_or_else(|| {
                ExecutionError::UnknownStep {
                    step_id: step_id.to_string(),
                }
            })?;

            let filter = match filters.get(step.filter.as_str()) {
                Some(filter) => filter.clone(),
                None => {
                    let filter = self.resolver.resolve(&step.filter).ok_or_else(|| {
                        ExecutionError::FilterResolution {
                            step_id: id.clone(),
                            filter: step.filter.clone(),
                        }
                    })?;
                    debug!("Resolved filter {} for step {}", step.filter, id);
                    filters.insert(step.filter.as_str(), filter.clone());
                    filter
                }
            };

            plan.insert(id.as_str(), ResolvedStep { step, filter });
            current = step.next.as_deref();
        }

        Ok(plan)
    }

    /// Drive the state machine until it reaches a terminal state
    async fn run_chain(
        &self,
        entry: &str,
        plan: &ExecutionPlan<'_>,
        records: &mut Vec<StepRecord>,
    ) -> Result<Value, ExecutionError> {
        let mut state: ExecutionState<ExecutionError> = ExecutionState::Pending(entry.to_string());
        let mut prior_output: Option<Value> = None;

        loop {
            state = match state {
                ExecutionState::Pending(step_id) => ExecutionState::Running(step_id),
                ExecutionState::Running(step_id) => {
                    let resolved = &plan[step_id.as_str()];
                    let result = self
                        .run_step(&step_id, resolved, prior_output.take(), records)
                        .await;
                    match (result, &resolved.step.next) {
                        (Ok(output), Some(next)) => {
                            prior_output = Some(output);
                            ExecutionState::Pending(next.clone())
                        }
                        (Ok(output), None) => ExecutionState::Succeeded(output),
                        (Err(e), _) => ExecutionState::Failed(e),
                    }
                }
                ExecutionState::Succeeded(output) => return Ok(output),
                ExecutionState::Failed(e) => return Err(e),
            };
        }
    }

    /// Execute a single step
    async fn run_step(
        &self,
        step_id: &str,
        resolved: &ResolvedStep<'_>,
        prior_output: Option<Value>,
        records: &mut Vec<StepRecord>,
    ) -> Result<Value, ExecutionError> {
        let step = resolved.step;

        info!("Run {} (step {})", step.filter, step_id);
        self.emit_event(ExecutionEvent::StepStarted {
            step_id: step_id.to_string(),
            filter: step.filter.clone(),
        });

        let params = step.compose_params(prior_output);
        debug!("Step {} params: {:?}", step_id, params);

        let started_at = Utc::now();
        let output = match resolved.filter.apply(params).await {
            Ok(output) => output,
            Err(e) => {
                debug!("Filter {} failed in step {}: {}", step.filter, step_id, e);
                self.emit_event(ExecutionEvent::StepFailed {
                    step_id: step_id.to_string(),
                });
                return Err(ExecutionError::StepExecution {
                    step_id: step_id.to_string(),
                });
            }
        };

        records.push(StepRecord {
            step_id: step_id.to_string(),
            filter: step.filter.clone(),
            started_at,
            finished_at: Utc::now(),
        });

        self.emit_event(ExecutionEvent::StepCompleted {
            step_id: step_id.to_string(),
            next_step: step.next.clone(),
        });

        Ok(output)
    }
}
