//! Step domain model

use serde::Serialize;
use serde_json::Value;

/// A single validated step in a pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepDefinition {
    /// Name of the filter this step invokes
    pub filter: String,

    /// Literal parameters passed after the prior output
    pub params: Vec<Value>,

    /// Step to run after this one (None = terminal step)
    pub next: Option<String>,
}

impl StepDefinition {
    /// Build the argument list for a filter call.
    ///
    /// The entry step gets its own params. Every later step gets the prior
    /// output first, followed by its own params in declared order. A `null`
    /// output is prepended too rather than dropped, so a `CommandFilter`
    /// that prints nothing hands `null` to the next step.
    pub fn compose_params(&self, prior_output: Option<Value>) -> Vec<Value> {
        match prior_output {
            Some(output) => {
                let mut params = Vec::with_capacity(self.params.len() + 1);
                params.push(output);
                params.extend(self.params.iter().cloned());
                params
            }
            None => self.params.clone(),
        }
    }
}

#[cfg(test)]
impl StepDefinition {
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            params: Vec::new(),
            next: None,
        }
    }

    pub fn with_params(mut self, params: Vec<Value>) -> Self {
        self.params = params;
        self
    }

    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.next.is_none()
    }
}
