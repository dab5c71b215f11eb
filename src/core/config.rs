//! Pipeline configuration loading and validation

use crate::core::{error::ConfigError, step::StepDefinition};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;
use tracing::debug;

/// Conventional configuration file name in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config-filters.json";

/// Step id used as the entry point when nothing else is specified
pub const DEFAULT_ENTRY_STEP: &str = "1";

/// Text format of a configuration document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from a file extension (YAML for `.yaml`/`.yml`, JSON otherwise)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }

    fn name(self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Yaml => "yaml",
        }
    }
}

/// A validated pipeline configuration
///
/// Only constructed through validation, so every `next` is known to point at
/// an existing step and the `next` chain contains no cycles.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineConfig {
    /// Optional default entry step declared in the document
    entry: Option<String>,

    /// Step graph keyed by step id
    steps: BTreeMap<String, StepDefinition>,
}

impl PipelineConfig {
    /// Load and validate a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, ConfigFormat::from_path(path))
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::parse(json, ConfigFormat::Json)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, ConfigFormat::Yaml)
    }

    /// Parse text in the given format, then validate the resulting document
    pub fn parse(text: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let mut document: Value = match format {
            ConfigFormat::Json => serde_json::from_str::<Value>(text).map_err(|e| e.to_string()),
            ConfigFormat::Yaml => serde_yaml::from_str::<Value>(text).map_err(|e| e.to_string()),
        }
        .map_err(|message| ConfigError::Parse {
            format: format.name(),
            message,
        })?;

        if format == ConfigFormat::Yaml {
            Self::stringify_scalar_next(&mut document);
        }

        Self::validate(&document)
    }

    /// YAML turns a `2:` step key into the string "2" but reads `next: 2`
    /// as a number, so scalar `next` values are compared as text
    fn stringify_scalar_next(document: &mut Value) {
        let Some(Value::Object(steps)) = document.get_mut("steps") else {
            return;
        };

        for step in steps.values_mut() {
            if let Some(next) = step.get_mut("next") {
                let text = match next {
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                *next = Value::String(text);
            }
        }
    }

    /// Validate a parsed document and build the step graph.
    ///
    /// Checks run in a fixed order and the first failure wins: steps present,
    /// steps non-empty, then per step (sorted by id) filter, params and next,
    /// and finally that no `next` chain loops back on itself.
    pub fn validate(document: &Value) -> Result<Self, ConfigError> {
        let raw_steps = match document.get("steps") {
            None | Some(Value::Null) => return Err(ConfigError::MissingSteps),
            Some(Value::Object(map)) => map,
            Some(_) => return Err(ConfigError::InvalidSteps),
        };

        if raw_steps.is_empty() {
            return Err(ConfigError::EmptySteps);
        }

        let ids: BTreeSet<&str> = raw_steps.keys().map(String::as_str).collect();
        let mut steps = BTreeMap::new();

        for id in &ids {
            let raw = &raw_steps[*id];
            let step = Self::validate_step(id, raw, &ids)?;
            steps.insert(id.to_string(), step);
        }

        Self::check_cycles(&steps)?;

        let entry = document
            .get("entry")
            .and_then(Value::as_str)
            .map(str::to_string);

        debug!("Validated pipeline config with {} steps", steps.len());

        Ok(Self { entry, steps })
    }

    fn validate_step(
        id: &str,
        raw: &Value,
        ids: &BTreeSet<&str>,
    ) -> Result<StepDefinition, ConfigError> {
        let filter = match raw.get("filter") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => {
                return Err(ConfigError::MissingFilter {
                    step_id: id.to_string(),
                })
            }
        };

        let params = match raw.get("params") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(_) => {
                return Err(ConfigError::InvalidParams {
                    step_id: id.to_string(),
                })
            }
        };

        let next = match raw.get("next") {
            None | Some(Value::Null) => None,
            Some(Value::String(next)) if next.is_empty() => None,
            Some(Value::String(next)) if ids.contains(next.as_str()) => Some(next.clone()),
            Some(Value::String(next)) => {
                return Err(ConfigError::DanglingNext {
                    step_id: id.to_string(),
                    next: next.clone(),
                })
            }
            Some(other) => {
                return Err(ConfigError::DanglingNext {
                    step_id: id.to_string(),
                    next: other.to_string(),
                })
            }
        };

        Ok(StepDefinition {
            filter,
            params,
            next,
        })
    }

    /// Reject `next` chains that loop.
    ///
    /// Each step has at most one successor, so walking from any step either
    /// reaches a terminal step or revisits a step from the same walk.
    fn check_cycles(steps: &BTreeMap<String, StepDefinition>) -> Result<(), ConfigError> {
        let mut acyclic: HashSet<&str> = HashSet::new();

        for start in steps.keys() {
            let mut walk: Vec<&str> = Vec::new();
            let mut on_walk: HashSet<&str> = HashSet::new();
            let mut current = Some(start.as_str());

            while let Some(id) = current {
                if acyclic.contains(id) {
                    break;
                }
                if !on_walk.insert(id) {
                    return Err(ConfigError::CyclicNext {
                        step_id: id.to_string(),
                    });
                }
                walk.push(id);
                current = steps.get(id).and_then(|s| s.next.as_deref());
            }

            acyclic.extend(walk);
        }

        Ok(())
    }

    /// Get a step by id
    pub fn step(&self, id: &str) -> Option<&StepDefinition> {
        self.steps.get(id)
    }

    /// All steps, sorted by id
    pub fn steps(&self) -> &BTreeMap<String, StepDefinition> {
        &self.steps
    }

    /// The step execution starts at when the caller does not pick one.
    ///
    /// Prefers the declared `entry`, then step `"1"`, then the first step no
    /// other step points at, then the first step id.
    pub fn default_entry(&self) -> &str {
        if let Some(entry) = self.entry.as_deref() {
            return entry;
        }
        if let Some((id, _)) = self.steps.get_key_value(DEFAULT_ENTRY_STEP) {
            return id;
        }

        let targets: HashSet<&str> = self
            .steps
            .values()
            .filter_map(|s| s.next.as_deref())
            .collect();

        self.steps
            .keys()
            .find(|id| !targets.contains(id.as_str()))
            .or_else(|| self.steps.keys().next())
            .map(String::as_str)
            .unwrap_or(DEFAULT_ENTRY_STEP)
    }

    /// Distinct filter names referenced by the graph, each paired with the
    /// first step (by id) that uses it
    pub fn filter_usages(&self) -> BTreeMap<&str, &str> {
        let mut usages = BTreeMap::new();
        for (id, step) in &self.steps {
            usages.entry(step.filter.as_str()).or_insert(id.as_str());
        }
        usages
    }
}
