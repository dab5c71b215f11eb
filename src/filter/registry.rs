//! In-memory filter registry

use crate::filter::{Filter, FilterError, FilterResolver};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Filter backed by a plain Rust function or closure
pub struct FnFilter<F> {
    func: F,
}

impl<F> FnFilter<F>
where
    F: Fn(Vec<Value>) -> Result<Value, FilterError> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F> Filter for FnFilter<F>
where
    F: Fn(Vec<Value>) -> Result<Value, FilterError> + Send + Sync,
{
    async fn apply(&self, params: Vec<Value>) -> Result<Value, FilterError> {
        (self.func)(params)
    }
}

/// Name → filter mapping, populated at startup
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: BTreeMap<String, Arc<dyn Filter>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filter, replacing any previous one with the same name
    pub fn register(&mut self, name: impl Into<String>, filter: Arc<dyn Filter>) -> &mut Self {
        self.filters.insert(name.into(), filter);
        self
    }

    /// Register a closure as a filter
    pub fn register_fn<F>(&mut self, name: impl Into<String>, func: F) -> &mut Self
    where
        F: Fn(Vec<Value>) -> Result<Value, FilterError> + Send + Sync + 'static,
    {
        self.register(name, Arc::new(FnFilter::new(func)))
    }

    /// Registered filter names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl FilterResolver for FilterRegistry {
    fn resolve(&self, name: &str) -> Option<Arc<dyn Filter>> {
        self.filters.get(name).cloned()
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("filters", &self.filters.keys().collect::<Vec<_>>())
            .finish()
    }
}
