//! Filter units and how they are resolved by name

pub mod command;
pub mod discovery;
pub mod error;
pub mod registry;

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub use command::CommandFilter;
pub use discovery::{discover, DiscoveryError, DEFAULT_FILTERS_DIR};
pub use error::FilterError;
pub use registry::{FilterRegistry, FnFilter};

/// A transformation unit invoked by a pipeline step
///
/// Receives the composed parameter list and returns a single value.
#[async_trait]
pub trait Filter: Send + Sync {
    async fn apply(&self, params: Vec<Value>) -> Result<Value, FilterError>;
}

/// Looks up filters by name - allows for different sources of filters
pub trait FilterResolver: Send + Sync {
    /// Return the filter registered under `name`, or `None` if unknown
    fn resolve(&self, name: &str) -> Option<Arc<dyn Filter>>;
}
