use crate::error::CliError;
use connectors::BackendContext;
use model::ColumnDescriptor;
use planner::CapabilitySet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The column catalog and backend a filter is compiled for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushdownConfig {
    pub columns: Vec<ColumnDescriptor>,
    pub backend: BackendContext,
    /// Overrides the backend's preset capability set.
    #[serde(default)]
    pub capabilities: Option<CapabilitySet>,
}

impl PushdownConfig {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let source = tokio::fs::read_to_string(path).await?;
        let config = serde_json::from_str(&source)?;
        Ok(config)
    }

    pub fn capabilities(&self) -> CapabilitySet {
        self.capabilities
            .clone()
            .unwrap_or_else(|| self.backend.capabilities())
    }
}
