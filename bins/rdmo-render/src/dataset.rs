use serde::Deserialize;

use rdmo_api::{Project, Snapshot, Value};
use rdmo_views::ProjectContext;
use storage_memory::MemoryStorage;

use crate::error::CliError;

/// Exported project: the project, its snapshots and all stored values.
#[derive(Debug, Deserialize)]
pub struct Dataset {
    pub project: Project,
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
    #[serde(default)]
    pub values: Vec<Value>,
}

impl Dataset {
    pub fn load(path: &str) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Dataset { context: "read", detail: format!("'{path}': {e}") })?;
        Self::parse(&content)
            .map_err(|e| CliError::Dataset { context: "parse", detail: format!("'{path}': {e}") })
    }

    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Project context, frozen in `snapshot` if given.
    pub fn context(&self, snapshot: Option<i64>) -> Result<ProjectContext, CliError> {
        match snapshot {
            None => Ok(ProjectContext::new(self.project.clone())),
            Some(id) => {
                let snapshot = self
                    .snapshots
                    .iter()
                    .find(|s| s.id == id && s.project == self.project.id)
                    .ok_or(CliError::SnapshotNotFound(id))?;
                Ok(ProjectContext::with_snapshot(self.project.clone(), snapshot.clone()))
            }
        }
    }

    /// Load the values into a fresh memory storage.
    pub fn into_storage(self) -> Result<MemoryStorage, CliError> {
        Ok(MemoryStorage::with_values(self.values)?)
    }
}
