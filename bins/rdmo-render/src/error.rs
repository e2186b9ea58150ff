#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("dataset ({context}): {detail}")]
    Dataset { context: &'static str, detail: String },

    #[error("snapshot {0} not found in dataset")]
    SnapshotNotFound(i64),

    #[error("{0}")]
    View(#[from] rdmo_views::ViewError),

    #[error("storage: {0}")]
    Storage(#[from] rdmo_api::StorageError),

    #[error("output: {0}")]
    Output(#[from] serde_json::Error),
}
