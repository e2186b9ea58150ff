use rdmo_api::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("attribute {0} is not supported")]
    UnsupportedAttribute(String),

    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    #[error("config error: {0}")]
    Config(String),
}

impl ViewError {
    /// Add context to the error.
    ///
    /// For `Storage` variant, context is added to the inner `StorageError`.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            ViewError::Storage(e) => ViewError::Storage(e.with_context(ctx)),
            ViewError::Config(msg) => ViewError::Config(format!("{ctx}: {msg}")),
            other => other,
        }
    }
}
