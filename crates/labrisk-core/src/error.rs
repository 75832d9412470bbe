use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LabRiskError {
    #[error("failed to load catalog from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    #[error("invalid catalog record: {0}")]
    CatalogInvalid(String),

    #[error("failed to load scoring config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid scoring config: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Failure of a single analysis request. Either the whole request is
/// rejected or a complete result is produced; there is no partial state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("invalid request: {}", errors.join("; "))]
    InvalidRequest { errors: Vec<String> },

    #[error("internal analysis failure: {0}")]
    Internal(String),
}

impl AnalysisError {
    /// Messages to surface to the caller, one per problem found.
    pub fn messages(&self) -> Vec<String> {
        match self {
            AnalysisError::InvalidRequest { errors } => errors.clone(),
            AnalysisError::Internal(msg) => vec![msg.clone()],
        }
    }
}
