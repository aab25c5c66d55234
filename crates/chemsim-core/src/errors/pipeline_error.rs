//! Pipeline errors aggregating subsystem errors via `From` conversions.

use super::{ConfigError, ModelError, SimilarityError, WriteError};

/// Errors that can abort a similarity run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("similarity error: {0}")]
    Similarity(#[from] SimilarityError),

    #[error("write error: {0}")]
    Write(#[from] WriteError),
}

/// Result alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
