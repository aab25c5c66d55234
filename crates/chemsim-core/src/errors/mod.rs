//! Error handling for chemsim.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod model_error;
pub mod pipeline_error;
pub mod similarity_error;
pub mod write_error;

pub use config_error::ConfigError;
pub use model_error::ModelError;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use similarity_error::SimilarityError;
pub use write_error::WriteError;
