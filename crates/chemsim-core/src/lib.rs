//! # chemsim-core
//!
//! Pairwise cosine similarity tables for chemical entity embeddings.
//! Selects chemical identifiers from an embedding vocabulary by CURIE
//! prefix, streams every pairwise cosine similarity exactly once in a
//! fixed order, writes the thresholded edge list as gzipped TSV, and
//! accumulates the weighted-degree statistics of the induced graph.

pub mod config;
pub mod constants;
pub mod errors;
pub mod filter;
pub mod graph;
pub mod model;
pub mod pairs;
pub mod pipeline;
pub mod report;
pub mod select;
pub mod write;

// Re-export the most commonly used types at the crate root.
pub use config::{CalculateConfig, CliOverrides};
pub use errors::{PipelineError, PipelineResult};
pub use model::{InMemorySource, TsvSource, VectorSource};
pub use pipeline::{run, RunSummary};
