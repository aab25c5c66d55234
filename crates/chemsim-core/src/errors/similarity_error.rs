/// Errors raised by the pairwise similarity engine.
#[derive(Debug, thiserror::Error)]
pub enum SimilarityError {
    /// A vector with zero norm has no direction, so cosine similarity is
    /// undefined. Detected at engine construction so the run aborts
    /// before any output is written.
    #[error("cosine similarity undefined for {id}: vector has zero norm")]
    UndefinedSimilarity { id: String },

    #[error("vector for {id} has {actual} dimensions, expected {expected}")]
    DimensionMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },
}
