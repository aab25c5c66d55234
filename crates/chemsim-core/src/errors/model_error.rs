/// Vector-source errors for embedding model access.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model file {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("malformed model line {line} in {path}: {message}")]
    ParseError {
        path: String,
        line: usize,
        message: String,
    },

    #[error("vector for {id} has {actual} dimensions, expected {expected}")]
    DimensionMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },

    #[error("unknown identifier: {id}")]
    UnknownId { id: String },
}
