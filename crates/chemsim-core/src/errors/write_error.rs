/// I/O errors from the streaming edge-list writer.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to create output file {path}: {source}")]
    Create {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write to {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to finalize {path}: {source}")]
    Finish {
        path: String,
        source: std::io::Error,
    },
}
