use thiserror::Error;

/// Errors raised while loading or persisting blobs
#[derive(Debug, Error)]
pub enum BlobError {
    /// No object store understands the reference's scheme
    #[error("unsupported file reference '{0}'")]
    UnsupportedReference(String),

    /// The path cannot be expressed as an object store location
    #[error("invalid file path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    /// The object store rejected the operation
    #[error("object store error: {0}")]
    Store(#[from] object_store::Error),

    /// Local filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BlobError {
    /// Whether retrying the operation can never succeed
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::UnsupportedReference(_) | Self::InvalidPath { .. })
    }
}
