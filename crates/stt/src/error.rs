use murmur_blob::BlobError;
use restate_sdk::prelude::{HandlerError, TerminalError};
use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SttError>;

/// Failures of a provider call, before classification
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status
    #[error("Provider API error ({}): {body}", .status.map_or_else(|| "no status".to_string(), |s| s.to_string()))]
    Api { status: Option<u16>, body: Value },

    /// Network or connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// The provider answered 2xx with a body of the wrong shape
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// The staged audio could not be read
    #[error("Failed to read audio: {0}")]
    Audio(#[from] std::io::Error),
}

/// Speech-to-text invocation errors
#[derive(Debug, Error)]
pub enum SttError {
    /// Malformed or out-of-range request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Permanent failure; the runtime must not retry
    #[error("{message}")]
    Terminal { status: u16, message: String },

    /// Provider failure left to the runtime's retry policy
    #[error(transparent)]
    Provider(ProviderError),

    /// Loading the input or persisting the transcript failed
    #[error("Storage error: {0}")]
    Blob(#[from] BlobError),

    /// The staging file could not be created
    #[error("Failed to stage audio: {0}")]
    Staging(std::io::Error),

    /// The provider answered with the wrong kind of response
    #[error("Unexpected provider response: {0}")]
    UnexpectedResponse(String),

    /// The transcript could not be encoded
    #[error("Failed to encode transcript: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl SttError {
    /// Whether the runtime may retry the invocation
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::InvalidRequest(_) | Self::Terminal { .. } => false,
            Self::Blob(error) => !error.is_terminal(),
            _ => true,
        }
    }

    /// The failure recorded in the journal when this error is permanent
    pub fn terminal(&self) -> Option<TerminalError> {
        match self {
            Self::Terminal { status, message } => Some(TerminalError::new_with_code(*status, message.clone())),
            Self::InvalidRequest(_) | Self::Blob(_) if !self.is_retryable() => {
                Some(TerminalError::new_with_code(400, self.to_string()))
            }
            _ => None,
        }
    }

    /// Convert into the handler result the runtime acts on
    pub fn into_handler_error(self) -> HandlerError {
        match self.terminal() {
            Some(terminal) => {
                tracing::info!(code = terminal.code(), "invocation failed terminally: {self}");
                terminal.into()
            }
            None => {
                tracing::warn!("invocation failed, retryable: {self}");
                self.into()
            }
        }
    }
}
