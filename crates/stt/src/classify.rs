//! Provider error classification

use serde_json::Value;

use crate::error::ProviderError;

/// How a provider failure is handed to the durable runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Never retry; fail the invocation with this message and status
    Permanent { message: String, status: u16 },
    /// Leave it to the runtime's retry policy
    Transient,
}

/// Classification strategy used by the executor
pub type Classifier = fn(&ProviderError) -> Disposition;

/// Default classification
///
/// Only a provider `400` is permanent. Rate limiting, authentication and
/// server errors are retried.
// TODO: treat 401/403/404/422 as permanent once ElevenLabs' error codes for
// invalid model ids and unreadable audio are pinned down.
pub fn classify(error: &ProviderError) -> Disposition {
    match error {
        ProviderError::Api { status, body } if *status == Some(400) => permanent(*status, body),
        _ => Disposition::Transient,
    }
}

/// Permanent disposition for a provider error response
///
/// Responses without a status are reported as `500`.
pub fn permanent(status: Option<u16>, body: &Value) -> Disposition {
    Disposition::Permanent {
        message: error_message(body),
        status: status.unwrap_or(500),
    }
}

/// Human readable message of a provider error body
///
/// Structured bodies carry it at `detail.message`; anything else is
/// rendered whole.
pub fn error_message(body: &Value) -> String {
    match body.pointer("/detail/message") {
        Some(Value::String(message)) => message.clone(),
        Some(message) => message.to_string(),
        None => match body {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        },
    }
}
