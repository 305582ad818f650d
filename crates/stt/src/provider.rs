pub(crate) mod elevenlabs;

use std::path::Path;

use async_trait::async_trait;

use crate::{
    error::ProviderError,
    options::ProviderParams,
    types::{AsyncAcknowledgement, TranscriptionResult},
};

/// Audio handed to the provider
#[derive(Debug, Clone, Copy)]
pub enum AudioSource<'a> {
    /// The provider fetches the audio itself
    CloudStorageUrl(&'a str),
    /// Local file, uploaded with the request
    File { path: &'a Path, file_name: &'a str },
}

/// Successful provider answer
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertResponse {
    /// The transcript, single or multichannel
    Transcript(TranscriptionResult),
    /// Webhook delivery was scheduled
    Webhook(AsyncAcknowledgement),
}

/// Trait for speech-to-text provider implementations
#[async_trait]
pub trait SpeechToTextProvider: Send + Sync {
    /// Transcribe audio with the given parameters
    ///
    /// Webhook parameters yield [`ConvertResponse::Webhook`].
    async fn convert(
        &self,
        source: AudioSource<'_>,
        params: &ProviderParams,
    ) -> Result<ConvertResponse, ProviderError>;

    /// Get the provider name
    fn name(&self) -> &str;
}
