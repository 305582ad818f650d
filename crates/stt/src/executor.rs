//! The four transcription operations

use std::sync::Arc;

use murmur_blob::{FileReference, Loader, Persister};
use tempfile::NamedTempFile;

use crate::{
    classify::{Classifier, Disposition, classify},
    error::{Result, SttError},
    options::{ProviderParams, normalize, normalize_async},
    provider::{AudioSource, ConvertResponse, SpeechToTextProvider},
    routing::route,
    types::{
        AsyncAcknowledgement, ConvertFileAsyncRequest, ConvertFileRequest, ConvertUrlAsyncRequest, ConvertUrlRequest,
        OutputConfig, TranscriptionResult,
    },
};

/// Upload name used when the reference has no file name
const FALLBACK_FILE_NAME: &str = "audio";

/// Executes transcriptions against the provider
///
/// File inputs are staged in a temporary file that lives exactly as long
/// as the operation, including when it fails or is cancelled.
pub struct Executor {
    provider: Arc<dyn SpeechToTextProvider>,
    loader: Arc<dyn Loader>,
    persister: Arc<dyn Persister>,
    classifier: Classifier,
}

impl Executor {
    pub fn new(
        provider: Arc<dyn SpeechToTextProvider>,
        loader: Arc<dyn Loader>,
        persister: Arc<dyn Persister>,
    ) -> Self {
        Self {
            provider,
            loader,
            persister,
            classifier: classify,
        }
    }

    /// Replace the provider error classification
    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Transcribe audio the provider fetches from a URL
    pub async fn convert_url(&self, request: &ConvertUrlRequest) -> Result<TranscriptionResult> {
        tracing::info!(url = %request.url, "transcribing audio url");

        let params = normalize(&request.options)?;
        let response = self
            .invoke(AudioSource::CloudStorageUrl(&request.url), &params)
            .await?;

        self.respond(&request.output, response).await
    }

    /// Schedule webhook delivery of a URL transcription
    pub async fn convert_url_async(&self, request: &ConvertUrlAsyncRequest) -> Result<AsyncAcknowledgement> {
        tracing::info!(url = %request.url, "scheduling audio url transcription");

        let params = normalize_async(&request.options)?;
        let response = self
            .invoke(AudioSource::CloudStorageUrl(&request.url), &params)
            .await?;

        acknowledge(response)
    }

    /// Transcribe a referenced audio file
    pub async fn convert_file(&self, request: &ConvertFileRequest) -> Result<TranscriptionResult> {
        tracing::info!(file = %request.file, "transcribing audio file");

        let params = normalize(&request.options)?;
        let staged = self.stage(&request.file).await?;
        let response = self
            .invoke(staged_source(&request.file, &staged), &params)
            .await?;
        drop(staged);

        self.respond(&request.output, response).await
    }

    /// Schedule webhook delivery of a file transcription
    pub async fn convert_file_async(&self, request: &ConvertFileAsyncRequest) -> Result<AsyncAcknowledgement> {
        tracing::info!(file = %request.file, "scheduling audio file transcription");

        let params = normalize_async(&request.options)?;
        let staged = self.stage(&request.file).await?;
        let response = self
            .invoke(staged_source(&request.file, &staged), &params)
            .await?;

        acknowledge(response)
    }

    async fn stage(&self, reference: &FileReference) -> Result<NamedTempFile> {
        let staged = tokio::task::spawn_blocking(|| tempfile::Builder::new().prefix("murmur-").tempfile())
            .await
            .map_err(|e| SttError::Staging(std::io::Error::other(e)))?
            .map_err(SttError::Staging)?;

        self.loader.load(reference, staged.path()).await?;

        tracing::debug!(file = %reference, staged = %staged.path().display(), "staged audio file");

        Ok(staged)
    }

    async fn invoke(&self, source: AudioSource<'_>, params: &ProviderParams) -> Result<ConvertResponse> {
        self.provider
            .convert(source, params)
            .await
            .map_err(|error| match (self.classifier)(&error) {
                Disposition::Permanent { message, status } => {
                    tracing::warn!(
                        provider = self.provider.name(),
                        status,
                        "provider rejected request permanently: {message}"
                    );
                    SttError::Terminal { status, message }
                }
                Disposition::Transient => {
                    tracing::warn!(provider = self.provider.name(), "transient provider failure: {error}");
                    SttError::Provider(error)
                }
            })
    }

    async fn respond(&self, output: &OutputConfig, response: ConvertResponse) -> Result<TranscriptionResult> {
        match response {
            ConvertResponse::Transcript(result) => route(output, result, self.persister.as_ref()).await,
            ConvertResponse::Webhook(_) => Err(SttError::UnexpectedResponse(
                "webhook acknowledgement for a synchronous transcription".to_string(),
            )),
        }
    }
}

fn staged_source<'a>(reference: &'a FileReference, staged: &'a NamedTempFile) -> AudioSource<'a> {
    AudioSource::File {
        path: staged.path(),
        file_name: reference.file_name().unwrap_or(FALLBACK_FILE_NAME),
    }
}

fn acknowledge(response: ConvertResponse) -> Result<AsyncAcknowledgement> {
    match response {
        ConvertResponse::Webhook(acknowledgement) => Ok(acknowledgement),
        ConvertResponse::Transcript(_) => Err(SttError::UnexpectedResponse(
            "transcript for a webhook transcription".to_string(),
        )),
    }
}
