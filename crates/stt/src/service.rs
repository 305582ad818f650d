//! Handlers registered with the durable-execution runtime

use std::sync::Arc;

use murmur_config::ServiceConfig;
use restate_sdk::{endpoint::ServiceOptions, prelude::*};

use crate::{
    error::SttError,
    executor::Executor,
    types::{
        AsyncAcknowledgement, ConvertFileAsyncRequest, ConvertFileRequest, ConvertUrlAsyncRequest, ConvertUrlRequest,
        TranscriptionResult, Validate,
    },
};

/// Journal names of the provider call each handler runs
pub const CONVERT_URL_STEP: &str = "speech_to_text_convert_url";
pub const CONVERT_URL_ASYNC_STEP: &str = "speech_to_text_convert_url_async";
pub const CONVERT_FILE_STEP: &str = "speech_to_text_convert_file";
pub const CONVERT_FILE_ASYNC_STEP: &str = "speech_to_text_convert_file_async";

/// `ElevenLabs` speech-to-text
///
/// Every handler runs its provider call as one named step, so a retried
/// invocation replays the recorded outcome instead of transcribing again.
#[restate_sdk::service]
#[name = "ElevenLabs"]
pub trait SpeechToText {
    #[name = "speechToTextConvertUrl"]
    async fn convert_url(request: Json<ConvertUrlRequest>) -> Result<Json<TranscriptionResult>, HandlerError>;

    #[name = "speechToTextConvertUrlAsync"]
    async fn convert_url_async(
        request: Json<ConvertUrlAsyncRequest>,
    ) -> Result<Json<AsyncAcknowledgement>, HandlerError>;

    #[name = "speechToTextConvertFile"]
    async fn convert_file(request: Json<ConvertFileRequest>) -> Result<Json<TranscriptionResult>, HandlerError>;

    #[name = "speechToTextConvertFileAsync"]
    async fn convert_file_async(
        request: Json<ConvertFileAsyncRequest>,
    ) -> Result<Json<AsyncAcknowledgement>, HandlerError>;
}

/// Handler implementation over a shared [`Executor`]
#[derive(Clone)]
pub struct SpeechToTextService {
    executor: Arc<Executor>,
}

impl SpeechToTextService {
    pub fn new(executor: Executor) -> Self {
        Self {
            executor: Arc::new(executor),
        }
    }
}

impl SpeechToText for SpeechToTextService {
    async fn convert_url(
        &self,
        ctx: Context<'_>,
        Json(request): Json<ConvertUrlRequest>,
    ) -> Result<Json<TranscriptionResult>, HandlerError> {
        let request = validated(request)?;
        let executor = Arc::clone(&self.executor);

        let result = ctx
            .run(move || async move {
                executor
                    .convert_url(&request)
                    .await
                    .map(Json)
                    .map_err(SttError::into_handler_error)
            })
            .name(CONVERT_URL_STEP)
            .await?;

        Ok(result)
    }

    async fn convert_url_async(
        &self,
        ctx: Context<'_>,
        Json(request): Json<ConvertUrlAsyncRequest>,
    ) -> Result<Json<AsyncAcknowledgement>, HandlerError> {
        let request = validated(request)?;
        let executor = Arc::clone(&self.executor);

        let acknowledgement = ctx
            .run(move || async move {
                executor
                    .convert_url_async(&request)
                    .await
                    .map(Json)
                    .map_err(SttError::into_handler_error)
            })
            .name(CONVERT_URL_ASYNC_STEP)
            .await?;

        Ok(acknowledgement)
    }

    async fn convert_file(
        &self,
        ctx: Context<'_>,
        Json(request): Json<ConvertFileRequest>,
    ) -> Result<Json<TranscriptionResult>, HandlerError> {
        let request = validated(request)?;
        let executor = Arc::clone(&self.executor);

        let result = ctx
            .run(move || async move {
                executor
                    .convert_file(&request)
                    .await
                    .map(Json)
                    .map_err(SttError::into_handler_error)
            })
            .name(CONVERT_FILE_STEP)
            .await?;

        Ok(result)
    }

    async fn convert_file_async(
        &self,
        ctx: Context<'_>,
        Json(request): Json<ConvertFileAsyncRequest>,
    ) -> Result<Json<AsyncAcknowledgement>, HandlerError> {
        let request = validated(request)?;
        let executor = Arc::clone(&self.executor);

        let acknowledgement = ctx
            .run(move || async move {
                executor
                    .convert_file_async(&request)
                    .await
                    .map(Json)
                    .map_err(SttError::into_handler_error)
            })
            .name(CONVERT_FILE_ASYNC_STEP)
            .await?;

        Ok(acknowledgement)
    }
}

/// Reject payloads the provider would never accept, before any step runs
fn validated<T: Validate>(request: T) -> Result<T, TerminalError> {
    request.validate().map_err(|message| {
        tracing::info!("rejecting invalid request: {message}");
        TerminalError::new_with_code(400, format!("Invalid request: {message}"))
    })?;
    Ok(request)
}

/// Registration settings the runtime applies to the service
pub fn service_options(config: &ServiceConfig) -> ServiceOptions {
    let mut options = ServiceOptions::default();

    if let Some(timeout) = config.inactivity_timeout {
        options = options.inactivity_timeout(timeout);
    }
    if let Some(timeout) = config.abort_timeout {
        options = options.abort_timeout(timeout);
    }
    if let Some(retention) = config.journal_retention {
        options = options.journal_retention(retention);
    }

    options
}
