use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::{
    error::ProviderError,
    http_client::http_client,
    options::ProviderParams,
    types::{AsyncAcknowledgement, TranscriptionResult},
};

use super::{AudioSource, ConvertResponse, SpeechToTextProvider};

pub(crate) const DEFAULT_ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io/v1";

/// `ElevenLabs` speech-to-text provider
pub struct ElevenLabsProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl ElevenLabsProvider {
    pub fn new(api_key: SecretString, base_url: Option<String>) -> reqwest::Result<Self> {
        let client = http_client()?;
        let base_url = base_url.unwrap_or_else(|| DEFAULT_ELEVENLABS_API_URL.to_string());

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn form(source: AudioSource<'_>, params: &ProviderParams) -> Result<Form, ProviderError> {
        let mut form = Form::new();

        for (name, value) in params.form() {
            form = form.text(name, value.to_string());
        }

        if let Some(options) = params.request_options() {
            for (name, value) in &options.additional_body_parameters {
                let value = match value {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                form = form.text(name.clone(), value);
            }
        }

        let form = match source {
            AudioSource::CloudStorageUrl(url) => form.text("cloud_storage_url", url.to_string()),
            AudioSource::File { path, file_name } => {
                let file = tokio::fs::File::open(path).await?;
                let length = file.metadata().await?.len();

                form.part(
                    "file",
                    Part::stream_with_length(file, length).file_name(file_name.to_string()),
                )
            }
        };

        Ok(form)
    }
}

#[async_trait]
impl SpeechToTextProvider for ElevenLabsProvider {
    async fn convert(
        &self,
        source: AudioSource<'_>,
        params: &ProviderParams,
    ) -> Result<ConvertResponse, ProviderError> {
        let url = format!("{}/speech-to-text", self.base_url);

        tracing::debug!(
            "ElevenLabs STT request: model={}, webhook={}",
            params.form_value("model_id").unwrap_or_default(),
            params.is_webhook(),
        );

        let form = Self::form(source, params).await?;

        let mut request = self
            .client
            .post(&url)
            .header("xi-api-key", self.api_key.expose_secret())
            .query(&params.query().collect::<Vec<_>>())
            .multipart(form);

        if let Some(options) = params.request_options() {
            request = request.query(&options.additional_query_parameters);
            for (name, value) in &options.additional_headers {
                request = request.header(name.as_str(), value.as_str());
            }
            if let Some(seconds) = options.timeout_in_seconds {
                request = request.timeout(Duration::from_secs(seconds));
            }
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("ElevenLabs request failed: {e}");
            ProviderError::Connection(format!("Failed to send request to ElevenLabs: {e}"))
        })?;

        let status = response.status();

        let body = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read ElevenLabs response body: {e}");
            ProviderError::Connection(format!("Failed to read ElevenLabs response: {e}"))
        })?;

        if !status.is_success() {
            let body = serde_json::from_slice(&body)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));

            tracing::error!("ElevenLabs API error ({status}): {body}");

            return Err(ProviderError::Api {
                status: Some(status.as_u16()),
                body,
            });
        }

        let response = if params.is_webhook() {
            serde_json::from_slice::<AsyncAcknowledgement>(&body).map(ConvertResponse::Webhook)
        } else {
            serde_json::from_slice::<TranscriptionResult>(&body).map(ConvertResponse::Transcript)
        }
        .map_err(|e| {
            tracing::error!("Unreadable ElevenLabs response: {e}");
            ProviderError::InvalidResponse(e.to_string())
        })?;

        tracing::debug!("ElevenLabs STT request complete, {} bytes", body.len());

        Ok(response)
    }

    fn name(&self) -> &str {
        "elevenlabs"
    }
}
