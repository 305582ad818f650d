//! Option normalization
//!
//! Request options are tri-state: absent, or an explicit value. Only
//! explicit values are forwarded, so the provider applies its own defaults
//! for everything the caller left out.

use std::fmt::Display;

use indexmap::IndexMap;

use crate::types::{
    AsyncTranscriptionOptions, FileFormat, RequestOptions, TimestampsGranularity, TranscriptionOptions,
    WebhookMetadata,
};

/// Parameters for one provider call, holding only the options that were set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderParams {
    form: IndexMap<&'static str, String>,
    query: IndexMap<&'static str, String>,
    request_options: Option<RequestOptions>,
    webhook: bool,
}

impl ProviderParams {
    /// Multipart form fields, in insertion order
    pub fn form(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.form.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Value of one form field
    pub fn form_value(&self, name: &str) -> Option<&str> {
        self.form.get(name).map(String::as_str)
    }

    /// Query parameters, in insertion order
    pub fn query(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.query.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Value of one query parameter
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Whether the provider should answer via webhook
    pub fn is_webhook(&self) -> bool {
        self.webhook
    }

    pub fn request_options(&self) -> Option<&RequestOptions> {
        self.request_options.as_ref()
    }

    fn set_form(&mut self, name: &'static str, value: Option<impl Display>) {
        if let Some(value) = value {
            self.form.insert(name, value.to_string());
        }
    }
}

/// Map transcription options to provider parameters, omitting unset options
///
/// # Errors
///
/// Returns an error if the requested export formats cannot be encoded
pub fn normalize(options: &TranscriptionOptions) -> Result<ProviderParams, serde_json::Error> {
    let mut params = ProviderParams::default();

    params.form.insert("model_id", options.model_id.clone());

    if let Some(enable_logging) = options.enable_logging {
        params.query.insert("enable_logging", enable_logging.to_string());
    }

    params.set_form("language_code", options.language_code.as_ref());
    params.set_form("tag_audio_events", options.tag_audio_events);
    params.set_form("num_speakers", options.num_speakers);
    params.set_form(
        "timestamps_granularity",
        options.timestamps_granularity.map(TimestampsGranularity::as_str),
    );
    params.set_form("diarize", options.diarize);
    params.set_form("diarization_threshold", options.diarization_threshold);
    params.set_form(
        "additional_formats",
        options
            .additional_formats
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?,
    );
    params.set_form("file_format", options.file_format.map(FileFormat::as_str));
    params.set_form("temperature", options.temperature);
    params.set_form("seed", options.seed);
    params.set_form("use_multi_channel", options.use_multi_channel);

    params.request_options.clone_from(&options.request_options);

    Ok(params)
}

/// Like [`normalize`], requesting webhook delivery
///
/// # Errors
///
/// Returns an error if the requested export formats cannot be encoded
pub fn normalize_async(options: &AsyncTranscriptionOptions) -> Result<ProviderParams, serde_json::Error> {
    let mut params = normalize(&options.transcription)?;

    params.webhook = true;
    params.form.insert("webhook", "true".to_string());
    params.set_form("webhook_id", options.webhook_id.as_ref());
    params.set_form(
        "webhook_metadata",
        options.webhook_metadata.as_ref().map(WebhookMetadata::to_form_value),
    );

    Ok(params)
}
