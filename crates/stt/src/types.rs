use http::{HeaderName, HeaderValue};
use indexmap::IndexMap;
use murmur_blob::FileReference;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Largest seed the provider accepts
pub const MAX_SEED: u32 = 2_147_483_647;

/// Request payloads checked before they reach the executor
pub trait Validate {
    /// Reject values the provider would never accept
    fn validate(&self) -> Result<(), String>;
}

/// Granularity of timestamps in the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampsGranularity {
    None,
    Word,
    Character,
}

impl TimestampsGranularity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Word => "word",
            Self::Character => "character",
        }
    }
}

/// Encoding of the input audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    /// 16-bit little-endian PCM, 16kHz, mono
    #[serde(rename = "pcm_s16le_16")]
    PcmS16le16,
    /// Any encoded waveform
    #[serde(rename = "other")]
    Other,
}

impl FileFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PcmS16le16 => "pcm_s16le_16",
            Self::Other => "other",
        }
    }
}

/// Additional transcript export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    SegmentedJson,
    Docx,
    Pdf,
    Txt,
    Html,
    Srt,
}

/// One requested export, with format specific settings passed through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub format: ExportFormat,
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

/// Per-call options for the provider request itself
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Overall timeout of the provider call
    #[serde(default)]
    pub timeout_in_seconds: Option<u64>,
    /// Extra headers sent to the provider
    #[serde(default)]
    pub additional_headers: IndexMap<String, String>,
    /// Extra query parameters sent to the provider
    #[serde(default)]
    pub additional_query_parameters: IndexMap<String, String>,
    /// Extra form fields sent to the provider
    #[serde(default)]
    pub additional_body_parameters: Map<String, Value>,
}

/// Transcription options
///
/// Every optional field distinguishes "not given" (the provider picks a
/// default) from an explicit value, including explicit `false`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscriptionOptions {
    /// Model to transcribe with, e.g. `scribe_v1`
    pub model_id: String,
    /// `false` requests zero retention mode
    pub enable_logging: Option<bool>,
    /// ISO-639-1 or ISO-639-3 language of the audio
    pub language_code: Option<String>,
    /// Tag events like (laughter) in the transcript
    pub tag_audio_events: Option<bool>,
    /// Upper bound on the number of speakers
    pub num_speakers: Option<u32>,
    pub timestamps_granularity: Option<TimestampsGranularity>,
    /// Annotate which speaker is talking
    pub diarize: Option<bool>,
    /// Only meaningful with `diarize` set and `num_speakers` unset
    pub diarization_threshold: Option<f64>,
    pub additional_formats: Option<Vec<ExportOptions>>,
    pub file_format: Option<FileFormat>,
    /// Sampling temperature between 0.0 and 2.0
    pub temperature: Option<f64>,
    /// Best-effort deterministic sampling seed
    pub seed: Option<u32>,
    /// Transcribe every channel independently
    pub use_multi_channel: Option<bool>,
    pub request_options: Option<RequestOptions>,
}

impl Validate for TranscriptionOptions {
    fn validate(&self) -> Result<(), String> {
        if self.model_id.trim().is_empty() {
            return Err("options.model_id must not be empty".to_string());
        }

        if let Some(temperature) = self.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            return Err(format!("options.temperature must be between 0.0 and 2.0, got {temperature}"));
        }

        if let Some(seed) = self.seed
            && seed > MAX_SEED
        {
            return Err(format!("options.seed must be between 0 and {MAX_SEED}, got {seed}"));
        }

        if let Some(request_options) = &self.request_options {
            request_options.validate()?;
        }

        Ok(())
    }
}

impl Validate for RequestOptions {
    fn validate(&self) -> Result<(), String> {
        for (name, value) in &self.additional_headers {
            if HeaderName::from_bytes(name.as_bytes()).is_err() {
                return Err(format!("options.request_options.additional_headers: invalid header name {name:?}"));
            }
            if HeaderValue::from_str(value).is_err() {
                return Err(format!("options.request_options.additional_headers: invalid value for {name}"));
            }
        }

        Ok(())
    }
}

/// Metadata echoed back in the webhook delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WebhookMetadata {
    /// Pre-encoded JSON object
    Text(String),
    /// Object, encoded before forwarding
    Object(Map<String, Value>),
}

impl WebhookMetadata {
    /// Provider wire form, always a JSON string
    pub fn to_form_value(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Object(object) => Value::Object(object.clone()).to_string(),
        }
    }
}

/// Options for webhook-delivered transcriptions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AsyncTranscriptionOptions {
    #[serde(flatten)]
    pub transcription: TranscriptionOptions,
    /// Deliver to this webhook only, instead of every configured one
    pub webhook_id: Option<String>,
    /// Metadata included in the webhook payload (depth 2, 16KB at most)
    pub webhook_metadata: Option<WebhookMetadata>,
}

impl Validate for AsyncTranscriptionOptions {
    fn validate(&self) -> Result<(), String> {
        self.transcription.validate()
    }
}

/// Where the transcript goes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Persist the transcript here
    pub destination: Option<FileReference>,
    /// Include the transcript in the response
    #[serde(rename = "return")]
    pub return_result: Option<bool>,
}

/// `speechToTextConvertUrl` request
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertUrlRequest {
    /// HTTPS URL of the audio, may be pre-signed
    pub url: String,
    pub options: TranscriptionOptions,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `speechToTextConvertUrlAsync` request
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertUrlAsyncRequest {
    pub url: String,
    pub options: AsyncTranscriptionOptions,
}

/// `speechToTextConvertFile` request
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertFileRequest {
    /// Audio file, as a URL or a path in the configured store
    pub file: FileReference,
    pub options: TranscriptionOptions,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `speechToTextConvertFileAsync` request
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertFileAsyncRequest {
    pub file: FileReference,
    pub options: AsyncTranscriptionOptions,
}

fn validate_url(url: &str) -> Result<(), String> {
    if url.trim().is_empty() {
        return Err("url must not be empty".to_string());
    }
    Ok(())
}

impl Validate for ConvertUrlRequest {
    fn validate(&self) -> Result<(), String> {
        validate_url(&self.url)?;
        self.options.validate()
    }
}

impl Validate for ConvertUrlAsyncRequest {
    fn validate(&self) -> Result<(), String> {
        validate_url(&self.url)?;
        self.options.validate()
    }
}

impl Validate for ConvertFileRequest {
    fn validate(&self) -> Result<(), String> {
        self.options.validate()
    }
}

impl Validate for ConvertFileAsyncRequest {
    fn validate(&self) -> Result<(), String> {
        self.options.validate()
    }
}

/// Character level timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
}

/// Word, spacing or audio event with timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<f64>,
    /// `word`, `spacing` or `audio_event`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logprob: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<Vec<Character>>,
}

/// Transcript rendered in a requested export format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalFormat {
    pub requested_format: String,
    pub file_extension: String,
    pub content_type: String,
    #[serde(default, alias = "is_base_64_encoded")]
    pub is_base64_encoded: bool,
    pub content: String,
}

/// Transcript returned by the synchronous operations
///
/// Every field is optional: an empty object means the transcript was
/// produced but withheld from the response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    /// Detected language, e.g. `eng`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    /// Confidence of the language detection (0 to 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<Word>>,
    /// Channel this transcript belongs to (multichannel audio)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_index: Option<u32>,
    /// Requested exports; entries the provider left out are `null`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_formats: Option<Vec<Option<AdditionalFormat>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription_id: Option<String>,
    /// Per-channel transcripts for multichannel requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcripts: Option<Vec<TranscriptionResult>>,
}

/// Acknowledgement that a webhook delivery was scheduled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsyncAcknowledgement {
    pub message: String,
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription_id: Option<String>,
}
