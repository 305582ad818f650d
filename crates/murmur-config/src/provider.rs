use secrecy::SecretString;
use serde::Deserialize;

/// Credentials and endpoint of the `ElevenLabs` speech-to-text API
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// API key sent as `xi-api-key`
    pub api_key: SecretString,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<String>,
}
