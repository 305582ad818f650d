use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Object store used for audio inputs and transcript outputs
///
/// Path references in requests resolve against `url`. URL references
/// (`s3://bucket/key`, `https://host/file.wav`, `file:///data/a.wav`) open
/// their own store and only receive `client_options`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Base store location, e.g. `s3://bucket/prefix` or `file:///srv/audio`
    #[serde(default)]
    pub url: Option<Url>,
    /// Builder options for the base store (credentials, region, endpoint)
    #[serde(default)]
    pub options: IndexMap<String, SecretString>,
    /// HTTP client options shared by every store (`timeout`, `allow_http`, ...)
    #[serde(default)]
    pub client_options: IndexMap<String, String>,
}
