//! `ElevenLabs` speech-to-text as durable handlers
//!
//! The service registers with the durable-execution runtime as
//! `ElevenLabs`. Each handler runs its provider call as one named step, so a
//! retried invocation never transcribes the same audio twice.

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod classify;
mod error;
mod executor;
mod http_client;
mod options;
mod provider;
mod routing;
mod server;
mod service;
mod types;

pub use classify::{Classifier, Disposition, classify, error_message, permanent};
pub use error::{ProviderError, Result, SttError};
pub use executor::Executor;
pub use options::{ProviderParams, normalize, normalize_async};
pub use provider::{AudioSource, ConvertResponse, SpeechToTextProvider};
pub use routing::{render, route, should_return};
pub use server::SttServerBuilder;
pub use service::{
    CONVERT_FILE_ASYNC_STEP, CONVERT_FILE_STEP, CONVERT_URL_ASYNC_STEP, CONVERT_URL_STEP, SpeechToText,
    SpeechToTextService, service_options,
};
pub use types::*;

/// Build the STT service from configuration
///
/// # Errors
///
/// Returns an error if the provider client or blob store fails to initialize
pub fn build_server(config: &murmur_config::Config) -> anyhow::Result<SpeechToTextService> {
    SttServerBuilder::new(config)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to initialize STT server: {e}"))
}

#[cfg(test)]
mod tests {
    use murmur_config::Config;

    use super::*;

    #[test]
    fn builds_from_minimal_config() {
        let config = Config::from_toml("[provider]\napi_key = \"test-key\"").unwrap();
        assert!(build_server(&config).is_ok());
    }

    #[test]
    fn unusable_store_fails_to_build() {
        let config = Config::from_toml(
            r#"
            [store]
            url = "ftp://files.example.com/audio"

            [provider]
            api_key = "test-key"
            "#,
        )
        .unwrap();

        let error = build_server(&config).err().unwrap();
        assert!(error.to_string().contains("store"));
    }
}
