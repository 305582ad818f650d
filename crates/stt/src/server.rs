use std::sync::Arc;

use murmur_blob::BlobStore;
use murmur_config::Config;

use crate::{
    classify::Classifier,
    error::SttError,
    executor::Executor,
    provider::elevenlabs::ElevenLabsProvider,
    service::SpeechToTextService,
};

/// Builder for constructing the STT service from configuration
pub struct SttServerBuilder<'a> {
    config: &'a Config,
    classifier: Option<Classifier>,
}

impl<'a> SttServerBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            classifier: None,
        }
    }

    /// Replace the default provider error classification
    #[must_use]
    pub fn classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn build(self) -> crate::error::Result<SpeechToTextService> {
        self.build_executor().map(SpeechToTextService::new)
    }

    /// Build the executor alone, without handler registration
    pub fn build_executor(self) -> crate::error::Result<Executor> {
        let provider = &self.config.provider;
        tracing::debug!(
            "Initializing ElevenLabs provider at {}",
            provider.base_url.as_deref().unwrap_or("default endpoint")
        );

        let provider = Arc::new(
            ElevenLabsProvider::new(provider.api_key.clone(), provider.base_url.clone())
                .map_err(|e| SttError::ConfigError(format!("Failed to build HTTP client: {e}")))?,
        );

        let blobs = Arc::new(
            BlobStore::from_config(&self.config.store)
                .map_err(|e| SttError::ConfigError(format!("Invalid store configuration: {e}")))?,
        );

        let mut executor = Executor::new(provider, blobs.clone(), blobs);
        if let Some(classifier) = self.classifier {
            executor = executor.with_classifier(classifier);
        }

        tracing::debug!(
            "STT service initialized, inactivity timeout {:?}",
            self.config.service.inactivity_timeout
        );

        Ok(executor)
    }
}
