//! Programmatic configuration builder for integration tests

use std::{net::SocketAddr, time::Duration};

use murmur_config::{Config, ProviderConfig, ServerConfig, ServiceConfig, StoreConfig, TelemetryConfig};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder pointed at a mock provider
    pub fn new(provider_base_url: &str) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                },
                service: ServiceConfig::default(),
                store: StoreConfig::default(),
                provider: ProviderConfig {
                    api_key: SecretString::from("test-key"),
                    base_url: Some(provider_base_url.to_owned()),
                },
                telemetry: TelemetryConfig::default(),
            },
        }
    }

    /// Set the abort timeout advertised to the runtime
    pub fn with_abort_timeout(mut self, timeout: Duration) -> Self {
        self.config.service.abort_timeout = Some(timeout);
        self
    }

    /// Only accept requests signed by the runtime holding this key
    pub fn with_identity_key(mut self, key: &str) -> Self {
        self.config.service.identity_keys.push(key.to_owned());
        self
    }

    /// Resolve path references against a store URL
    pub fn with_store(mut self, url: &str) -> Self {
        self.config.store.url = Some(url.parse().expect("valid URL"));
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
