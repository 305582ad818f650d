#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod provider;
pub mod server;
pub mod service;
pub mod store;
pub mod telemetry;

use serde::Deserialize;

pub use loader::IDENTITY_KEY_PREFIX;
pub use provider::*;
pub use server::*;
pub use service::*;
pub use store::*;
pub use telemetry::*;

/// Top-level murmur configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Durable service registration
    #[serde(default)]
    pub service: ServiceConfig,
    /// Blob store used to load audio and persist transcripts
    #[serde(default)]
    pub store: StoreConfig,
    /// Speech-to-text provider credentials
    pub provider: ProviderConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
