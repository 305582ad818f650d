use std::net::SocketAddr;

use murmur_config::Config;
use restate_sdk::prelude::{Endpoint, HttpServer};
use stt::SpeechToText;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Port the durable-execution runtime expects service endpoints on
const DEFAULT_PORT: u16 = 9080;

/// Assembled service endpoint
pub struct Server {
    endpoint: Endpoint,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the speech-to-text service fails to initialize or
    /// an identity key cannot be parsed
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)));

        let service = stt::build_server(config)?;
        let mut builder = Endpoint::builder().bind_with_options(service.serve(), stt::service_options(&config.service));

        if config.service.identity_keys.is_empty() {
            tracing::debug!("request identity verification disabled");
        } else {
            for key in &config.service.identity_keys {
                builder = builder
                    .identity_key(key)
                    .map_err(|e| anyhow::anyhow!("invalid identity key '{key}': {e}"))?;
            }
            tracing::debug!(
                keys = config.service.identity_keys.len(),
                "request identity verification enabled"
            );
        }

        tracing::info!("registered speech-to-text service");

        Ok(Self {
            endpoint: builder.build(),
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Start serving requests on the configured address
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener fails
    pub async fn serve(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.listen_address).await?;
        self.serve_listener(listener, shutdown).await
    }

    /// Start serving requests on an already bound listener
    ///
    /// # Errors
    ///
    /// Returns an error if the listener has no local address
    pub async fn serve_listener(self, listener: TcpListener, shutdown: CancellationToken) -> anyhow::Result<()> {
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        HttpServer::new(self.endpoint)
            .serve_with_cancel(listener, async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await;

        Ok(())
    }
}
