//! Test server wrapper that starts murmur on a random port

use std::net::SocketAddr;

use murmur_config::Config;
use murmur_server::Server;
use tokio_util::sync::CancellationToken;

/// Manifest versions the runtime negotiates during discovery
const DISCOVERY_ACCEPT: &str = "application/vnd.restate.endpointmanifest.v3+json, \
                                application/vnd.restate.endpointmanifest.v2+json, \
                                application/vnd.restate.endpointmanifest.v1+json";

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test server with the given configuration
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        let server = Server::new(&config)?;
        let shutdown = CancellationToken::new();

        // Bind the listener here so we know the actual port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let token = shutdown.clone();
        tokio::spawn(async move {
            server.serve_listener(listener, token).await.ok();
        });

        // The runtime talks HTTP/2 without upgrade negotiation
        let client = reqwest::Client::builder().http2_prior_knowledge().build()?;

        Ok(Self {
            addr,
            shutdown,
            client,
        })
    }

    /// Base URL of the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Fetch the endpoint manifest the way the runtime does
    pub async fn discover(&self) -> reqwest::Response {
        self.client
            .get(self.url("/discover"))
            .header("accept", DISCOVERY_ACCEPT)
            .send()
            .await
            .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
