//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which builds a full [`AppContext`] from a test
//! config. The `with_server_*` constructors start Axum on a random port for
//! HTTP-level testing.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use vidrelay::config::Config;
use vidrelay::server::{create_router, AppContext};
use vidrelay::signaling::PeerFactory;

/// Test harness wrapping a fully-constructed [`AppContext`].
pub struct TestHarness {
    pub ctx: AppContext,
}

impl TestHarness {
    /// Create a new harness with the given configuration and no peer factory.
    pub fn with_config(config: Config) -> Self {
        Self {
            ctx: AppContext {
                config: Arc::new(config),
                peers: None,
            },
        }
    }

    /// Create a new harness with a peer factory for signaling tests.
    pub fn with_peers(config: Config, peers: Arc<dyn PeerFactory>) -> Self {
        Self {
            ctx: AppContext {
                config: Arc::new(config),
                peers: Some(peers),
            },
        }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server_config(config: Config) -> (Self, SocketAddr) {
        Self::with_config(config).serve().await
    }

    /// Start an Axum server with a peer factory on a random port.
    pub async fn with_server_peers(
        config: Config,
        peers: Arc<dyn PeerFactory>,
    ) -> (Self, SocketAddr) {
        Self::with_peers(config, peers).serve().await
    }

    async fn serve(self) -> (Self, SocketAddr) {
        let app = create_router(self.ctx.clone(), None);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (self, addr)
    }
}

/// Build a config pointing at `video_path` with a custom chunk size.
pub fn video_config(video_path: &Path, chunk_size: u64) -> Config {
    let mut config = Config::default();
    config.media.video_path = video_path.to_path_buf();
    config.media.chunk_size = chunk_size;
    config
}
