//! Spawns a real keyscore server on an ephemeral port for wire-level tests.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use keyscore::constants::DEFAULT_MAX_UPLOAD_BYTES;
use keyscore::embedding::{MiniLmConfig, MiniLmEmbedder};
use keyscore::extract::{MockTextExtractor, PdfTextExtractor};
use keyscore::gateway::{HandlerState, create_router_with_state};
use keyscore::scoring::SimilarityScorer;

pub struct TestServerConfig {
    /// Run the real PDF extraction pipeline instead of the UTF-8 mock.
    pub use_pdf_extractor: bool,
    pub max_upload_bytes: usize,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            use_pdf_extractor: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl TestServerConfig {
    pub fn with_pdf_extractor() -> Self {
        Self {
            use_pdf_extractor: true,
            ..Self::default()
        }
    }
}

pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_test_server(config: TestServerConfig) -> anyhow::Result<TestServer> {
    let embedder = Arc::new(MiniLmEmbedder::load(MiniLmConfig::stub())?);
    let scorer = SimilarityScorer::new();

    let app = if config.use_pdf_extractor {
        create_router_with_state(HandlerState::new(
            embedder,
            Arc::new(PdfTextExtractor::new("eng")),
            scorer,
            config.max_upload_bytes,
        ))
    } else {
        create_router_with_state(HandlerState::new(
            embedder,
            Arc::new(MockTextExtractor::new()),
            scorer,
            config.max_upload_bytes,
        ))
    };

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("test server error: {e}");
        }
    });

    Ok(TestServer { addr, handle })
}
