//! Test server harness.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use fitscore::embedding::{EmbedderConfig, TextEmbedder};
use fitscore::predictor::lm::{LmConfig, MockChatApi};
use fitscore::predictor::{LinearPredictor, PredictorRegistry};
use fitscore::regression::RidgeWeights;
use fitscore::service::{create_router, AppState};

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    /// Canned chat-completion reply for the mocked remote model.
    pub mock_reply: Option<String>,
    /// Ridge coefficient applied uniformly to every feature.
    pub ridge_coefficient: f32,
    /// Ridge intercept.
    pub ridge_intercept: f32,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            mock_reply: Some("<thought>solid overlap</thought><score>80</score>".to_string()),
            ridge_coefficient: 0.0,
            ridge_intercept: 0.5,
        }
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    _temp_dir: TempDir,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

/// Spawns a fully-mocked test server: stub embedder, temp-file ridge weights
/// and a canned remote-model API. No network or model files required.
pub async fn spawn_test_server(
    config: TestServerConfig,
) -> Result<TestServer, ServerStartupError> {
    let embedder = Arc::new(
        TextEmbedder::load(EmbedderConfig::stub())
            .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?,
    );

    let temp_dir = tempfile::tempdir()?;
    let weights_path = temp_dir.path().join("ridge.json");
    let weights = RidgeWeights {
        weights: vec![config.ridge_coefficient; 2 * embedder.embedding_dim()],
        intercept: config.ridge_intercept,
    };
    std::fs::write(
        &weights_path,
        serde_json::to_string(&weights)
            .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?,
    )?;

    let linear = Arc::new(
        LinearPredictor::load(embedder, &weights_path)
            .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?,
    );

    let chat_api = match &config.mock_reply {
        Some(reply) => MockChatApi::with_reply(reply.clone()),
        None => MockChatApi::failing(),
    };

    let registry = Arc::new(
        PredictorRegistry::new(linear, LmConfig::default()).with_chat_api(Arc::new(chat_api)),
    );

    let app = create_router(AppState::new(registry));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server_handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    wait_for_server_ready(
        addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
        _temp_dir: temp_dir,
    })
}
