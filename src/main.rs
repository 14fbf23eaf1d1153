//! Fitscore HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use fitscore::config::Config;
use fitscore::embedding::{EmbedderConfig, TextEmbedder};
use fitscore::predictor::lm::LmConfig;
use fitscore::predictor::{LinearPredictor, PredictorRegistry};
use fitscore::service::{create_router, AppState};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
███████╗██╗████████╗███████╗ ██████╗ ██████╗ ██████╗ ███████╗
██╔════╝██║╚══██╔══╝██╔════╝██╔════╝██╔═══██╗██╔══██╗██╔════╝
█████╗  ██║   ██║   ███████╗██║     ██║   ██║██████╔╝█████╗
██╔══╝  ██║   ██║   ╚════██║██║     ██║   ██║██╔══██╗██╔══╝
██║     ██║   ██║   ███████║╚██████╗╚██████╔╝██║  ██║███████╗
╚═╝     ╚═╝   ╚═╝   ╚══════╝ ╚═════╝ ╚═════╝ ╚═╝  ╚═╝╚══════╝

        VACANCY / CANDIDATE MATCHING
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "Fitscore starting"
    );

    let embedder_config = if let Some(path) = &config.encoder_path {
        EmbedderConfig::new(path.clone())
    } else {
        tracing::warn!("No FITSCORE_ENCODER_PATH configured, running embedder in stub mode");
        EmbedderConfig::stub()
    };
    let embedder = Arc::new(TextEmbedder::load(embedder_config)?);

    let linear = Arc::new(LinearPredictor::load(embedder, &config.regressor_path)?);

    let lm_config = LmConfig::from_env();
    tracing::info!(
        api_base_url = %lm_config.api_base_url,
        model = %lm_config.model,
        "Language-model endpoint configured"
    );

    let registry = Arc::new(PredictorRegistry::new(linear, lm_config));
    let app = create_router(AppState::new(registry));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Fitscore shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("FITSCORE_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
