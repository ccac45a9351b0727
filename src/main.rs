//! Keyscore HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use keyscore::config::Config;
use keyscore::embedding::{EmbeddingError, MiniLmConfig, MiniLmEmbedder};
use keyscore::extract::PdfTextExtractor;
use keyscore::gateway::{HandlerState, create_router_with_state};
use keyscore::scoring::SimilarityScorer;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
██╗  ██╗███████╗██╗   ██╗███████╗ ██████╗ ██████╗ ██████╗ ███████╗
██║ ██╔╝██╔════╝╚██╗ ██╔╝██╔════╝██╔════╝██╔═══██╗██╔══██╗██╔════╝
█████╔╝ █████╗   ╚████╔╝ ███████╗██║     ██║   ██║██████╔╝█████╗
██╔═██╗ ██╔══╝    ╚██╔╝  ╚════██║██║     ██║   ██║██╔══██╗██╔══╝
██║  ██╗███████╗   ██║   ███████║╚██████╗╚██████╔╝██║  ██║███████╗
╚═╝  ╚═╝╚══════╝   ╚═╝   ╚══════╝ ╚═════╝ ╚═════╝ ╚═╝  ╚═╝╚══════╝

        EXTRACT. EMBED. SCORE.
                                                             MIT
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(health_probe());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let embedder = Arc::new(load_embedder(&config)?);
    let extractor = Arc::new(PdfTextExtractor::new(config.ocr_lang.clone()));
    let state = HandlerState::new(
        embedder,
        extractor,
        SimilarityScorer::new(),
        config.max_upload_bytes,
    );

    let addr: SocketAddr = config.socket_addr().parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        upload_cap = config.max_upload_bytes,
        "Keyscore accepting uploads"
    );

    axum::serve(listener, create_router_with_state(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Keyscore stopped cleanly");
    Ok(())
}

/// Loads the sentence encoder, falling back to the stub when unconfigured.
fn load_embedder(config: &Config) -> Result<MiniLmEmbedder, EmbeddingError> {
    let minilm_config = match &config.model_path {
        Some(dir) => MiniLmConfig::new(dir.clone()),
        None => {
            tracing::warn!("KEYSCORE_MODEL_PATH not set; scores will come from the stub embedder");
            MiniLmConfig::stub()
        }
    };

    MiniLmEmbedder::load(minilm_config)
}

/// Container HEALTHCHECK entry: probes `/healthz` on the configured port.
fn health_probe() -> i32 {
    let port = std::env::var("KEYSCORE_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("health-probe runtime");

    runtime.block_on(async move {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("health-probe client");

        let url = format!("http://127.0.0.1:{port}/healthz");
        match client.get(&url).send().await {
            Ok(response) if response.status().is_success() => 0,
            Ok(_) | Err(_) => 1,
        }
    })
}

async fn shutdown_signal() {
    let interrupt = async {
        signal::ctrl_c().await.expect("Ctrl+C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => tracing::info!("Ctrl+C received, draining connections"),
        _ = sigterm => tracing::info!("SIGTERM received, draining connections"),
    }
}
