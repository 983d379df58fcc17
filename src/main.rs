//! Seismic File Metadata Server
//!
//! Serves SEG-Y header fields and ZGY cube geometry for files in a seismic store.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use seismic_file_metadata::config::{ServiceConfig, DEFAULT_API_PATH};
use seismic_file_metadata::server::build_router;
use seismic_file_metadata::state::AppState;

/// Seismic File Metadata Server
#[derive(Parser, Debug)]
#[command(name = "seismic-file-metadata")]
#[command(about = "HTTP service exposing SEG-Y headers and ZGY bin-grid metadata")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8000", env = "FILE_METADATA_LISTEN_ADDR")]
    listen: String,

    /// Route prefix for every endpoint
    #[arg(long, default_value = DEFAULT_API_PATH, env = "API_PATH")]
    api_path: String,

    /// Seismic store service URL
    #[arg(long, default_value = "", env = "SDMS_SERVICE_HOST")]
    sdms_url: String,

    /// Root directory of the local seismic store
    #[arg(long, default_value = "./data", env = "FILE_METADATA_DATA_ROOT")]
    data_root: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "FILE_METADATA_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    let config = ServiceConfig::new(&args.api_path, args.sdms_url.clone());
    info!("Starting {}", config);
    if config.sdms_url.is_empty() {
        tracing::warn!("SDMS_SERVICE_HOST is not set; authenticated requests will be rejected");
    }
    info!(data_root = %args.data_root, "Using local seismic store");

    let state = Arc::new(
        AppState::local(config, &args.data_root)
            .context("Failed to initialize application state")?,
    );

    let app = build_router(state);

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
