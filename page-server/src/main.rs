//! Pagecraft Server
//!
//! Local embedded server for the Pagecraft page builder.
//! Stores pages and serves their display, author and public renderings.

use std::net::SocketAddr;

use clap::Parser;
use page_core::PageStore;
use page_server::{build_router, metrics, AppState, CliArgs, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,page_server=debug,tower_http=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output (recommended for production).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,page_server=debug,page_core=debug,tower_http=debug")
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Open the page store, loading any pages already on disk.
fn open_store(config: &ServerConfig) -> anyhow::Result<PageStore> {
    let Some(dir) = config.data_dir.as_ref() else {
        tracing::info!("No data directory configured, pages are kept in memory");
        return Ok(PageStore::new());
    };

    let store = PageStore::with_data_dir(dir)
        .map_err(|e| anyhow::anyhow!("Failed to open data directory {}: {e}", dir.display()))?;
    let loaded = store.load_all_from_disk()?;
    tracing::info!(data_dir = %dir.display(), pages = loaded.len(), "Loaded pages from disk");
    Ok(store)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::from(CliArgs::parse());
    tracing::debug!(?config, "Configuration resolved");

    let metrics_handle = metrics::init_metrics()
        .map_err(|e| anyhow::anyhow!("Failed to initialize Prometheus metrics: {}", e))?;
    tracing::info!("Prometheus metrics initialized");

    let store = open_store(&config)?;
    metrics::set_pages_stored(store.len());

    let port = config.port;
    let app = build_router(AppState::new(store, config), Some(metrics_handle));

    // Bind to localhost ONLY
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Pagecraft server starting on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
