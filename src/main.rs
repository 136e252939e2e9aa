//! Swagger Mirror
//!
//! Serves a JSON API document and a Swagger UI, keeping the document in
//! sync with its source.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                SWAGGER MIRROR                │
//!   local file ──notify──┼─▶┌──────────┐                                │
//!                        │  │ watcher  │─debounce─┐                     │
//!                        │  └──────────┘          ▼                     │
//!                        │                 ┌──────────────┐             │
//!                        │                 │ DocumentStore│◀── refresh  │
//!                        │                 │ (ArcSwap)    │             │
//!                        │  ┌──────────┐   └──────┬───────┘             │
//!   remote URL ◀──GET────┼──│  poller  │─tick─────┘  │                  │
//!                        │  └──────────┘             │ snapshot         │
//!                        │                           ▼                  │
//!   Client ◀─────────────┼──────────── http server: /swagger.json       │
//!                        │                          /docs/ (Swagger UI) │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use swagger_mirror::cli::Cli;
use swagger_mirror::config::resolve_config;
use swagger_mirror::document::{DocumentSource, DocumentStore, Fetcher};
use swagger_mirror::http::HttpServer;
use swagger_mirror::lifecycle::{signals, Shutdown};
use swagger_mirror::observability::{logging, metrics};
use swagger_mirror::sync;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match resolve_config(cli.config.as_deref(), &cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            logging::init_logging("info");
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        source = %config.source.location,
        bind_address = %config.listener.bind_address,
        "swagger-mirror starting"
    );

    let source = DocumentSource::resolve_from_executable(&config.source.location, config.source.poll_interval());
    let fetcher = Fetcher::from_config(&config.source)?;

    // No document, no server.
    let store = match DocumentStore::load(source, fetcher).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind(), "Initial load failed");
            return Err(e.into());
        }
    };

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = match TcpListener::bind(&config.listener.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(address = %config.listener.bind_address, error = %e, "Failed to bind listener");
            return Err(e.into());
        }
    };
    tracing::info!(address = %listener.local_addr()?, "Server started");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let sync_task = sync::spawn(Arc::clone(&store), config.source.debounce(), shutdown.subscribe());
    let server = HttpServer::new(config, store);
    let served = server.run(listener, shutdown.subscribe()).await;

    // The server may also stop on its own (I/O error); take the sync loop down with it.
    shutdown.trigger();
    if let Err(e) = sync_task.await {
        tracing::warn!(error = %e, "Sync task ended abnormally");
    }

    served?;
    tracing::info!("Shutdown complete");
    Ok(())
}
