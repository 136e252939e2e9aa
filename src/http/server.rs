//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Serve the mirrored document as `application/json`
//! - Mount the Swagger UI pointed at the document path
//! - Wire up middleware (tracing, request timeout)
//! - Run until the shutdown signal fires

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::MirrorConfig;
use crate::document::DocumentStore;
use crate::http::docs::swagger_ui;
use crate::lifecycle::signalled;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
}

/// HTTP server for the document mirror.
pub struct HttpServer {
    router: Router,
    config: MirrorConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving documents from `store`.
    pub fn new(config: MirrorConfig, store: Arc<DocumentStore>) -> Self {
        let state = AppState { store };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &MirrorConfig, state: AppState) -> Router {
        Router::new()
            .route(&config.docs.document_path, get(document_handler))
            .route("/healthz", get(health_handler))
            .merge(swagger_ui(&config.docs))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.listener.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for serving elsewhere or driving in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            document_path = %self.config.docs.document_path,
            ui_path = %self.config.docs.ui_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signalled(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Serves the last successfully loaded document.
async fn document_handler(State(state): State<AppState>) -> Response {
    metrics::record_document_request();
    ([(header::CONTENT_TYPE, "application/json")], state.store.bytes()).into_response()
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub revision: u64,
    /// Unix seconds of the last successful load.
    pub loaded_at: u64,
    pub source: String,
    pub kind: &'static str,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    let source = state.store.source();
    let document = state.store.current();
    let loaded_at = document
        .loaded_at()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    Json(HealthStatus {
        status: "ok",
        revision: document.revision(),
        loaded_at,
        source: source.to_string(),
        kind: source.kind(),
    })
}
