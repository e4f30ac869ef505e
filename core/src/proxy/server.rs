//! Proxy Server - Axum HTTP server
//! Hosts the dev server redirector plus a health check

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::proxy::redirector::{self, DevServerRedirector};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub redirector: Arc<DevServerRedirector>,
}

/// Proxy server instance
pub struct ProxyServer {
    host: String,
    port: u16,
    state: AppState,
}

impl ProxyServer {
    pub fn new(host: String, port: u16, redirector: DevServerRedirector) -> Self {
        let state = AppState {
            redirector: Arc::new(redirector),
        };

        Self { host, port, state }
    }

    /// Build the router without binding a socket
    pub fn router(&self) -> Router {
        let [bare, tail] = self.state.redirector.prefix().route_patterns();

        Router::new()
            // Health check
            .route("/healthz", get(health_check_handler))
            .route("/health", get(health_check_handler))

            // Dev server redirects, every method
            .route(&bare, any(redirector::handle_dev_request))
            .route(&tail, any(redirector::handle_dev_request))

            .fallback(not_found_handler)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the proxy server (blocking)
    pub async fn run(self) -> anyhow::Result<()> {
        let app = self.router();

        let addr = format!("{}:{}", self.host, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        tracing::info!("Proxy server listening on {}", addr);

        // Handle graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Proxy server stopped");
        Ok(())
    }
}

/// Health check handler
async fn health_check_handler() -> Response {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"}))).into_response()
}

async fn not_found_handler() -> Response {
    redirector::not_found()
}

/// Shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
