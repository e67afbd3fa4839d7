//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (CORS, tracing)
//! - Serve on a bound listener until shutdown is broadcast

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::http::health::health_check;
use crate::http::response::not_found;
use crate::lifecycle::shutdown;
use crate::observability::Logger;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub sonarqube_url: Arc<str>,
    pub logger: Logger,
}

/// HTTP server for the agent.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: AppConfig, logger: Logger) -> Self {
        let state = AppState {
            sonarqube_url: Arc::from(config.sonarqube_url.as_str()),
            logger,
        };

        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// CORS mirrors the caller's origin, methods and headers and allows
    /// credentials, so every origin is accepted.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/api/health", get(health_check))
            .fallback(not_found)
            .with_state(state)
            .layer(CorsLayer::very_permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, e.g. for driving it without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait_for(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
