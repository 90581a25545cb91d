//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the quotation endpoint
//! - Wire up middleware (request ID, tracing)
//! - Serve on a bound listener until shutdown

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::handler::get_quotation;
use crate::http::request::UuidRequestId;
use crate::lifecycle::ShutdownSignal;
use crate::relay::Relay;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: Relay,
}

/// HTTP front door of the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    pub fn new(config: RelayConfig, relay: Relay) -> Self {
        let router = Self::build_router(&config, AppState { relay });
        Self { router, config }
    }

    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route(&config.listener.path, get(get_quotation))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    ///
    /// In-flight responses are drained; detached persistence tasks are not
    /// waited for.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.listener.path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
