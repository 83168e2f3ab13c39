//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router accepting any method on any path
//! - Apply the route-service precondition (trigger headers)
//! - Hand matching requests to the ForwardHandler
//! - Map forwarding errors to responses, record metrics
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ForwarderConfig;
use crate::http::forward::ForwardHandler;
use crate::lifecycle::Drain;
use crate::observability::metrics;
use crate::routing::Router as RouteTable;
use crate::upstream::{HyperUpstreamClient, UpstreamClient};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub forwarder: ForwardHandler,
}

/// HTTP server for the route service.
pub struct HttpServer {
    router: Router,
    config: ForwarderConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the pooled hyper client.
    pub fn new(config: ForwarderConfig) -> Self {
        let client = Arc::new(HyperUpstreamClient::new(&config.client));
        Self::with_client(config, client)
    }

    /// Create a server forwarding through the given client.
    pub fn with_client(config: ForwarderConfig, client: Arc<dyn UpstreamClient>) -> Self {
        let state = AppState {
            routes: Arc::new(RouteTable::route_service()),
            forwarder: ForwardHandler::new(client),
        };

        Self {
            router: Self::build_router(state),
            config,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(route_service_handler))
            .route("/", any(route_service_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: Drain,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ForwarderConfig {
        &self.config
    }
}

/// Forwards requests carrying the trigger headers, 404 for everything else.
async fn route_service_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();

    if !state.routes.match_request(&request) {
        tracing::debug!(method = %method, path = %request.uri().path(), "No route matched");
        return (StatusCode::NOT_FOUND, "No matching route found").into_response();
    }

    let response = match state.forwarder.handle(request).await {
        Ok(response) => response.into_response(),
        Err(e) => e.into_response(),
    };

    metrics::record_request(&method, response.status(), start_time);
    response
}
