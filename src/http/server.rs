//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all integration handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Bind server to listener and drain on shutdown
//! - Purge expired OAuth state and credentials while serving

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::LoaderConfig;
use crate::http::error::ApiError;
use crate::http::handlers;
use crate::http::request::{request_id, UuidRequestId, X_REQUEST_ID};
use crate::hubspot::HubSpotIntegration;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub hubspot: Arc<HubSpotIntegration>,
}

/// HTTP server for the integration backend.
pub struct IntegrationServer {
    router: Router,
    hubspot: Arc<HubSpotIntegration>,
    sweep_interval: Duration,
}

impl IntegrationServer {
    /// Create a new server with the given configuration.
    pub fn new(config: LoaderConfig) -> Self {
        let state = AppState {
            hubspot: Arc::new(HubSpotIntegration::new(config.hubspot.clone())),
        };
        Self::with_state(config, state)
    }

    /// Create a server around existing state.
    pub fn with_state(config: LoaderConfig, state: AppState) -> Self {
        let hubspot = state.hubspot.clone();
        let router = Self::build_router(&config, state);
        Self {
            router,
            hubspot,
            sweep_interval: Duration::from_secs(config.hubspot.sweep_interval_secs),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &LoaderConfig, state: AppState) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request),
                )
            }))
            .layer(axum::middleware::map_response(timeout_detail))
            .layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs)));

        Router::new()
            .route("/health", get(handlers::health))
            .route("/integrations/hubspot/authorize", post(handlers::authorize_hubspot))
            .route("/integrations/hubspot/oauth2callback", get(handlers::oauth2callback_hubspot))
            .route("/integrations/hubspot/credentials", post(handlers::get_hubspot_credentials))
            .route("/integrations/hubspot/get_hubspot_items", post(handlers::get_hubspot_items))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.server.max_body_size))
            .layer(middleware)
    }

    /// Run the server until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let sweeper = self.hubspot.store().spawn_sweeper(self.sweep_interval);
        let served = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await;
        sweeper.abort();
        served?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// The timeout layer answers with a bare 408; give it a detail like every other error.
async fn timeout_detail(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        tracing::warn!("Request timed out");
        return ApiError::new(StatusCode::REQUEST_TIMEOUT, "Request timed out.").into_response();
    }
    response
}
