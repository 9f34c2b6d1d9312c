//! HTTP server setup and the forwarding handler.
//!
//! # Responsibilities
//! - Build the Axum router (forwarding catch-all + service endpoints)
//! - Wire up middleware (request tracing)
//! - Orchestrate the per-request pipeline: capture → translate →
//!   merge → configure → execute → relay
//! - Map pipeline failures to empty-bodied status responses

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use futures_util::{StreamExt, TryStreamExt};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::gateway::{self, CallDescriptor, InboundHeaders};
use crate::http::debug;
use crate::profile::BrowserProfiles;
use crate::session::{BoxError, SessionProvider};

/// Application state injected into handlers.
///
/// Everything here is read-only after startup; requests share it
/// through cheap `Arc` clones.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub profiles: Arc<BrowserProfiles>,
    pub provider: Arc<dyn SessionProvider>,
}

/// HTTP server for the forwarding gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new server from configuration and a session provider.
    pub fn new(config: GatewayConfig, provider: Arc<dyn SessionProvider>) -> Self {
        let state = AppState {
            config: Arc::new(config),
            profiles: Arc::new(BrowserProfiles::builtin()),
            provider,
        };
        Self {
            router: build_router(state),
        }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all routes and middleware.
///
/// The forwarding handler claims `/` and every other path, matching the
/// original surface where the root mount forwards regardless of path;
/// the service endpoints take precedence by being registered explicitly.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/isalive", any(debug::isalive))
        .route("/sleep", any(debug::sleep))
        .route("/headers", any(debug::headers))
        .route("/", any(forward_handler))
        .route("/{*path}", any(forward_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Main forwarding handler: one outbound call per inbound request.
async fn forward_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("forward", %request_id);

    async move {
        match forward(&state, request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, status = %err.status(), "Forwarding failed");
                err.into_response()
            }
        }
    }
    .instrument(span)
    .await
}

/// The pipeline proper. Session release is ownership-driven: the session
/// is consumed by `execute`, and in streamed mode the relayed body owns
/// the live response, so connections are released on every exit path.
async fn forward(state: &AppState, request: Request<Body>) -> Result<Response, GatewayError> {
    let (parts, body) = request.into_parts();

    let inbound = InboundHeaders::capture(&parts.headers);
    let descriptor = CallDescriptor::translate(
        &inbound,
        parts.method,
        &state.config.control,
        state.config.forwarding.default_timeout_secs,
    )?;

    tracing::debug!(
        url = %descriptor.url,
        method = %descriptor.method,
        timeout_secs = descriptor.timeout.as_secs(),
        stream = descriptor.stream_mode,
        redirects_disabled = descriptor.disable_redirects,
        "Forwarding request"
    );

    let profile = state.profiles.get(&state.config.forwarding.browser_profile);
    let headers = gateway::merge(profile, &inbound, &state.config.control);

    let body_stream = body
        .into_data_stream()
        .map_err(|e| Box::new(e) as BoxError)
        .boxed();

    let (session, outbound) =
        gateway::configure(state.provider.as_ref(), &descriptor, headers, Some(body_stream));

    let result = session.execute(outbound).await.map_err(GatewayError::from)?;

    tracing::debug!(status = %result.status, "Upstream responded");
    Ok(gateway::relay(result, descriptor.stream_mode).await)
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
