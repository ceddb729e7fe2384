//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router that fronts the engine
//! - Wire up middleware (tracing, timeout, request ID)
//! - Convert each HTTP request into an engine `Request` and back
//! - Bind server to listener with graceful shutdown
//!
//! # Design Decisions
//! - Every path and method goes to one fallback; the engine does all routing
//! - Handlers are synchronous, so dispatch runs on the blocking pool
//! - A panic that escapes the chain fails that request only (500)

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::engine::Engine;
use crate::http::request::Request as EngineRequest;

const X_REQUEST_ID: &str = "x-request-id";

/// Application state injected into the fallback handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub max_body_size: usize,
}

/// HTTP front end for an [`Engine`].
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Freeze `engine` and build the HTTP stack around it.
    pub fn new(engine: Engine, config: ServerConfig) -> Self {
        let state = AppState {
            engine: Arc::new(engine),
            max_body_size: config.limits.max_body_size,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
    }

    /// The Axum router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires or Ctrl-C is received.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Hand every request to the engine.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, state.max_body_size).await {
        Ok(bytes) => bytes.to_vec(),
        Err(e) => {
            tracing::warn!(path = %parts.uri.path(), error = %e, "Request body rejected");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    let request = EngineRequest::from_parts(&parts, body);
    let engine = state.engine.clone();
    match tokio::task::spawn_blocking(move || engine.handle(request)).await {
        Ok(response) => response.into_response(),
        Err(e) => {
            tracing::error!(
                method = %parts.method,
                path = %parts.uri.path(),
                error = %e,
                "Request handling aborted"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Wait for the shutdown broadcast or Ctrl-C, whichever comes first.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = shutdown.recv() => {}
        _ = ctrl_c => {}
    }
    tracing::info!("Shutdown signal received");
}
