//! HTTP server setup and the invocation pipeline.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all invoke handler
//! - Wire up middleware (tracing, request ID)
//! - Bind server to listener
//! - Gate on method, buffer the body, hand it to the delegate
//! - Map the outcome to exactly one terminal response

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::HostConfig;
use crate::delegate::{self, Delegate};
use crate::http::request::{request_id, RequestIdLayer};
use crate::http::response;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub delegate: Arc<dyn Delegate>,
    pub max_body_bytes: usize,
}

/// HTTP server hosting one delegate.
pub struct HttpServer {
    router: Router,
    config: HostConfig,
}

impl HttpServer {
    /// Create a new HTTP server for the given configuration and delegate.
    pub fn new(config: HostConfig, delegate: Arc<dyn Delegate>) -> Self {
        let state = AppState {
            delegate,
            max_body_bytes: config.limits.max_body_bytes,
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Every path goes to the same handler; the host has no routing. No
    /// timeout layer: a stalled client holds its connection and buffer
    /// until it gives up.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(invoke_handler))
            .route("/", any(invoke_handler))
            .with_state(state)
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }
}

/// Main invoke handler.
///
/// POST: buffer the whole body, parse it as JSON, run the delegate, answer
/// 200 with the result or 500 with the error message. Anything else: 501
/// with an empty body, the body untouched.
async fn invoke_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request_id(request.headers()).to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if method != Method::POST {
        tracing::debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            "Rejecting non-POST request"
        );
        return response::not_implemented();
    }

    tracing::debug!(
        request_id = %request_id,
        path = %path,
        "Handling invocation"
    );

    // Buffer the body fully before parsing. The limit is the only bound;
    // arrival order is preserved by the transport.
    let body_bytes = match axum::body::to_bytes(request.into_body(), state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to read request body");
            return response::invoke_error(&e.to_string());
        }
    };

    // The delegate runs inline on the request task.
    match delegate::process(state.delegate.as_ref(), &body_bytes) {
        Ok(result) => response::delegate_result(result),
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Invocation failed");
            response::invoke_error(&e.to_string())
        }
    }
}
