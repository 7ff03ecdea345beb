//! JSON Lambda Host
//!
//! An HTTP host for a single JSON-in/JSON-out lambda, built with Tokio and
//! Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 LAMBDA HOST                   │
//!                      │                                               │
//!     POST {json}      │  ┌─────────┐    ┌─────────┐    ┌──────────┐  │
//!     ─────────────────┼─▶│  http   │───▶│ payload │───▶│ delegate │  │
//!                      │  │ server  │    │ buffer  │    │  invoke  │  │
//!                      │  └─────────┘    └─────────┘    └────┬─────┘  │
//!                      │                                     │        │
//!     200 JSON(result) │  ┌──────────────────────────┐       │        │
//!     ◀────────────────┼──│ response (200/500/501)   │◀──────┘        │
//!                      │  └──────────────────────────┘                │
//!                      │                                               │
//!                      │  ┌─────────────────────────────────────────┐ │
//!                      │  │         Cross-Cutting Concerns           │ │
//!                      │  │  ┌────────┐ ┌───────────┐ ┌──────────┐  │ │
//!                      │  │  │ config │ │ observa-  │ │lifecycle │  │ │
//!                      │  │  │        │ │ bility    │ │          │  │ │
//!                      │  │  └────────┘ └───────────┘ └──────────┘  │ │
//!                      │  └─────────────────────────────────────────┘ │
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! The delegate is the only business logic in the system. This binary hosts
//! the built-in `Echo` delegate, which returns the payload unchanged. That
//! makes a deployed host smoke-testable end to end; embedders depend on the
//! library and inject their own `Delegate` at startup.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use lambda_host::config::{load_config, HostConfig};
use lambda_host::delegate::{Delegate, Echo};
use lambda_host::http::HttpServer;
use lambda_host::lifecycle::{signals, Shutdown};
use lambda_host::observability::logging;

/// Host a JSON lambda over HTTP.
#[derive(Debug, Parser)]
#[command(name = "lambda-host", version)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listener bind address (e.g. "0.0.0.0:3000").
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration before logging init so the configured level applies
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => HostConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability);

    tracing::info!("lambda-host v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = match TcpListener::bind(&config.listener.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(
                bind_address = %config.listener.bind_address,
                error = %e,
                "Failed to bind listener"
            );
            return Err(e.into());
        }
    };
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let delegate: Arc<dyn Delegate> = Arc::new(Echo);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config, delegate);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
