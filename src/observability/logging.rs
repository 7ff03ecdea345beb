//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Respect `RUST_LOG` over the configured level
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log level configurable via config and environment

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to the
/// whole crate. Calling this twice panics (the global subscriber can only
/// be set once), so the binary calls it exactly once at startup.
pub fn init(config: &ObservabilityConfig) {
    let default_filter = format!("lambda_host={}", config.log_level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
