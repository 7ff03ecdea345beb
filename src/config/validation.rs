//! Configuration validation.
//!
//! Semantic checks on top of what serde already guarantees. Validation is a
//! pure function over the config and returns every error found, not just
//! the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::HostConfig;

/// A single semantic problem found in a config.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The listener bind address does not parse as `host:port`.
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    /// The body limit would reject every request.
    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate a config, collecting all errors.
pub fn validate_config(config: &HostConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
