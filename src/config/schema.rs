//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the host.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the lambda host.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HostConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Request size limits.
    pub limits: LimitConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Maximum request body size in bytes. The body is buffered in full
    /// before parsing, so this bounds per-request memory.
    pub max_body_bytes: usize,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 16 * 1024 * 1024, // 16MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
