//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::HostConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for the schema.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The file parsed but failed semantic validation.
    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<HostConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: HostConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
