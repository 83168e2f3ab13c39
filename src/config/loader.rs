//! Configuration loading from disk and environment.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ForwarderConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides the listener port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid PORT value {0:?}")]
    Port(String),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// Without a path the defaults are used. The `PORT` environment variable,
/// when set, replaces the listener port either way.
pub fn load_config(path: Option<&Path>) -> Result<ForwarderConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ForwarderConfig::default(),
    };

    apply_port_override(&mut config, std::env::var(PORT_ENV).ok().as_deref())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Replace the port of the listener bind address.
pub fn apply_port_override(
    config: &mut ForwarderConfig,
    port: Option<&str>,
) -> Result<(), ConfigError> {
    let Some(port) = port else {
        return Ok(());
    };
    let port: u16 = port
        .trim()
        .parse()
        .map_err(|_| ConfigError::Port(port.to_string()))?;

    let ip = config
        .listener
        .bind_address
        .parse::<SocketAddr>()
        .map(|addr| addr.ip())
        .unwrap_or_else(|_| [0, 0, 0, 0].into());
    config.listener.bind_address = SocketAddr::new(ip, port).to_string();
    Ok(())
}
