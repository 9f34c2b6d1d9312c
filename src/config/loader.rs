//! Configuration loading from the environment and an optional file.
//!
//! # Data Flow
//! ```text
//! TLS_GATEWAY_CONFIG file (TOML, optional)
//!     → parse & deserialize into GatewayConfig
//!     → environment overrides applied on top
//!     → GatewayConfig (immutable)
//!     → shared via Arc to all handlers
//! ```
//!
//! Environment wins over the file so a deployment can repoint a single
//! control-header name without editing configuration on disk.

use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load configuration: optional TOML file, then environment overrides.
pub fn load() -> Result<GatewayConfig, ConfigError> {
    let mut config = match std::env::var("TLS_GATEWAY_CONFIG") {
        Ok(path) => from_file(Path::new(&path))?,
        Err(_) => GatewayConfig::default(),
    };
    apply_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Load and parse a TOML configuration file.
pub fn from_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)?;
    Ok(config)
}

/// Apply environment-style overrides from an arbitrary lookup.
///
/// Split out from [`load`] so tests can drive it without touching the
/// process environment.
pub fn apply_overrides(
    config: &mut GatewayConfig,
    lookup: impl Fn(&str) -> Option<String>,
) {
    let control = &mut config.control;
    for (key, slot) in [
        ("TLS_URL", &mut control.url),
        ("TLS_PROXY", &mut control.proxy),
        ("TLS_STREAM", &mut control.stream),
        ("TLS_REDIRECT", &mut control.redirect),
        ("TLS_TIMEOUT", &mut control.timeout),
    ] {
        if let Some(value) = lookup(key) {
            *slot = value;
        }
    }

    if let Some(addr) = lookup("TLS_GATEWAY_ADDR") {
        config.listener.bind_address = addr;
    }
    if let Some(profile) = lookup("TLS_GATEWAY_PROFILE") {
        config.forwarding.browser_profile = profile;
    }
}
