//! Configuration schema definitions.
//!
//! All types derive Serde traits so the same schema loads from a TOML
//! file and from environment overrides. Everything has a default; a
//! gateway started with no configuration at all is fully functional.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
///
/// Built once at process start and immutable afterwards; shared with
/// every handler via `Arc`.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Reserved control-header names.
    pub control: ControlHeaders,

    /// Forwarding behavior knobs.
    pub forwarding: ForwardingConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8082").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8082".to_string(),
        }
    }
}

/// The reserved control-header names.
///
/// These carry gateway configuration rather than data to forward, are
/// matched case-insensitively, and are never sent upstream.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ControlHeaders {
    /// Target URL of the outbound call (required per request).
    pub url: String,

    /// Upstream proxy address; empty value means "no proxy".
    pub proxy: String,

    /// Presence flag: relay the response body as a stream.
    pub stream: String,

    /// Presence flag: disable following redirects.
    pub redirect: String,

    /// Outbound call timeout in whole seconds.
    pub timeout: String,
}

impl Default for ControlHeaders {
    fn default() -> Self {
        Self {
            url: "x-tls-url".to_string(),
            proxy: "x-tls-proxy".to_string(),
            stream: "x-tls-stream".to_string(),
            redirect: "x-tls-allowredirect".to_string(),
            timeout: "x-tls-timeout".to_string(),
        }
    }
}

impl ControlHeaders {
    /// All five reserved names.
    pub fn names(&self) -> [&str; 5] {
        [
            &self.url,
            &self.proxy,
            &self.stream,
            &self.redirect,
            &self.timeout,
        ]
    }

    /// Case-insensitive reservation check.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.names().iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}

/// Forwarding behavior knobs.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ForwardingConfig {
    /// Browser profile whose header order anchors the merge.
    pub browser_profile: String,

    /// Timeout applied when the caller sends none, or an unusable one.
    pub default_timeout_secs: u64,
}

impl Default for ForwardingConfig {
    fn default() -> Self {
        Self {
            browser_profile: crate::profile::DEFAULT_PROFILE.to_string(),
            default_timeout_secs: 30,
        }
    }
}
