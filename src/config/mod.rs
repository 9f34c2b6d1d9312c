//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file + environment
//!     → loader.rs (parse, overlay)
//!     → GatewayConfig (immutable)
//!     → shared via Arc to all handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload machinery
//! - All fields have defaults so the gateway runs with zero config
//! - Control-header names are data, not constants: every one of the
//!   five reserved names can be renamed per deployment

pub mod loader;
pub mod schema;

pub use loader::{load, ConfigError};
pub use schema::{ControlHeaders, ForwardingConfig, GatewayConfig, ListenerConfig};
