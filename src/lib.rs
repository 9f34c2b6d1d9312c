//! TLS-fingerprint forwarding gateway.
//!
//! Accepts an inbound HTTP request that describes, in reserved control
//! headers, an outbound HTTP call to perform (target URL, proxy,
//! redirect policy, timeout, streaming mode), executes that call
//! through a per-request outbound session, and relays the result back
//! buffered or streamed.

// Core pipeline
pub mod gateway;
pub mod profile;
pub mod session;

// Surface and cross-cutting concerns
pub mod config;
pub mod error;
pub mod http;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpServer;
