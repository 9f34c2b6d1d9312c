//! Outbound session seam.
//!
//! # Responsibilities
//! - Define the interface the pipeline needs from a session provider
//! - Carry the outbound request description and the call result
//! - Give timeout failures a typed shape the classifier can rely on
//!
//! # Design Decisions
//! - One session per inbound request, never reused or pooled here
//! - `execute` consumes the session: connections are released when the
//!   session (or, in streamed mode, the body stream that owns the live
//!   response) is dropped, on every exit path
//! - The fingerprint-impersonation engine is reached only through these
//!   traits; `client.rs` is a stand-in provider without TLS mimicry

pub mod client;

use std::time::Duration;

use async_trait::async_trait;
use axum::http::{HeaderMap, Method, StatusCode};
use bytes::Bytes;
use futures_util::stream::BoxStream;
use thiserror::Error;

use crate::profile::OrderedHeaders;

pub use client::ClientSessionProvider;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Byte stream used for both the outbound request body and the
/// upstream response body.
pub type BodyStream = BoxStream<'static, Result<Bytes, BoxError>>;

/// Failure of the outbound call itself.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The configured per-request deadline elapsed.
    #[error("deadline of {0:?} exceeded: timeout")]
    DeadlineExceeded(Duration),

    /// Anything else: connect failure, bad URL, protocol error.
    #[error("{0}")]
    Transport(String),
}

impl UpstreamError {
    pub fn is_deadline(&self) -> bool {
        matches!(self, UpstreamError::DeadlineExceeded(_))
    }
}

/// The outbound call to perform, as derived from the inbound request.
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub allow_redirects: bool,
    /// Inbound body, forwarded as-is. `None` for bodiless methods.
    pub body: Option<BodyStream>,
}

/// Result of an executed outbound call.
///
/// The body is always a stream; the relay decides whether to drain it
/// into a buffer or forward it incrementally.
pub struct CallResult {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: BodyStream,
}

/// Factory for per-request outbound sessions.
pub trait SessionProvider: Send + Sync {
    fn new_session(&self) -> Box<dyn OutboundSession>;
}

/// A single-use outbound session.
///
/// Configuration setters are called before `execute`; `execute` consumes
/// the session so it cannot be reused across requests.
#[async_trait]
pub trait OutboundSession: Send {
    /// Total deadline for the outbound call, including body transfer.
    fn set_timeout(&mut self, timeout: Duration);

    /// Upstream proxy address. The empty string is an explicit
    /// "no proxy", distinct from never calling this at all.
    fn set_proxy(&mut self, proxy: &str);

    /// Exact header sequence to send upstream.
    fn set_ordered_headers(&mut self, headers: OrderedHeaders);

    /// Diagnostic connection logging; not part of the functional contract.
    fn enable_verbose(&mut self);

    async fn execute(self: Box<Self>, request: OutboundRequest)
        -> Result<CallResult, UpstreamError>;
}
