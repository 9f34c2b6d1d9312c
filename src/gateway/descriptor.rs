//! Request translation: control headers → call descriptor.
//!
//! # Responsibilities
//! - Extract the outbound-call description from the reserved headers
//! - Enforce the single hard validation rule (target URL present)
//! - Coerce unusable timeout values instead of rejecting them
//!
//! # Design Decisions
//! - Timeout leniency is deliberate: a malformed timeout must never
//!   abort a caller's request, so anything unparsable or non-positive
//!   silently becomes the default
//! - Redirect and stream controls are presence flags; any non-empty
//!   value (whitespace included) means "on", the value itself is ignored

use std::time::Duration;

use axum::http::Method;

use crate::config::ControlHeaders;
use crate::error::GatewayError;
use crate::gateway::InboundHeaders;

/// Everything the pipeline needs to know about the outbound call,
/// derived once per inbound request and immutable afterwards.
#[derive(Debug, Clone)]
pub struct CallDescriptor {
    /// Target URL, forwarded verbatim. Whether it parses is the
    /// session provider's problem and surfaces as an upstream failure.
    pub url: String,

    /// Method copied from the inbound request.
    pub method: Method,

    /// True iff the redirect-control header is present and non-empty.
    pub disable_redirects: bool,

    /// Effective outbound deadline.
    pub timeout: Duration,

    /// True iff the stream-control header is present and non-empty.
    pub stream_mode: bool,

    /// Upstream proxy address; empty means an explicit "no proxy".
    pub proxy: String,
}

impl CallDescriptor {
    /// Translate the inbound request's control headers into a descriptor.
    ///
    /// Fails only when the target-URL header is absent or empty.
    pub fn translate(
        inbound: &InboundHeaders,
        method: Method,
        control: &ControlHeaders,
        default_timeout_secs: u64,
    ) -> Result<Self, GatewayError> {
        let url = match inbound.get(&control.url) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => {
                return Err(GatewayError::Validation {
                    header: control.url.clone(),
                })
            }
        };

        let disable_redirects = present(inbound, &control.redirect);
        let stream_mode = present(inbound, &control.stream);
        let proxy = inbound.get(&control.proxy).unwrap_or("").to_string();

        let timeout_secs = inbound
            .get(&control.timeout)
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|t| *t > 0)
            .map(|t| t as u64)
            .unwrap_or(default_timeout_secs);

        Ok(Self {
            url,
            method,
            disable_redirects,
            timeout: Duration::from_secs(timeout_secs),
            stream_mode,
            proxy,
        })
    }
}

/// Presence flag: set iff the header exists with a non-empty value.
fn present(inbound: &InboundHeaders, name: &str) -> bool {
    inbound.get(name).is_some_and(|v| !v.is_empty())
}
