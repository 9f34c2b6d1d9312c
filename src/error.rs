//! Gateway error taxonomy and failure classification.
//!
//! # Responsibilities
//! - Map every pipeline failure to exactly one caller-visible status
//! - Distinguish deadline failures from other upstream failures
//!
//! # Design Decisions
//! - Error responses carry no body: 400 for validation, 408 for
//!   timeouts, 500 for everything else upstream. Diagnosing a failure
//!   means reading the gateway's logs, not the response.
//! - Classification prefers the provider's typed deadline signal and
//!   falls back to a case-sensitive `"timeout"` substring match for
//!   providers that only surface text. The fallback is a known weak
//!   point, kept deliberately.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::session::UpstreamError;

/// A failure of the forwarding pipeline, before the response is
/// committed to the caller.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The target-URL control header was absent or empty. The only hard
    /// validation failure in the pipeline; raised before any outbound call.
    #[error("no valid request URL supplied via '{header}'; skipping request")]
    Validation { header: String },

    /// The outbound call exceeded its configured deadline.
    #[error("outbound call timed out")]
    Timeout(#[source] UpstreamError),

    /// Any other outbound call failure.
    #[error("outbound call failed")]
    Upstream(#[source] UpstreamError),
}

impl GatewayError {
    /// Caller-visible status for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Validation { .. } => StatusCode::BAD_REQUEST,
            GatewayError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            GatewayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UpstreamError> for GatewayError {
    fn from(err: UpstreamError) -> Self {
        if err.is_deadline() || err.to_string().contains("timeout") {
            GatewayError::Timeout(err)
        } else {
            GatewayError::Upstream(err)
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        // Status only; error paths never carry a body.
        self.status().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_validation_maps_to_400() {
        let err = GatewayError::Validation {
            header: "x-tls-url".to_string(),
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_typed_deadline_maps_to_408() {
        let err: GatewayError =
            UpstreamError::DeadlineExceeded(Duration::from_secs(30)).into();
        assert_eq!(err.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn test_textual_timeout_maps_to_408() {
        let err: GatewayError =
            UpstreamError::Transport("read timeout on upstream socket".to_string()).into();
        assert_eq!(err.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn test_substring_match_is_case_sensitive() {
        let err: GatewayError =
            UpstreamError::Transport("Timeout waiting for upstream".to_string()).into();
        // "Timeout" != "timeout": classified as a generic upstream failure.
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_other_failures_map_to_500() {
        let err: GatewayError =
            UpstreamError::Transport("connection refused".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
