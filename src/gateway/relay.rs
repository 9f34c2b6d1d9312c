//! Response relay: upstream call result → caller response.
//!
//! # Responsibilities
//! - Copy the upstream status verbatim
//! - Copy upstream headers, dropping `content-encoding` (the provider
//!   already decoded the body; forwarding it would mislead the caller)
//! - Transfer the body buffered or streamed per the caller's flag
//!
//! # Design Decisions
//! - Failures after status/headers are committed cannot change the
//!   status; they are logged and the body is cut short. Buffering
//!   everything to "fix" this would defeat streamed mode.
//! - Only the first value of a multi-valued upstream header is
//!   forwarded, mirroring the inbound direction.

use axum::body::Body;
use axum::http::{HeaderMap, Response};
use bytes::{Bytes, BytesMut};
use futures_util::TryStreamExt;
use thiserror::Error;

use crate::session::{BodyStream, CallResult};

/// Failure while transferring the response body after the status and
/// headers are already committed. Logged only; never re-statused.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("error buffering response: {0}")]
    Buffer(String),

    #[error("error streaming response: {0}")]
    Stream(String),
}

/// Relay an executed call back to the caller.
pub async fn relay(result: CallResult, stream_mode: bool) -> Response<Body> {
    let status = result.status;
    let headers = relay_headers(&result.headers);

    let body = if stream_mode {
        Body::from_stream(result.body.inspect_err(|e| {
            let err = RelayError::Stream(e.to_string());
            tracing::error!(error = %err, "Relay failed mid-stream");
        }))
    } else {
        match buffer(result.body).await {
            Ok(bytes) => Body::from(bytes),
            Err(err) => {
                // Status and headers still go out; there is no late
                // failure status once the response is decided.
                tracing::error!(error = %err, "Relay failed while buffering");
                Body::empty()
            }
        }
    };

    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// Copy upstream headers for the caller, minus `content-encoding`.
fn relay_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(upstream.keys_len());
    for name in upstream.keys() {
        if name.as_str().eq_ignore_ascii_case("content-encoding") {
            tracing::debug!("Dropping content-encoding header, body is already decoded");
            continue;
        }
        let mut values = upstream.get_all(name).iter();
        match values.next() {
            Some(first) => {
                headers.insert(name.clone(), first.clone());
                if values.next().is_some() {
                    tracing::debug!(header = %name, "Forwarding only first value of repeated header");
                }
            }
            None => {
                tracing::debug!(header = %name, "Skipping header with no value");
            }
        }
    }
    headers
}

/// Drain the body stream into a single buffer.
async fn buffer(mut body: BodyStream) -> Result<Bytes, RelayError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = body
        .try_next()
        .await
        .map_err(|e| RelayError::Buffer(e.to_string()))?
    {
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}
