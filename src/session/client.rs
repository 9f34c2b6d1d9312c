//! Default session provider backed by `reqwest`.
//!
//! # Responsibilities
//! - Honor the session contract: per-request client, timeout, proxy,
//!   redirect policy, ordered headers, streamed response body
//! - Decode the response body (gzip/brotli/deflate) so the relay can
//!   strip `content-encoding` safely
//!
//! # Design Decisions
//! - A fresh `reqwest::Client` per session keeps the "never pooled
//!   across requests" invariant; connections die with the session
//! - No TLS fingerprint mimicry here; a real impersonation engine
//!   implements the same traits behind its own provider

use std::time::Duration;

use async_trait::async_trait;
use axum::http::header::{HeaderName, HeaderValue};
use futures_util::{StreamExt, TryStreamExt};

use crate::profile::OrderedHeaders;
use crate::session::{
    BoxError, CallResult, OutboundRequest, OutboundSession, SessionProvider, UpstreamError,
};

/// Provider handing out one [`ClientSession`] per inbound request.
#[derive(Debug, Clone, Default)]
pub struct ClientSessionProvider;

impl ClientSessionProvider {
    pub fn new() -> Self {
        Self
    }
}

impl SessionProvider for ClientSessionProvider {
    fn new_session(&self) -> Box<dyn OutboundSession> {
        Box::new(ClientSession::new())
    }
}

/// Single-use outbound session over a dedicated `reqwest` client.
pub struct ClientSession {
    timeout: Duration,
    proxy: Option<String>,
    headers: OrderedHeaders,
    verbose: bool,
}

impl ClientSession {
    fn new() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            proxy: None,
            headers: OrderedHeaders::new(),
            verbose: false,
        }
    }

    fn build_client(&self, allow_redirects: bool) -> Result<reqwest::Client, UpstreamError> {
        let policy = if allow_redirects {
            reqwest::redirect::Policy::limited(10)
        } else {
            reqwest::redirect::Policy::none()
        };

        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(policy)
            .connection_verbose(self.verbose);

        match self.proxy.as_deref() {
            // Explicit "no proxy": also suppresses proxies from the environment.
            Some("") => builder = builder.no_proxy(),
            Some(addr) => {
                let proxy = reqwest::Proxy::all(addr)
                    .map_err(|e| UpstreamError::Transport(e.to_string()))?;
                builder = builder.proxy(proxy);
            }
            None => {}
        }

        builder
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))
    }

    fn header_map(&self) -> axum::http::HeaderMap {
        let mut map = axum::http::HeaderMap::new();
        for (name, value) in self.headers.iter() {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(n), Ok(v)) => {
                    map.append(n, v);
                }
                _ => {
                    tracing::warn!(header = name, "Skipping malformed outbound header");
                }
            }
        }
        map
    }
}

#[async_trait]
impl OutboundSession for ClientSession {
    fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    fn set_proxy(&mut self, proxy: &str) {
        self.proxy = Some(proxy.to_string());
    }

    fn set_ordered_headers(&mut self, headers: OrderedHeaders) {
        self.headers = headers;
    }

    fn enable_verbose(&mut self) {
        self.verbose = true;
    }

    async fn execute(
        self: Box<Self>,
        request: OutboundRequest,
    ) -> Result<CallResult, UpstreamError> {
        let client = self.build_client(request.allow_redirects)?;

        let mut outbound = client
            .request(request.method, &request.url)
            .headers(self.header_map());

        if let Some(body) = request.body {
            outbound = outbound.body(reqwest::Body::wrap_stream(body));
        }

        let deadline = self.timeout;
        let response = outbound.send().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::DeadlineExceeded(deadline)
            } else {
                UpstreamError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        // The stream keeps the response (and its connection) alive until
        // drained or dropped.
        let body = response
            .bytes_stream()
            .map_err(|e| Box::new(e) as BoxError)
            .boxed();

        Ok(CallResult {
            status,
            headers,
            body,
        })
    }
}
