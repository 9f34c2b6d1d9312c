//! Shared utilities for integration testing.
//!
//! Provides a scriptable session provider that records everything the
//! pipeline configures on it, plus a router builder wired to it.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::Router;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::{stream, StreamExt, TryStreamExt};

use tls_gateway::config::GatewayConfig;
use tls_gateway::http::{build_router, AppState};
use tls_gateway::profile::{BrowserProfiles, OrderedHeaders};
use tls_gateway::session::{
    BoxError, CallResult, OutboundRequest, OutboundSession, SessionProvider, UpstreamError,
};

/// What the mock session should do when executed.
#[derive(Clone)]
pub enum ScriptedOutcome {
    Respond {
        status: StatusCode,
        headers: Vec<(String, String)>,
        chunks: Vec<Result<Bytes, String>>,
    },
    FailDeadline,
    FailTransport(String),
}

impl ScriptedOutcome {
    pub fn ok_text(body: &str) -> Self {
        ScriptedOutcome::Respond {
            status: StatusCode::OK,
            headers: vec![("content-type".to_string(), "text/plain".to_string())],
            chunks: vec![Ok(Bytes::copy_from_slice(body.as_bytes()))],
        }
    }
}

/// Everything the pipeline did to the session, for assertions.
#[derive(Default)]
pub struct MockState {
    pub sessions_created: AtomicUsize,
    pub timeout: Mutex<Option<Duration>>,
    pub proxy: Mutex<Option<String>>,
    pub ordered_headers: Mutex<Option<OrderedHeaders>>,
    pub verbose_enabled: AtomicUsize,
    pub executed_method: Mutex<Option<Method>>,
    pub executed_url: Mutex<Option<String>>,
    pub executed_allow_redirects: Mutex<Option<bool>>,
    pub executed_body: Mutex<Option<Bytes>>,
}

pub struct MockProvider {
    pub state: Arc<MockState>,
    outcome: ScriptedOutcome,
}

impl MockProvider {
    pub fn new(outcome: ScriptedOutcome) -> Self {
        Self {
            state: Arc::new(MockState::default()),
            outcome,
        }
    }
}

impl SessionProvider for MockProvider {
    fn new_session(&self) -> Box<dyn OutboundSession> {
        self.state.sessions_created.fetch_add(1, Ordering::SeqCst);
        Box::new(MockSession {
            state: self.state.clone(),
            outcome: self.outcome.clone(),
        })
    }
}

struct MockSession {
    state: Arc<MockState>,
    outcome: ScriptedOutcome,
}

#[async_trait]
impl OutboundSession for MockSession {
    fn set_timeout(&mut self, timeout: Duration) {
        *self.state.timeout.lock().unwrap() = Some(timeout);
    }

    fn set_proxy(&mut self, proxy: &str) {
        *self.state.proxy.lock().unwrap() = Some(proxy.to_string());
    }

    fn set_ordered_headers(&mut self, headers: OrderedHeaders) {
        *self.state.ordered_headers.lock().unwrap() = Some(headers);
    }

    fn enable_verbose(&mut self) {
        self.state.verbose_enabled.fetch_add(1, Ordering::SeqCst);
    }

    async fn execute(
        self: Box<Self>,
        request: OutboundRequest,
    ) -> Result<CallResult, UpstreamError> {
        *self.state.executed_method.lock().unwrap() = Some(request.method.clone());
        *self.state.executed_url.lock().unwrap() = Some(request.url.clone());
        *self.state.executed_allow_redirects.lock().unwrap() = Some(request.allow_redirects);

        if let Some(mut body) = request.body {
            let mut buf = BytesMut::new();
            while let Ok(Some(chunk)) = body.try_next().await {
                buf.extend_from_slice(&chunk);
            }
            *self.state.executed_body.lock().unwrap() = Some(buf.freeze());
        }

        match self.outcome {
            ScriptedOutcome::Respond {
                status,
                headers,
                chunks,
            } => {
                let mut map = HeaderMap::new();
                for (name, value) in &headers {
                    map.append(
                        HeaderName::from_bytes(name.as_bytes()).unwrap(),
                        HeaderValue::from_str(value).unwrap(),
                    );
                }
                let body = stream::iter(
                    chunks
                        .into_iter()
                        .map(|r| r.map_err(BoxError::from)),
                )
                .boxed();
                Ok(CallResult {
                    status,
                    headers: map,
                    body,
                })
            }
            ScriptedOutcome::FailDeadline => {
                Err(UpstreamError::DeadlineExceeded(Duration::from_secs(30)))
            }
            ScriptedOutcome::FailTransport(message) => Err(UpstreamError::Transport(message)),
        }
    }
}

/// Router under test with default configuration and the given provider.
pub fn app(provider: Arc<dyn SessionProvider>) -> Router {
    app_with_config(GatewayConfig::default(), provider)
}

pub fn app_with_config(config: GatewayConfig, provider: Arc<dyn SessionProvider>) -> Router {
    build_router(AppState {
        config: Arc::new(config),
        profiles: Arc::new(BrowserProfiles::builtin()),
        provider,
    })
}

/// Collect a response body into one buffer.
pub async fn body_bytes(body: axum::body::Body) -> Bytes {
    axum::body::to_bytes(body, usize::MAX).await.unwrap()
}
