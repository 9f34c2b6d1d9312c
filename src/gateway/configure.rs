//! Session configuration: descriptor → outbound session + request.
//!
//! # Responsibilities
//! - Open a fresh session from the provider (one per inbound request)
//! - Apply timeout, proxy, ordered headers, and diagnostic logging
//! - Build the outbound request with the redirect policy inverted from
//!   the disable-redirects flag and the inbound body attached as-is

use crate::gateway::CallDescriptor;
use crate::profile::OrderedHeaders;
use crate::session::{BodyStream, OutboundRequest, OutboundSession, SessionProvider};

/// Configure a new session and the request it will execute.
///
/// The proxy is always applied, even when empty: an empty address is the
/// explicit "no proxy" instruction, distinct from leaving the session's
/// ambient proxy settings alone.
pub fn configure(
    provider: &dyn SessionProvider,
    descriptor: &CallDescriptor,
    headers: OrderedHeaders,
    body: Option<BodyStream>,
) -> (Box<dyn OutboundSession>, OutboundRequest) {
    let mut session = provider.new_session();
    session.enable_verbose();
    session.set_timeout(descriptor.timeout);
    session.set_proxy(&descriptor.proxy);
    session.set_ordered_headers(headers);

    let request = OutboundRequest {
        method: descriptor.method.clone(),
        url: descriptor.url.clone(),
        allow_redirects: !descriptor.disable_redirects,
        body,
    };

    (session, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControlHeaders;
    use crate::gateway::InboundHeaders;
    use axum::http::Method;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Default)]
    struct Recorded {
        timeout: Mutex<Option<Duration>>,
        proxy: Mutex<Option<String>>,
        headers: Mutex<Option<OrderedHeaders>>,
        verbose: AtomicUsize,
    }

    struct RecordingSession(Arc<Recorded>);

    #[async_trait::async_trait]
    impl OutboundSession for RecordingSession {
        fn set_timeout(&mut self, timeout: Duration) {
            *self.0.timeout.lock().unwrap() = Some(timeout);
        }
        fn set_proxy(&mut self, proxy: &str) {
            *self.0.proxy.lock().unwrap() = Some(proxy.to_string());
        }
        fn set_ordered_headers(&mut self, headers: OrderedHeaders) {
            *self.0.headers.lock().unwrap() = Some(headers);
        }
        fn enable_verbose(&mut self) {
            self.0.verbose.fetch_add(1, Ordering::SeqCst);
        }
        async fn execute(
            self: Box<Self>,
            _request: OutboundRequest,
        ) -> Result<crate::session::CallResult, crate::session::UpstreamError> {
            unreachable!("not executed in this test")
        }
    }

    struct RecordingProvider(Arc<Recorded>);

    impl SessionProvider for RecordingProvider {
        fn new_session(&self) -> Box<dyn OutboundSession> {
            Box::new(RecordingSession(self.0.clone()))
        }
    }

    fn descriptor(pairs: &[(&str, &str)]) -> CallDescriptor {
        CallDescriptor::translate(
            &InboundHeaders::from_pairs(pairs),
            Method::POST,
            &ControlHeaders::default(),
            30,
        )
        .unwrap()
    }

    #[test]
    fn test_session_receives_descriptor_settings() {
        let recorded = Arc::new(Recorded::default());
        let provider = RecordingProvider(recorded.clone());
        let d = descriptor(&[
            ("x-tls-url", "https://example.com"),
            ("x-tls-timeout", "7"),
            ("x-tls-proxy", "http://proxy:3128"),
            ("x-tls-allowredirect", "1"),
        ]);
        let mut headers = OrderedHeaders::new();
        headers.push("user-agent", "ua");

        let (_session, request) = configure(&provider, &d, headers, None);

        assert_eq!(
            *recorded.timeout.lock().unwrap(),
            Some(Duration::from_secs(7))
        );
        assert_eq!(
            recorded.proxy.lock().unwrap().as_deref(),
            Some("http://proxy:3128")
        );
        assert!(recorded.headers.lock().unwrap().as_ref().unwrap().contains("user-agent"));
        assert_eq!(recorded.verbose.load(Ordering::SeqCst), 1);

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, "https://example.com");
        assert!(!request.allow_redirects);
    }

    #[test]
    fn test_empty_proxy_is_still_applied() {
        let recorded = Arc::new(Recorded::default());
        let provider = RecordingProvider(recorded.clone());
        let d = descriptor(&[("x-tls-url", "https://example.com")]);

        let (_session, request) = configure(&provider, &d, OrderedHeaders::new(), None);

        // Explicit empty string, not None.
        assert_eq!(recorded.proxy.lock().unwrap().as_deref(), Some(""));
        assert!(request.allow_redirects);
    }
}
