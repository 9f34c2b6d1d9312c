//! Request-translation and response-relay pipeline.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → InboundHeaders::capture (arrival order pinned at the boundary)
//!     → descriptor.rs (control headers → CallDescriptor)
//!     → merge.rs (browser profile ∪ caller headers → OrderedHeaders)
//!     → configure.rs (descriptor → session + outbound request)
//!     → [session provider executes the call]
//!     → relay.rs (status/headers/body back to the caller)
//! ```

pub mod configure;
pub mod descriptor;
pub mod merge;
pub mod relay;

pub use configure::configure;
pub use descriptor::CallDescriptor;
pub use merge::merge;
pub use relay::relay;

use axum::http::HeaderMap;

/// Inbound headers captured as an ordered list at the transport boundary.
///
/// `http::HeaderMap` groups repeated names, so capturing once into a vec
/// pins a single arrival order for the whole pipeline and makes the merge
/// deterministic. Only the first value of a repeated name survives, and
/// values that are not valid UTF-8 are dropped with a diagnostic.
#[derive(Debug, Clone, Default)]
pub struct InboundHeaders {
    pairs: Vec<(String, String)>,
}

impl InboundHeaders {
    pub fn capture(headers: &HeaderMap) -> Self {
        let mut pairs: Vec<(String, String)> = Vec::with_capacity(headers.keys_len());
        for (name, value) in headers.iter() {
            let name = name.as_str();
            if pairs.iter().any(|(n, _)| n.eq_ignore_ascii_case(name)) {
                tracing::debug!(header = name, "Skipping extra value of repeated header");
                continue;
            }
            match value.to_str() {
                Ok(v) => pairs.push((name.to_string(), v.to_string())),
                Err(_) => {
                    tracing::debug!(header = name, "Skipping header with non-UTF-8 value");
                }
            }
        }
        Self { pairs }
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            pairs: pairs
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Case-insensitive lookup of the first value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}
