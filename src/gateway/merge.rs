//! Header merge engine: browser profile under caller overrides.
//!
//! # Responsibilities
//! - Start from the profile's canonical ordered header list
//! - Append caller headers that are neither reserved nor already in
//!   the profile, in inbound arrival order
//! - Keep reserved control headers out of the outbound set
//!
//! # Design Decisions
//! - A name present in the profile is never duplicated, reordered, or
//!   overridden by caller input; the profile's order is the fingerprint
//! - Pure function over the captured inbound list, so merging the same
//!   input twice yields an identical result

use crate::config::ControlHeaders;
use crate::gateway::InboundHeaders;
use crate::profile::OrderedHeaders;

/// Build the outbound ordered header list.
pub fn merge(
    profile: &OrderedHeaders,
    inbound: &InboundHeaders,
    control: &ControlHeaders,
) -> OrderedHeaders {
    let mut merged = profile.clone();

    for (name, value) in inbound.iter() {
        if control.is_reserved(name) {
            continue;
        }
        if merged.contains(name) {
            tracing::trace!(header = name, "Profile already defines header, keeping profile value");
            continue;
        }
        if value.is_empty() {
            tracing::debug!(header = name, "Skipping header with empty value");
            continue;
        }
        merged.push(name, value);
    }

    merged
}
