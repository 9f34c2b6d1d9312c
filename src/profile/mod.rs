//! Browser fingerprint profiles.
//!
//! # Responsibilities
//! - Define the canonical, ordered header lists real browsers send
//! - Provide case-insensitive lookup by header name
//! - Resolve a profile by its configured name
//!
//! # Design Decisions
//! - Header order is part of the fingerprint, so profiles are ordered
//!   lists of pairs, not maps
//! - The table is built once at startup and shared read-only

use std::collections::HashMap;

/// An order-significant list of `(name, value)` header pairs.
///
/// The fingerprint engine sends headers in exactly this order, so the
/// sequence is as much a part of the data as the values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedHeaders {
    pairs: Vec<(String, String)>,
}

impl OrderedHeaders {
    pub fn new() -> Self {
        Self::default()
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

    /// Case-insensitive presence check.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Append a pair at the end of the list.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<'a> IntoIterator for &'a OrderedHeaders {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Named browser profile table, built once at startup.
#[derive(Debug, Clone)]
pub struct BrowserProfiles {
    profiles: HashMap<String, OrderedHeaders>,
}

/// Profile used when the configured name is unknown.
pub const DEFAULT_PROFILE: &str = "chrome-126";

impl BrowserProfiles {
    pub fn builtin() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(DEFAULT_PROFILE.to_string(), chrome_126());
        profiles.insert("chrome-126-ajax".to_string(), chrome_126_ajax());
        Self { profiles }
    }

    /// Look up a profile by name, falling back to the default profile.
    pub fn get(&self, name: &str) -> &OrderedHeaders {
        self.profiles.get(name).unwrap_or_else(|| {
            tracing::warn!(profile = name, "Unknown browser profile, using default");
            &self.profiles[DEFAULT_PROFILE]
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

/// Chrome 126 navigation headers, in the order Chrome emits them.
pub fn chrome_126() -> OrderedHeaders {
    OrderedHeaders::from_pairs(&[
        ("sec-ch-ua", r#""Not/A)Brand";v="8", "Chromium";v="126", "Google Chrome";v="126""#),
        ("sec-ch-ua-mobile", "?0"),
        ("sec-ch-ua-platform", r#""Windows""#),
        ("upgrade-insecure-requests", "1"),
        ("user-agent", "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36"),
        ("accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7"),
        ("sec-fetch-site", "none"),
        ("sec-fetch-mode", "navigate"),
        ("sec-fetch-user", "?1"),
        ("sec-fetch-dest", "document"),
        ("accept-encoding", "gzip, deflate, br"),
        ("accept-language", "en-US,en;q=0.9"),
    ])
}

/// Chrome 126 headers for XHR/fetch traffic.
pub fn chrome_126_ajax() -> OrderedHeaders {
    OrderedHeaders::from_pairs(&[
        ("sec-ch-ua", r#""Not/A)Brand";v="8", "Chromium";v="126", "Google Chrome";v="126""#),
        ("sec-ch-ua-mobile", "?0"),
        ("sec-ch-ua-platform", r#""Windows""#),
        ("user-agent", "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36"),
        ("accept", "application/json, text/plain, */*"),
        ("sec-fetch-site", "same-origin"),
        ("sec-fetch-mode", "cors"),
        ("sec-fetch-dest", "empty"),
        ("accept-encoding", "gzip, deflate, br"),
        ("accept-language", "en-US,en;q=0.9"),
    ])
}
