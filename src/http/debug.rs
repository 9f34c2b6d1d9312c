//! Service and debug endpoints, outside the forwarding pipeline.

use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Liveness probe: `200` with `{"isalive":true}`.
pub async fn isalive() -> impl IntoResponse {
    Json(json!({ "isalive": true }))
}

/// Debug helper for timeout testing: holds the request for 45 seconds.
pub async fn sleep() -> StatusCode {
    tokio::time::sleep(Duration::from_secs(45)).await;
    StatusCode::OK
}

/// Debug helper: echo the inbound header set, one pair per line.
pub async fn headers(headers: HeaderMap) -> String {
    let mut out = String::new();
    for (name, value) in headers.iter() {
        let value = value.to_str().unwrap_or("<non-utf8>");
        out.push_str(&format!("{{\"{}\", \"{}\"}}\n", name, value));
    }
    out
}
