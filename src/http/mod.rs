//! HTTP surface of the gateway.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, forwarding handler)
//!     → gateway pipeline (translate → merge → configure → relay)
//!     → response to caller
//!
//! /isalive, /sleep, /headers → debug.rs (no pipeline involvement)
//! ```

pub mod debug;
pub mod server;

pub use server::{build_router, AppState, HttpServer};
