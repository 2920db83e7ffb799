//! SSE HTTP handler for the web layer.
//!
//! This module contains only the Axum handler for the notification stream.
//! The registry and delivery logic live in the `sse` crate.

pub mod handler;
