//! Core types for the notification push subsystem.
//!
//! `notification` owns the wire shapes (inbound draft, validated notification,
//! outbound event) and the rules that turn one into the next. `error` holds the
//! layered error type shared by the `sse` and `web` crates.

pub mod error;
pub mod notification;

/// User identity as resolved from the session store.
pub type UserId = String;
