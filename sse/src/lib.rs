//! Server-Sent Events (SSE) infrastructure for pushing notifications.
//!
//! This crate owns live notification streams and delivery to them.
//!
//! # Architecture
//!
//! - **Multiple connections per user**: every open tab or device gets its own
//!   connection; unicast delivery writes to all of them.
//! - **Per-user registry entries**: the `ConnectionRegistry` keys a DashMap by
//!   user id, so a user's connections change atomically under one entry lock.
//! - **Unicast and broadcast**: `Manager::send_to_user` reports whether the user
//!   was reached, `Manager::broadcast` reports how many distinct users were reached.
//! - **Ephemeral delivery**: a user without an open stream simply misses the
//!   push; callers decide whether to store it elsewhere.
//! - **Failure isolation**: a failed write to one connection is logged and
//!   skipped. Cleanup is left to the connection's own guard.
//!
//! # Message Flow
//!
//! 1. Client opens `GET /api/notifications/stream` with a session cookie
//! 2. The web layer resolves the user and creates a channel
//! 3. `Manager::register_connection` queues the `connected` frame and registers
//!    the channel, returning a `ConnectionGuard`
//! 4. An admin or system caller posts to `/api/notifications/send` or
//!    `/api/notifications/broadcast`; the manager shapes the event and writes a
//!    `notification` frame to the matching channels
//! 5. When the client disconnects the response stream is dropped, and the
//!    guard unregisters the connection
//!
//! # Deployment constraint
//!
//! The registry is process-local. Running more than one server process needs
//! an external fan-out (shared pub/sub) so a dispatch handled by one process
//! reaches connections held by another.
//!
//! # Modules
//!
//! - `connection`: ConnectionRegistry, ConnectionId and the ConnectionGuard
//! - `manager`: unicast and broadcast delivery
//! - `message`: event types and their wire frames

pub mod connection;
pub mod manager;
pub mod message;

pub use manager::Manager;
