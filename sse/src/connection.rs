use crate::message::Frame;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use log::*;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::error::SendError;
use tokio::sync::mpsc::UnboundedSender;

pub use domain::UserId;

/// Write half of a client stream.
pub type FrameSender = UnboundedSender<Frame>;

/// Unique identifier for a connection (server-generated)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// One live client stream.
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connection_id: ConnectionId,
    pub user_id: UserId,
    pub sender: FrameSender,
    pub connected_at: DateTime<Utc>,
}

impl ConnectionInfo {
    /// Fails only when the client side of the channel has already gone away.
    pub fn send(&self, frame: Frame) -> Result<(), SendError<Frame>> {
        self.sender.send(frame)
    }
}

/// Live connections keyed by user.
///
/// Each user's connections sit behind a single DashMap entry, so registering,
/// unregistering and reading a user happen under that entry's shard lock and
/// readers never observe a half-applied change. The registry performs no I/O.
pub struct ConnectionRegistry {
    connections: DashMap<UserId, HashMap<ConnectionId, ConnectionInfo>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Register a new connection. A user may hold any number of them.
    pub fn register(&self, user_id: UserId, sender: FrameSender) -> ConnectionId {
        let connection_id = ConnectionId::new();
        let info = ConnectionInfo {
            connection_id: connection_id.clone(),
            user_id: user_id.clone(),
            sender,
            connected_at: Utc::now(),
        };

        self.connections
            .entry(user_id)
            .or_default()
            .insert(connection_id.clone(), info);

        connection_id
    }

    /// Unregister a connection. Unknown users or connections are a no-op since
    /// disconnects may race with other cleanup. Returns whether anything was removed.
    pub fn unregister(&self, user_id: &str, connection_id: &ConnectionId) -> bool {
        let removed = match self.connections.get_mut(user_id) {
            Some(mut entry) => entry.remove(connection_id).is_some(),
            None => false,
        };

        // Drop the user once their last connection is gone; the check runs under
        // the entry lock so a concurrent register is never discarded.
        self.connections
            .remove_if(user_id, |_, connections| connections.is_empty());

        removed
    }

    /// Connections currently open for `user_id`, empty if none.
    pub fn get(&self, user_id: &str) -> Vec<ConnectionInfo> {
        self.connections
            .get(user_id)
            .map(|entry| entry.values().cloned().collect::<Vec<_>>())
            .unwrap_or_default()
    }

    /// Snapshot of every connected user and their connections.
    pub fn get_all(&self) -> HashMap<UserId, Vec<ConnectionInfo>> {
        self.connections
            .iter()
            .map(|entry| {
                (
                    entry.key().clone(),
                    entry.value().values().cloned().collect::<Vec<_>>(),
                )
            })
            .collect()
    }

    pub fn user_count(&self) -> usize {
        self.connections.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.iter().map(|entry| entry.value().len()).sum()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps a connection registered for as long as it is alive.
///
/// The stream endpoint moves this into the response body; when the transport
/// drops the body on client abort, the connection is unregistered.
pub struct ConnectionGuard {
    registry: Arc<ConnectionRegistry>,
    user_id: UserId,
    connection_id: ConnectionId,
}

impl ConnectionGuard {
    pub(crate) fn new(
        registry: Arc<ConnectionRegistry>,
        user_id: UserId,
        connection_id: ConnectionId,
    ) -> Self {
        Self {
            registry,
            user_id,
            connection_id,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if self.registry.unregister(&self.user_id, &self.connection_id) {
            info!(
                "Connection {} for user {} closed",
                self.connection_id.as_str(),
                self.user_id
            );
        }
    }
}
