use crate::connection::{ConnectionGuard, ConnectionInfo, ConnectionRegistry, FrameSender, UserId};
use crate::message::{Event, Frame};
use chrono::Utc;
use domain::error::Error;
use domain::notification::Notification;
use log::*;
use std::sync::Arc;

/// Delivers notifications to live connections.
///
/// One instance is created at server start and shared through `AppState`;
/// tests build their own to get an isolated registry.
pub struct Manager {
    registry: Arc<ConnectionRegistry>,
}

impl Manager {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(ConnectionRegistry::new()),
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Register a new connection for `user_id`.
    ///
    /// The `connected` frame is queued on the channel before the channel becomes
    /// visible to deliveries, so it is always the first frame the client reads.
    /// Dropping the returned guard unregisters the connection.
    pub fn register_connection(
        &self,
        user_id: UserId,
        sender: FrameSender,
    ) -> Result<ConnectionGuard, Error> {
        let frame = Frame::encode(&Event::connected())?;
        if sender.send(frame).is_err() {
            debug!("Client for user {user_id} went away before registration");
        }

        let connection_id = self.registry.register(user_id.clone(), sender);
        info!(
            "Registered connection {} for user {} ({} users connected)",
            connection_id.as_str(),
            user_id,
            self.registry.user_count()
        );

        Ok(ConnectionGuard::new(
            Arc::clone(&self.registry),
            user_id,
            connection_id,
        ))
    }

    /// Push `notification` to every connection `user_id` has open.
    ///
    /// Returns `Ok(false)` when the user is not connected (or every write failed);
    /// that is an expected outcome, not an error.
    pub fn send_to_user(&self, user_id: &str, notification: Notification) -> Result<bool, Error> {
        let connections = self.registry.get(user_id);
        if connections.is_empty() {
            debug!("User {user_id} has no open notification stream");
            return Ok(false);
        }

        let frame = Self::notification_frame(notification)?;
        let delivered = Self::write_all(&connections, &frame);
        debug!(
            "Delivered notification to {delivered}/{} connection(s) of user {user_id}",
            connections.len()
        );

        Ok(delivered > 0)
    }

    /// Push `notification` to every connected user and return how many distinct
    /// users received it on at least one connection.
    pub fn broadcast(&self, notification: Notification) -> Result<usize, Error> {
        let frame = Self::notification_frame(notification)?;

        let mut sent_to = 0;
        for (user_id, connections) in self.registry.get_all() {
            if Self::write_all(&connections, &frame) > 0 {
                sent_to += 1;
            } else {
                debug!("Broadcast reached no connection of user {user_id}");
            }
        }

        info!("Broadcast notification to {sent_to} user(s)");
        Ok(sent_to)
    }

    fn notification_frame(notification: Notification) -> Result<Frame, Error> {
        let event = Event::Notification(notification.into_event(Utc::now()));
        Ok(Frame::encode(&event)?)
    }

    /// Write `frame` to each connection, returning the number of successful writes.
    /// Failed writes are logged and left for the transport's abort to clean up.
    fn write_all(connections: &[ConnectionInfo], frame: &Frame) -> usize {
        connections
            .iter()
            .filter(|connection| match connection.send(frame.clone()) {
                Ok(()) => true,
                Err(e) => {
                    warn!(
                        "Failed to send event to connection {} of user {}: {}",
                        connection.connection_id.as_str(),
                        connection.user_id,
                        e
                    );
                    false
                }
            })
            .count()
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}
