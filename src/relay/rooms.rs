//! Room membership registry for the relay.

use crate::games::connect_four::{Position, Role};
use crate::protocol::{RoomId, ServerMessage};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a relay connection.
pub type ConnId = u64;

/// Process-wide mapping from room id to the connections joined to it.
///
/// The relay's only shared mutable state. One lock serializes all
/// membership mutation; `forward` snapshots the membership under the lock
/// and delivers outside it. Rooms are independent, so a single registry
/// lock is contention-proportional to join/leave churn, not to move
/// traffic volume.
#[derive(Debug, Clone)]
pub struct RoomRegistry {
    rooms: Arc<Mutex<HashMap<RoomId, HashMap<ConnId, UnboundedSender<ServerMessage>>>>>,
}

impl RoomRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating room registry");
        Self {
            rooms: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Adds a connection to a room, creating the room entry if absent.
    #[instrument(skip(self, sender))]
    pub fn join(&self, room: &str, conn: ConnId, sender: UnboundedSender<ServerMessage>) {
        let mut rooms = self.rooms.lock().unwrap();
        let members = rooms.entry(room.to_string()).or_default();
        members.insert(conn, sender);
        info!(room, conn, member_count = members.len(), "Connection joined room");
    }

    /// Removes a connection from a room; discards the room entry once empty.
    #[instrument(skip(self))]
    pub fn leave(&self, room: &str, conn: ConnId) {
        let mut rooms = self.rooms.lock().unwrap();
        let Some(members) = rooms.get_mut(room) else {
            debug!(room, conn, "Leave for unknown room ignored");
            return;
        };
        members.remove(&conn);
        info!(room, conn, member_count = members.len(), "Connection left room");
        if members.is_empty() {
            rooms.remove(room);
            debug!(room, "Discarded empty room");
        }
    }

    /// Removes a connection from every room it joined.
    ///
    /// Called when a socket closes without an explicit `leave-room`, so a
    /// lost endpoint does not linger as a phantom member.
    #[instrument(skip(self))]
    pub fn leave_all(&self, conn: ConnId) {
        let mut rooms = self.rooms.lock().unwrap();
        rooms.retain(|room, members| {
            if members.remove(&conn).is_some() {
                debug!(room, conn, "Removed disconnected member");
            }
            !members.is_empty()
        });
    }

    /// Delivers a move to every member of `room` except the sender.
    ///
    /// Pure fan-out: the move and role are not validated. Forwarding to an
    /// unknown or otherwise-empty room is a no-op, not an error. Returns
    /// the number of recipients.
    #[instrument(skip(self))]
    pub fn forward(&self, room: &str, from: ConnId, position: Position, by: Role) -> usize {
        // Snapshot recipients under the lock, deliver after releasing it.
        let recipients: Vec<UnboundedSender<ServerMessage>> = {
            let rooms = self.rooms.lock().unwrap();
            match rooms.get(room) {
                Some(members) => members
                    .iter()
                    .filter(|(member, _)| **member != from)
                    .map(|(_, sender)| sender.clone())
                    .collect(),
                None => {
                    debug!(room, from, "Forward to unknown room is a no-op");
                    return 0;
                }
            }
        };

        let mut delivered = 0;
        for sender in &recipients {
            let msg = ServerMessage::ReceiveMove { position, by };
            if sender.send(msg).is_ok() {
                delivered += 1;
            } else {
                // Receiver task already gone; its leave_all will clean up.
                warn!(room, from, "Dropped forward to closed connection");
            }
        }
        debug!(room, from, %position, %by, delivered, "Forwarded move");
        delivered
    }

    /// Number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.lock().unwrap().len()
    }

    /// Number of members currently joined to `room`.
    pub fn member_count(&self, room: &str) -> usize {
        self.rooms
            .lock()
            .unwrap()
            .get(room)
            .map(|members| members.len())
            .unwrap_or(0)
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn pos(label: &str) -> Position {
        label.parse().unwrap()
    }

    #[test]
    fn test_forward_reaches_only_other_members() {
        let registry = RoomRegistry::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        registry.join("x7q2", 1, tx_a);
        registry.join("x7q2", 2, tx_b);

        let delivered = registry.forward("x7q2", 1, pos("D6"), Role::Invited);
        assert_eq!(delivered, 1);

        assert_eq!(
            rx_b.try_recv().unwrap(),
            ServerMessage::ReceiveMove {
                position: pos("D6"),
                by: Role::Invited,
            }
        );
        // The sender itself receives nothing.
        assert!(rx_a.try_recv().is_err());
    }

    #[test]
    fn test_forward_is_scoped_to_the_room() {
        let registry = RoomRegistry::new();
        let (tx_a, _rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        registry.join("room-one", 1, tx_a);
        registry.join("room-two", 2, tx_b);

        let delivered = registry.forward("room-one", 1, pos("A6"), Role::Main);
        assert_eq!(delivered, 0);
        assert!(rx_b.try_recv().is_err());
    }

    #[test]
    fn test_forward_to_unknown_room_is_a_noop() {
        let registry = RoomRegistry::new();
        assert_eq!(registry.forward("ghost", 7, pos("A1"), Role::Main), 0);
    }

    #[test]
    fn test_leave_discards_empty_room() {
        let registry = RoomRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        registry.join("x7q2", 1, tx);
        assert_eq!(registry.room_count(), 1);

        registry.leave("x7q2", 1);
        assert_eq!(registry.room_count(), 0);
        assert_eq!(registry.member_count("x7q2"), 0);
    }

    #[test]
    fn test_leave_all_cleans_every_room() {
        let registry = RoomRegistry::new();
        let (tx_1, _rx_1) = mpsc::unbounded_channel();
        let (tx_2, _rx_2) = mpsc::unbounded_channel();
        let (tx_other, _rx_other) = mpsc::unbounded_channel();
        registry.join("room-one", 1, tx_1);
        registry.join("room-two", 1, tx_2);
        registry.join("room-two", 2, tx_other);

        registry.leave_all(1);
        assert_eq!(registry.member_count("room-one"), 0);
        assert_eq!(registry.member_count("room-two"), 1);
        assert_eq!(registry.room_count(), 1);
    }
}
