//! Wire contract between an endpoint and the room relay.
//!
//! Four message kinds, JSON-encoded, tagged by `"type"`:
//!
//! - `join-room` / `leave-room` / `send-move` travel endpoint → relay
//! - `receive-move` travels relay → endpoint, fanned out to every room
//!   member except the originator
//!
//! The relay never interprets `move` or `by`; all game-rule correctness
//! lives at the two endpoints.

use crate::games::connect_four::{Position, Role};
use serde::{Deserialize, Serialize};

/// Room identifier: an opaque token correlating exactly two endpoints
/// for the duration of one game.
pub type RoomId = String;

/// Messages an endpoint sends to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Join the named room (created on first join).
    JoinRoom {
        /// Room to join.
        room: RoomId,
    },
    /// Leave the named room.
    LeaveRoom {
        /// Room to leave.
        room: RoomId,
    },
    /// Forward a move to the other members of the room.
    SendMove {
        /// Room scoping the forward.
        room: RoomId,
        /// The position the disc landed on.
        #[serde(rename = "move")]
        position: Position,
        /// The role that made the move.
        by: Role,
    },
}

/// Messages the relay delivers to an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// A move originated by the other endpoint in the same room.
    ReceiveMove {
        /// The position the disc landed on.
        #[serde(rename = "move")]
        position: Position,
        /// The role that made the move.
        by: Role,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_move_wire_shape() {
        let msg = ClientMessage::SendMove {
            room: "x7q2".to_string(),
            position: "D6".parse().unwrap(),
            by: Role::Invited,
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(
            json,
            r#"{"type":"send-move","room":"x7q2","move":"D6","by":"Invited"}"#
        );
        assert_eq!(serde_json::from_str::<ClientMessage>(&json).unwrap(), msg);
    }

    #[test]
    fn test_join_and_leave_wire_shape() {
        let join = serde_json::to_string(&ClientMessage::JoinRoom {
            room: "x7q2".to_string(),
        })
        .unwrap();
        assert_eq!(join, r#"{"type":"join-room","room":"x7q2"}"#);

        let leave = serde_json::to_string(&ClientMessage::LeaveRoom {
            room: "x7q2".to_string(),
        })
        .unwrap();
        assert_eq!(leave, r#"{"type":"leave-room","room":"x7q2"}"#);
    }

    #[test]
    fn test_receive_move_wire_shape() {
        let json = r#"{"type":"receive-move","move":"D6","by":"Invited"}"#;
        let msg: ServerMessage = serde_json::from_str(json).unwrap();
        assert_eq!(
            msg,
            ServerMessage::ReceiveMove {
                position: "D6".parse().unwrap(),
                by: Role::Invited,
            }
        );
    }

    #[test]
    fn test_unknown_message_kind_rejected() {
        let json = r#"{"type":"start-game","room":"x7q2"}"#;
        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }
}
