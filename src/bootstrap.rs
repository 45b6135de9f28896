//! Session/role bootstrap.
//!
//! Decides, once per endpoint at startup, whether it is Main or Invited
//! and which room it belongs to. This single bit (plus the room id for
//! Invited) is the only thing the core consumes from the outside world.

use crate::protocol::RoomId;
use tracing::{info, instrument};

/// The bootstrap decision for one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    /// No invitation supplied: this endpoint is Main and will create a
    /// room on user action.
    Main,
    /// An invitation names the room created by Main; this endpoint is
    /// Invited and joins it immediately.
    Invited {
        /// Room id parsed from the invitation.
        room: RoomId,
    },
}

impl Session {
    /// Derives the session from an externally supplied invitation token.
    ///
    /// Blank input means Main; anything else is treated as the room id
    /// (a leading `/` from a pasted link path is tolerated).
    #[instrument]
    pub fn from_invitation(invitation: Option<&str>) -> Self {
        let token = invitation
            .map(|raw| raw.trim().trim_start_matches('/'))
            .unwrap_or("");
        if token.is_empty() {
            info!("No invitation, endpoint is Main");
            Session::Main
        } else {
            info!(room = token, "Invitation present, endpoint is Invited");
            Session::Invited {
                room: token.to_string(),
            }
        }
    }
}

/// Generates a fresh room id: a 64-bit random value in hex.
///
/// Unique enough for the relay's lifetime; rooms are never reused across
/// games, so collisions would require two simultaneous draws to match.
pub fn generate_room_id() -> RoomId {
    format!("{:016x}", rand::random::<u64>())
}
