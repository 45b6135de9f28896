//! Move synchronization between the two endpoints of a game.
//!
//! A move resolved locally is applied to local state and transmitted in
//! the same step (optimistic, no round-trip wait); a move delivered by the
//! relay is applied through the identical path. Both endpoints therefore
//! converge to the same board provided the relay delivers every message
//! exactly once and in order — there is no acknowledgement, sequencing, or
//! reconciliation beyond that assumption.

use crate::bootstrap::{Session, generate_room_id};
use crate::games::connect_four::{
    Column, GameOutcome, GameState, GameView, MoveError, Position, Role,
};
use crate::protocol::{ClientMessage, RoomId};
use derive_more::{Display, Error, From};
use tracing::{debug, info, instrument, warn};

/// Errors from the synchronization layer.
#[derive(Debug, Clone, Display, Error, From)]
pub enum SyncError {
    /// The relay connection is gone; no further messages can be sent.
    #[display("relay transport closed")]
    #[from(ignore)]
    TransportClosed,
    /// Could not reach the relay.
    #[display("failed to reach relay: {message}")]
    #[from(ignore)]
    Connect {
        /// Underlying failure description.
        message: String,
    },
    /// A move was rejected by the game state.
    #[display("{_0}")]
    Move(MoveError),
}

/// Outbound half of a relay connection.
///
/// The seam between game synchronization and the websocket plumbing;
/// tests substitute an in-memory implementation.
pub trait MoveTransport {
    /// Queues a message toward the relay.
    fn send(&mut self, msg: ClientMessage) -> Result<(), SyncError>;
}

/// One endpoint's synchronization state: its role, its current room, and
/// the mirrored game state.
///
/// Owns the relay connection for the life of the session, with a defined
/// teardown point: when a game ends, the room is left and dropped, and a
/// rematch requires a fresh room.
#[derive(Debug)]
pub struct GameSync<T: MoveTransport> {
    transport: T,
    role: Role,
    room: Option<RoomId>,
    state: GameState,
}

impl<T: MoveTransport> GameSync<T> {
    /// Creates an idle endpoint with no active room.
    pub fn new(transport: T, role: Role) -> Self {
        Self {
            transport,
            role,
            room: None,
            state: GameState::new(),
        }
    }

    /// Builds the endpoint from the bootstrap decision: Invited joins the
    /// room named in the invitation immediately, Main stays idle until it
    /// creates one.
    pub fn from_session(transport: T, session: Session) -> Result<Self, SyncError> {
        match session {
            Session::Main => Ok(Self::new(transport, Role::Main)),
            Session::Invited { room } => {
                let mut sync = Self::new(transport, Role::Invited);
                sync.start_game(room)?;
                Ok(sync)
            }
        }
    }

    /// This endpoint's role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The active room, if a game is underway.
    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    /// Whether the local role may submit a move right now.
    pub fn is_my_turn(&self) -> bool {
        self.room.is_some() && self.state.is_turn(self.role)
    }

    /// Read-model snapshot for the rendering collaborator.
    pub fn view(&self) -> GameView {
        self.state.view()
    }

    /// Creates a fresh room, joins it, and resets the game (Main's path;
    /// also how a rematch starts, since rooms are never reused).
    ///
    /// Returns the room id for invitation display.
    #[instrument(skip(self), fields(role = %self.role))]
    pub fn create_room(&mut self) -> Result<RoomId, SyncError> {
        let room = generate_room_id();
        self.start_game(room.clone())?;
        Ok(room)
    }

    /// Joins `room` and resets state to game-start conditions.
    #[instrument(skip(self), fields(role = %self.role))]
    pub fn start_game(&mut self, room: RoomId) -> Result<(), SyncError> {
        self.transport
            .send(ClientMessage::JoinRoom { room: room.clone() })?;
        self.state.reset();
        info!(room, role = %self.role, "Game started");
        self.room = Some(room);
        Ok(())
    }

    /// Handles a column selection from the rendering layer.
    ///
    /// Silently ignored (`Ok(None)`) when no game is active, when it is
    /// not the local role's turn, or when the column is full — all no-ops,
    /// not errors. Otherwise resolves the drop, transmits it, applies it
    /// locally without waiting, and returns the landed position.
    #[instrument(skip(self), fields(role = %self.role))]
    pub fn request_move(&mut self, column: Column) -> Result<Option<Position>, SyncError> {
        let Some(room) = self.room.clone() else {
            debug!(%column, "No active game, input ignored");
            return Ok(None);
        };
        if !self.state.is_turn(self.role) {
            debug!(%column, "Not our turn, input ignored");
            return Ok(None);
        }
        let Some(position) = self.state.resolve_drop(column) else {
            debug!(%column, "Column full, input ignored");
            return Ok(None);
        };

        self.transport.send(ClientMessage::SendMove {
            room,
            position,
            by: self.role,
        })?;
        self.apply(position, self.role)?;
        Ok(Some(position))
    }

    /// Applies a move delivered by the relay from the other endpoint.
    #[instrument(skip(self), fields(role = %self.role))]
    pub fn on_remote_move(
        &mut self,
        position: Position,
        by: Role,
    ) -> Result<GameOutcome, SyncError> {
        if by == self.role {
            // The relay never echoes to the sender; seeing our own role
            // here means the peer is claiming the wrong identity.
            warn!(%position, %by, "Remote move claims our own role");
        }
        self.apply(position, by)
    }

    /// Shared apply path for local and remote moves. A terminal outcome
    /// leaves the room: the session's teardown point.
    fn apply(&mut self, position: Position, by: Role) -> Result<GameOutcome, SyncError> {
        let outcome = self.state.apply_move(position, by)?;
        if outcome != GameOutcome::InProgress {
            info!(%position, %by, ?outcome, "Game over");
            self.leave_room()?;
        }
        Ok(outcome)
    }

    fn leave_room(&mut self) -> Result<(), SyncError> {
        if let Some(room) = self.room.take() {
            self.transport.send(ClientMessage::LeaveRoom { room })?;
        }
        Ok(())
    }
}
