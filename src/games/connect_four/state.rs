//! Per-endpoint game state: move logs, availability, and turn arbitration.

use super::board;
use super::rules;
use super::types::{Column, GameOutcome, Position, Role};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Errors rejected when applying a move.
///
/// The relay never validates moves, so these checks are the only line of
/// defense at each endpoint. An out-of-turn or duplicate delivery from a
/// buggy peer surfaces here instead of silently corrupting the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The game already ended; no further moves are accepted.
    #[display("game is over")]
    GameOver,
    /// The same role moved twice in a row.
    #[display("{by} moved out of turn")]
    OutOfTurn {
        /// The role that attempted the move.
        by: Role,
    },
    /// The position is already occupied (or was never on the board).
    #[display("position {position} is not available")]
    Unavailable {
        /// The rejected position.
        position: Position,
    },
}

/// Read model exposed to the rendering collaborator.
///
/// A snapshot, not a live view: taken when a move actually changes the
/// game, never mutated behind the renderer's back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// Positions not yet occupied by either role.
    pub available: Vec<Position>,
    /// The most recently applied position, if any.
    pub last_move: Option<Position>,
    /// The role that made the last move.
    pub last_move_by: Role,
    /// Current outcome.
    pub outcome: GameOutcome,
}

/// Full game state for one endpoint.
///
/// Both endpoints hold a mirror of this state; the synchronization
/// protocol applies every move (local or remote) through the same
/// [`apply_move`](GameState::apply_move) path so the mirrors converge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    available: Vec<Position>,
    main_moves: Vec<Position>,
    invited_moves: Vec<Position>,
    last_move: Option<Position>,
    last_move_by: Role,
    outcome: GameOutcome,
}

impl GameState {
    /// Creates a fresh game.
    ///
    /// `last_move_by` starts as `Main` so that Invited makes the first
    /// move; this ordering is intentional (Invited always opens a game).
    pub fn new() -> Self {
        Self {
            available: Position::ALL.to_vec(),
            main_moves: Vec::new(),
            invited_moves: Vec::new(),
            last_move: None,
            last_move_by: Role::Main,
            outcome: GameOutcome::InProgress,
        }
    }

    /// Resets to game-start conditions for a rematch.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!("Resetting game state");
        *self = Self::new();
    }

    /// Positions not yet occupied in the current game.
    pub fn available(&self) -> &[Position] {
        &self.available
    }

    /// The given role's accumulated moves this game, in order.
    pub fn moves_by(&self, role: Role) -> &[Position] {
        match role {
            Role::Main => &self.main_moves,
            Role::Invited => &self.invited_moves,
        }
    }

    /// The most recently applied position.
    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }

    /// The role that made the last move.
    pub fn last_move_by(&self) -> Role {
        self.last_move_by
    }

    /// Current outcome.
    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Whether `role` may submit a move right now: strict alternation,
    /// and only while the game is in progress.
    pub fn is_turn(&self, role: Role) -> bool {
        role != self.last_move_by && self.outcome == GameOutcome::InProgress
    }

    /// Resolves a column selection against the current availability.
    ///
    /// `None` means the column is full; callers ignore the input.
    pub fn resolve_drop(&self, column: Column) -> Option<Position> {
        board::resolve_drop(column, &self.available)
    }

    /// Applies a move for `by`: appends it to the role's log, updates the
    /// last move and mover, removes the position from availability, and
    /// re-evaluates the outcome.
    ///
    /// Shared by the local and remote paths of the synchronization
    /// protocol, which is what keeps the two endpoints' mirrors identical.
    ///
    /// # Errors
    ///
    /// Rejects moves after game end, out of turn, or onto an occupied
    /// position. Turn order is also gated in the UI by disabling input;
    /// this re-check covers misbehaving remote endpoints.
    #[instrument(skip(self), fields(outcome = ?self.outcome))]
    pub fn apply_move(&mut self, position: Position, by: Role) -> Result<GameOutcome, MoveError> {
        if self.outcome != GameOutcome::InProgress {
            warn!(%position, %by, "Move rejected: game is over");
            return Err(MoveError::GameOver);
        }
        if by == self.last_move_by {
            warn!(%position, %by, "Move rejected: out of turn");
            return Err(MoveError::OutOfTurn { by });
        }
        let index = self
            .available
            .iter()
            .position(|p| *p == position)
            .ok_or_else(|| {
                warn!(%position, %by, "Move rejected: position unavailable");
                MoveError::Unavailable { position }
            })?;

        self.available.remove(index);
        match by {
            Role::Main => self.main_moves.push(position),
            Role::Invited => self.invited_moves.push(position),
        }
        self.last_move = Some(position);
        self.last_move_by = by;
        self.outcome = rules::evaluate(self.moves_by(by), by, position, &self.available);

        debug!(%position, %by, outcome = ?self.outcome, "Move applied");
        Ok(self.outcome)
    }

    /// Snapshot of the read model.
    pub fn view(&self) -> GameView {
        GameView {
            available: self.available.clone(),
            last_move: self.last_move,
            last_move_by: self.last_move_by,
            outcome: self.outcome,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
