//! Connect Four Live - real-time two-player Connect Four.
//!
//! Two remote participants play Connect Four in real time: Main creates a
//! room and shares an invitation, Invited joins it, and moves travel
//! through a room-scoped message relay that keeps both boards in sync.
//!
//! # Architecture
//!
//! - **Game core**: board geometry, winning-line catalog, win/draw
//!   evaluation, and turn arbitration ([`GameState`] and friends)
//! - **Sync**: the move synchronization protocol each endpoint runs
//!   ([`GameSync`]) over a transport seam ([`MoveTransport`])
//! - **Relay**: a multi-tenant websocket forwarding service that fans
//!   moves out within a room and never interprets them ([`relay`])
//! - **Bootstrap**: the Main/Invited role decision and room id generation
//!
//! # Example
//!
//! ```
//! use connect_four_live::{Column, GameOutcome, GameState, Role};
//!
//! let mut state = GameState::new();
//! // Invited always opens a fresh game.
//! let drop = state.resolve_drop(Column::D).unwrap();
//! assert_eq!(drop.to_string(), "D6");
//! assert_eq!(state.apply_move(drop, Role::Invited), Ok(GameOutcome::InProgress));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod bootstrap;
mod client;
mod games;
mod protocol;
mod sync;

// Public module declarations
pub mod relay;

// Crate-level exports - bootstrap
pub use bootstrap::{Session, generate_room_id};

// Crate-level exports - relay client
pub use client::RelayClient;

// Crate-level exports - wire protocol
pub use protocol::{ClientMessage, RoomId, ServerMessage};

// Crate-level exports - synchronization
pub use sync::{GameSync, MoveTransport, SyncError};

// Crate-level exports - game types (Connect Four)
pub use games::connect_four::{
    Column, GameOutcome, GameState, GameView, MoveError, ParsePositionError, Position, Role,
    WinningLine, catalog, check_win, evaluate, is_board_full, resolve_drop, through,
};
