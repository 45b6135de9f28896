mod board;
mod lines;
mod rules;
mod state;
mod types;

pub use board::resolve_drop;
pub use lines::{LINE_COUNT, WinningLine, catalog, through};
pub use rules::{check_win, evaluate, is_board_full};
pub use state::{GameState, GameView, MoveError};
pub use types::{Column, GameOutcome, ParsePositionError, Position, Role};
