//! Win/draw evaluation rules.

mod draw;
mod win;

pub use draw::is_board_full;
pub use win::check_win;

use super::types::{GameOutcome, Position, Role};

/// Decides win/draw/continue after a move by `by`.
///
/// Depends only on its inputs: repeated calls with identical state yield
/// identical outcomes.
pub fn evaluate(
    player_moves: &[Position],
    by: Role,
    last_move: Position,
    available: &[Position],
) -> GameOutcome {
    if check_win(player_moves, last_move) {
        GameOutcome::Won(by)
    } else if is_board_full(available) {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}
