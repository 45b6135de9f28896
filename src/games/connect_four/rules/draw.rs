//! Draw detection for Connect Four.

use super::super::types::Position;
use tracing::instrument;

/// Checks if the board is full (no available positions remain).
///
/// A full board with no winner indicates a draw.
#[instrument(skip(available))]
pub fn is_board_full(available: &[Position]) -> bool {
    available.is_empty()
}
