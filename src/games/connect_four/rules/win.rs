//! Win detection for Connect Four.

use super::super::lines;
use super::super::types::Position;
use tracing::instrument;

/// Checks whether the mover's accumulated positions complete a winning line.
///
/// Fails fast when fewer than four moves exist, then narrows the catalog
/// to lines through `last_move` before checking membership: only lines
/// touching the just-placed disc can have newly become complete.
#[instrument(skip(player_moves), fields(moves = player_moves.len()))]
pub fn check_win(player_moves: &[Position], last_move: Position) -> bool {
    if player_moves.len() < 4 {
        return false;
    }

    lines::through(last_move).any(|line| line.iter().all(|pos| player_moves.contains(pos)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(labels: &[&str]) -> Vec<Position> {
        labels.iter().map(|l| l.parse().unwrap()).collect()
    }

    #[test]
    fn test_no_win_below_four_moves() {
        let log = moves(&["D6", "D5", "D4"]);
        assert!(!check_win(&log, "D4".parse().unwrap()));
    }

    #[test]
    fn test_vertical_win_in_column_d() {
        let log = moves(&["D6", "D5", "D4", "D3"]);
        assert!(check_win(&log, "D3".parse().unwrap()));
    }

    #[test]
    fn test_horizontal_win_on_bottom_row() {
        let log = moves(&["A6", "B6", "C6", "D6"]);
        assert!(check_win(&log, "D6".parse().unwrap()));
    }

    #[test]
    fn test_diagonal_win() {
        let log = moves(&["A6", "B5", "C4", "D3"]);
        assert!(check_win(&log, "D3".parse().unwrap()));
    }

    #[test]
    fn test_four_scattered_moves_do_not_win() {
        let log = moves(&["A6", "C6", "E6", "G6"]);
        assert!(!check_win(&log, "G6".parse().unwrap()));
    }

    #[test]
    fn test_line_not_through_last_move_is_ignored() {
        // The completed line must touch the disc just placed; a stale
        // last move misses it.
        let log = moves(&["A6", "B6", "C6", "D6", "A1"]);
        assert!(!check_win(&log, "A1".parse().unwrap()));
        assert!(check_win(&log, "D6".parse().unwrap()));
    }
}
