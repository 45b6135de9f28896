//! The fixed catalog of winning lines.
//!
//! Every 4-consecutive-cell run that fits on the 7×6 grid, in each of the
//! four directions (horizontal, vertical, both diagonals). Generated once,
//! read-only input to the win rule.

use super::types::Position;
use std::sync::LazyLock;

/// An unordered set of four positions that wins the game when fully
/// occupied by one role.
pub type WinningLine = [Position; 4];

/// 24 horizontal + 21 vertical + 24 diagonal lines.
pub const LINE_COUNT: usize = 69;

static CATALOG: LazyLock<Vec<WinningLine>> = LazyLock::new(generate);

/// The complete winning-line catalog.
pub fn catalog() -> &'static [WinningLine] {
    &CATALOG
}

/// Lines containing the given position.
///
/// Only lines touching the just-placed disc can have newly become
/// complete, so the win rule narrows to these before the full check.
pub fn through(pos: Position) -> impl Iterator<Item = &'static WinningLine> {
    catalog().iter().filter(move |line| line.contains(&pos))
}

fn generate() -> Vec<WinningLine> {
    // Direction deltas in (column, row) cells. Row numbers grow downward,
    // so (1, 1) runs toward the bottom-right and (1, -1) toward the
    // top-right; together they cover both diagonal orientations.
    const DIRECTIONS: [(i8, i8); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

    let mut lines = Vec::with_capacity(LINE_COUNT);
    for (d_col, d_row) in DIRECTIONS {
        for start in Position::ALL {
            let run: Option<Vec<Position>> = (0..4i8)
                .map(|step| start.offset(d_col * step, d_row * step))
                .collect();
            if let Some(run) = run {
                lines.push([run[0], run[1], run[2], run[3]]);
            }
        }
    }
    debug_assert_eq!(lines.len(), LINE_COUNT);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_catalog_has_exactly_69_lines() {
        assert_eq!(catalog().len(), LINE_COUNT);
    }

    #[test]
    fn test_catalog_breakdown_by_direction() {
        let horizontal = catalog()
            .iter()
            .filter(|l| l[0].row() == l[1].row())
            .count();
        let vertical = catalog()
            .iter()
            .filter(|l| l[0].column() == l[1].column())
            .count();
        assert_eq!(horizontal, 24);
        assert_eq!(vertical, 21);
        assert_eq!(catalog().len() - horizontal - vertical, 24);
    }

    #[test]
    fn test_no_duplicate_lines() {
        let unique: BTreeSet<BTreeSet<Position>> = catalog()
            .iter()
            .map(|line| line.iter().copied().collect())
            .collect();
        assert_eq!(unique.len(), LINE_COUNT);
    }

    #[test]
    fn test_every_line_has_four_distinct_cells_on_grid() {
        for line in catalog() {
            let cells: BTreeSet<Position> = line.iter().copied().collect();
            assert_eq!(cells.len(), 4);
        }
    }

    #[test]
    fn test_known_lines_present() {
        let line = |labels: [&str; 4]| labels.map(|l| l.parse::<Position>().unwrap());

        let top_row = line(["A1", "B1", "C1", "D1"]);
        let d_column = line(["D3", "D4", "D5", "D6"]);
        let diagonal = line(["A1", "B2", "C3", "D4"]);
        let anti_diagonal = line(["A4", "B3", "C2", "D1"]);

        for expected in [top_row, d_column, diagonal, anti_diagonal] {
            assert!(
                catalog().iter().any(|l| {
                    let mut a = *l;
                    let mut b = expected;
                    a.sort();
                    b.sort();
                    a == b
                }),
                "missing line {expected:?}"
            );
        }
    }

    #[test]
    fn test_through_narrows_to_touching_lines() {
        let d6: Position = "D6".parse().unwrap();
        let narrowed: Vec<_> = through(d6).collect();
        assert!(!narrowed.is_empty());
        assert!(narrowed.iter().all(|line| line.contains(&d6)));
        assert!(narrowed.len() < catalog().len());
    }
}
