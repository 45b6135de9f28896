//! Tests for board geometry and the winning-line catalog.

use connect_four_live::{Column, Position, catalog, resolve_drop, through};
use std::collections::BTreeSet;

fn pos(label: &str) -> Position {
    label.parse().unwrap()
}

#[test]
fn test_resolve_drop_picks_max_row_in_every_column() {
    // For every column with at least one available slot, the drop lands
    // on the available position with the greatest row number.
    let available: Vec<Position> = Position::ALL
        .iter()
        .copied()
        .filter(|p| !matches!(p.to_string().as_str(), "A6" | "A5" | "D6" | "G6" | "G5" | "G4"))
        .collect();

    for column in Column::ALL {
        let landed = resolve_drop(column, &available).unwrap();
        let expected = available
            .iter()
            .filter(|p| p.column() == column)
            .map(|p| p.row())
            .max()
            .unwrap();
        assert_eq!(landed.column(), column);
        assert_eq!(landed.row(), expected);
    }
}

#[test]
fn test_resolve_drop_on_full_column_is_none() {
    let available: Vec<Position> = Position::ALL
        .iter()
        .copied()
        .filter(|p| p.column() != Column::D)
        .collect();
    let before = available.clone();

    assert_eq!(resolve_drop(Column::D, &available), None);
    assert_eq!(available, before, "availability must be untouched");
}

#[test]
fn test_catalog_is_69_unique_lines_on_the_grid() {
    assert_eq!(catalog().len(), 69);

    let unique: BTreeSet<BTreeSet<Position>> = catalog()
        .iter()
        .map(|line| line.iter().copied().collect())
        .collect();
    assert_eq!(unique.len(), 69, "no duplicate lines");

    let board: BTreeSet<Position> = Position::ALL.iter().copied().collect();
    for line in catalog() {
        assert_eq!(line.len(), 4);
        for cell in line {
            assert!(board.contains(cell), "line cell off the grid: {cell}");
        }
    }
}

#[test]
fn test_every_cell_lies_on_at_least_one_line() {
    for cell in Position::ALL {
        assert!(through(cell).count() >= 3, "{cell} touches too few lines");
    }
}

#[test]
fn test_corner_and_center_line_counts() {
    // Corners touch the fewest lines, the center cells the most.
    assert_eq!(through(pos("A1")).count(), 3);
    assert_eq!(through(pos("G6")).count(), 3);
    assert_eq!(through(pos("D3")).count(), 13);
    assert_eq!(through(pos("D4")).count(), 13);
}
