//! Board geometry: column-drop resolution over the available positions.

use super::types::{Column, Position};
use tracing::instrument;

/// Resolves a column selection to the position a dropped disc lands on.
///
/// Filters `available` to the chosen column and picks the position with
/// the greatest row number (discs fall to the lowest empty row). Returns
/// `None` when the column is full, which callers treat as a silent no-op
/// rather than an error.
///
/// Pure and deterministic: neither input is mutated.
#[instrument(skip(available))]
pub fn resolve_drop(column: Column, available: &[Position]) -> Option<Position> {
    available
        .iter()
        .filter(|pos| pos.column() == column)
        .max_by_key(|pos| pos.row())
        .copied()
}
