//! Core domain types for Connect Four.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// One of the two fixed participant identities for a game.
///
/// Main creates the room and shares the invitation; Invited joins it
/// and always makes the first move of a fresh game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Role {
    /// The participant who created the room.
    Main,
    /// The participant who joined via invitation link.
    Invited,
}

impl Role {
    /// Returns the other participant.
    pub fn opponent(self) -> Self {
        match self {
            Role::Main => Role::Invited,
            Role::Invited => Role::Main,
        }
    }
}

/// A column of the board, A (leftmost) through G (rightmost).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    /// Leftmost column.
    A,
    /// Second column.
    B,
    /// Third column.
    C,
    /// Center column.
    D,
    /// Fifth column.
    E,
    /// Sixth column.
    F,
    /// Rightmost column.
    G,
}

impl Column {
    /// All seven columns, left to right.
    pub const ALL: [Column; 7] = [
        Column::A,
        Column::B,
        Column::C,
        Column::D,
        Column::E,
        Column::F,
        Column::G,
    ];

    /// Zero-based index of the column (A = 0).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Column letter, `'A'` through `'G'`.
    pub const fn letter(self) -> char {
        match self {
            Column::A => 'A',
            Column::B => 'B',
            Column::C => 'C',
            Column::D => 'D',
            Column::E => 'E',
            Column::F => 'F',
            Column::G => 'G',
        }
    }

    /// Column at the given zero-based index.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Column::A),
            1 => Some(Column::B),
            2 => Some(Column::C),
            3 => Some(Column::D),
            4 => Some(Column::E),
            5 => Some(Column::F),
            6 => Some(Column::G),
            _ => None,
        }
    }

    /// Column matching the given letter, case-insensitive.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(Column::A),
            'B' => Some(Column::B),
            'C' => Some(Column::C),
            'D' => Some(Column::D),
            'E' => Some(Column::E),
            'F' => Some(Column::F),
            'G' => Some(Column::G),
            _ => None,
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Error parsing a position or column label.
#[derive(Debug, Clone, Display, Error)]
#[display("invalid position label: {label}")]
pub struct ParsePositionError {
    /// The rejected input.
    pub label: String,
}

/// One of the 42 labeled cells of the board.
///
/// Labeled by column letter and row number, e.g. `D6`. Row 1 is the top
/// (where discs enter) and row 6 the bottom (where the first disc in a
/// column comes to rest).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct Position {
    column: Column,
    row: u8,
}

impl Position {
    /// All 42 positions in canonical order: columns A→G, rows 1→6
    /// within each column. Fixed for the life of the process.
    pub const ALL: [Position; 42] = {
        let mut cells = [Position {
            column: Column::A,
            row: 1,
        }; 42];
        let mut c = 0;
        while c < 7 {
            let mut r = 1u8;
            while r <= 6 {
                let column = match Column::from_index(c) {
                    Some(col) => col,
                    None => unreachable!(),
                };
                cells[c * 6 + (r as usize - 1)] = Position { column, row: r };
                r += 1;
            }
            c += 1;
        }
        cells
    };

    /// Creates a position, rejecting rows outside 1..=6.
    pub const fn new(column: Column, row: u8) -> Option<Self> {
        if row >= 1 && row <= 6 {
            Some(Self { column, row })
        } else {
            None
        }
    }

    /// The position's column.
    pub const fn column(self) -> Column {
        self.column
    }

    /// The position's row, 1 (top) through 6 (bottom).
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Position offset by whole cells, `None` if it falls off the grid.
    pub fn offset(self, d_col: i8, d_row: i8) -> Option<Self> {
        let col_index = self.column.index() as i8 + d_col;
        if !(0..7).contains(&col_index) {
            return None;
        }
        let column = Column::from_index(col_index as usize)?;
        let row = self.row as i8 + d_row;
        if !(1..=6).contains(&row) {
            return None;
        }
        Self::new(column, row as u8)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

impl std::str::FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError {
            label: s.to_string(),
        };
        let mut chars = s.trim().chars();
        let column = chars.next().and_then(Column::from_letter).ok_or_else(err)?;
        let row = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(err)?;
        if chars.next().is_some() {
            return Err(err());
        }
        Position::new(column, row as u8).ok_or_else(err)
    }
}

impl From<Position> for String {
    fn from(pos: Position) -> Self {
        pos.to_string()
    }
}

impl TryFrom<String> for Position {
    type Error = ParsePositionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Outcome of a game after a move is applied.
///
/// Derived from the move logs and the remaining available positions,
/// never stored independently of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Game is ongoing.
    InProgress,
    /// The given role completed a winning line.
    Won(Role),
    /// Board filled with no winner.
    Draw,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_has_42_cells_in_canonical_order() {
        assert_eq!(Position::ALL.len(), 42);
        // Columns A→G, rows 1→6 within each column.
        assert_eq!(Position::ALL[0].to_string(), "A1");
        assert_eq!(Position::ALL[5].to_string(), "A6");
        assert_eq!(Position::ALL[6].to_string(), "B1");
        assert_eq!(Position::ALL[41].to_string(), "G6");
    }

    #[test]
    fn test_position_round_trips_through_label() {
        for pos in Position::ALL {
            let label = pos.to_string();
            assert_eq!(label.parse::<Position>().unwrap(), pos);
        }
    }

    #[test]
    fn test_position_rejects_bad_labels() {
        assert!("H1".parse::<Position>().is_err());
        assert!("A0".parse::<Position>().is_err());
        assert!("A7".parse::<Position>().is_err());
        assert!("D66".parse::<Position>().is_err());
        assert!("".parse::<Position>().is_err());
    }

    #[test]
    fn test_position_serializes_as_label() {
        let pos: Position = "D6".parse().unwrap();
        assert_eq!(serde_json::to_string(&pos).unwrap(), "\"D6\"");
        let back: Position = serde_json::from_str("\"D6\"").unwrap();
        assert_eq!(back, pos);
    }

    #[test]
    fn test_offset_stays_on_grid() {
        let d3: Position = "D3".parse().unwrap();
        assert_eq!(d3.offset(1, 1).unwrap().to_string(), "E4");
        assert_eq!(d3.offset(-1, -1).unwrap().to_string(), "C2");
        let a1: Position = "A1".parse().unwrap();
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
    }

    #[test]
    fn test_role_opponent() {
        assert_eq!(Role::Main.opponent(), Role::Invited);
        assert_eq!(Role::Invited.opponent(), Role::Main);
    }
}
