mod board;
mod piece;

pub use board::Board;
pub use piece::{Color, Piece, PieceType};

use std::fmt;
use std::str::FromStr;

/// Board dimension (rows and columns)
pub const BOARD_SIZE: usize = 8;

/// Error when parsing a square name such as `e2`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid square name: '{0}'")]
pub struct InvalidSquare(pub String);

/// Board coordinate (row 0 = Black's home rank, row 7 = White's, col 0 = a-file).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Returns `None` if either component is off the board.
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> usize {
        self.row as usize
    }

    #[inline]
    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// Step by a signed offset, returning `None` when it leaves the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = (self.row as i8).checked_add(d_row)?;
        let col = (self.col as i8).checked_add(d_col)?;
        if row < 0 || col < 0 {
            return None;
        }
        Self::new(row as usize, col as usize)
    }

    /// All 64 coordinates, row by row from Black's home rank.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord::at(row, col)))
    }

    /// Internal constructor for indices already known to be in range.
    pub(crate) const fn at(row: usize, col: usize) -> Self {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Self {
            row: row as u8,
            col: col as u8,
        }
    }
}

// Rows count down from rank 8; shakmaty squares count up from a1.
impl From<Coord> for shakmaty::Square {
    fn from(coord: Coord) -> Self {
        let index = (BOARD_SIZE - 1 - coord.row()) * BOARD_SIZE + coord.col();
        shakmaty::Square::new(index as u32)
    }
}

impl From<shakmaty::Square> for Coord {
    fn from(square: shakmaty::Square) -> Self {
        let index = u32::from(square) as usize;
        Coord::at(BOARD_SIZE - 1 - index / BOARD_SIZE, index % BOARD_SIZE)
    }
}

impl FromStr for Coord {
    type Err = InvalidSquare;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<shakmaty::Square>()
            .map(Coord::from)
            .map_err(|_| InvalidSquare(s.to_string()))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shakmaty::Square::from(*self))
    }
}
