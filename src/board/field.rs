//! Board coordinates and fields.

use serde::{Deserialize, Serialize};

use crate::core::Token;
use crate::error::BoardError;

/// Side length of the square board.
pub const BOARD_SIZE: u8 = 5;

/// A validated 1-based (row, col) position on the board.
///
/// Construction is the only place bounds are decided; a `Coord` that exists
/// is always on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Create a coordinate, rejecting anything outside `1..=5` on either axis.
    pub fn new(row: u8, col: u8) -> Result<Self, BoardError> {
        if (1..=BOARD_SIZE).contains(&row) && (1..=BOARD_SIZE).contains(&col) {
            Ok(Self { row, col })
        } else {
            Err(BoardError::OutOfBounds { row, col })
        }
    }

    /// Unchecked constructor for compile-time tables.
    pub(crate) const fn at(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Step vector (Δrow, Δcol) from `self` to `other`.
    #[must_use]
    pub fn step_to(self, other: Coord) -> (i8, i8) {
        (
            other.row as i8 - self.row as i8,
            other.col as i8 - self.col as i8,
        )
    }

    /// Adjacent in any of the 8 compass directions.
    ///
    /// A coordinate is not adjacent to itself.
    #[must_use]
    pub fn is_adjacent(self, other: Coord) -> bool {
        let (dr, dc) = self.step_to(other);
        self != other && dr.abs() <= 1 && dc.abs() <= 1
    }

    /// Every coordinate on the board, row-major.
    pub fn all() -> impl Iterator<Item = Coord> {
        (1..=BOARD_SIZE).flat_map(|row| (1..=BOARD_SIZE).map(move |col| Coord::at(row, col)))
    }
}

impl TryFrom<(u8, u8)> for Coord {
    type Error = BoardError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Coord::new(row, col)
    }
}

impl From<Coord> for (u8, u8) {
    fn from(coord: Coord) -> Self {
        (coord.row, coord.col)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One board field: a fixed position holding zero or one token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBoardField {
    coord: Coord,
    token: Option<Token>,
}

impl TokenBoardField {
    #[must_use]
    pub fn empty(coord: Coord) -> Self {
        Self { coord, token: None }
    }

    #[must_use]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.token
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token.is_none()
    }

    pub(crate) fn place(&mut self, token: Token) {
        self.token = Some(token);
    }

    pub(crate) fn clear(&mut self) -> Option<Token> {
        self.token.take()
    }
}
