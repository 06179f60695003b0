//! The 5x5 token board and its selection rules.
//!
//! ## Replenishing
//!
//! Empty fields are filled from the bag in [`REPLENISH_ORDER`], a fixed
//! spiral from the center outward. The order is walked in full every time,
//! so whichever fields happen to be empty, the ones closest to the center
//! (in spiral terms) are filled first.
//!
//! ## Taking tokens
//!
//! A selection is one to three fields, in the order given:
//! - every field must hold a token;
//! - consecutive fields must touch in one of the 8 compass directions;
//! - three fields must share one step vector, i.e. form a straight line.
//!
//! Validation finishes before any field is touched, so a rejected selection
//! leaves the board exactly as it was.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::bag::TokenBag;
use super::field::{Coord, TokenBoardField, BOARD_SIZE};
use crate::core::{GameRng, Token, TokenQuantity};
use crate::error::BoardError;

/// Most fields a single selection may name.
pub const MAX_SELECTION: usize = 3;

/// Spiral fill order, center first.
pub const REPLENISH_ORDER: [Coord; 25] = [
    Coord::at(3, 3),
    Coord::at(4, 3),
    Coord::at(4, 2),
    Coord::at(3, 2),
    Coord::at(2, 2),
    Coord::at(2, 3),
    Coord::at(2, 4),
    Coord::at(3, 4),
    Coord::at(4, 4),
    Coord::at(5, 4),
    Coord::at(5, 3),
    Coord::at(5, 2),
    Coord::at(5, 1),
    Coord::at(4, 1),
    Coord::at(3, 1),
    Coord::at(2, 1),
    Coord::at(1, 1),
    Coord::at(1, 2),
    Coord::at(1, 3),
    Coord::at(1, 4),
    Coord::at(1, 5),
    Coord::at(2, 5),
    Coord::at(3, 5),
    Coord::at(4, 5),
    Coord::at(5, 5),
];

const SIDE: usize = BOARD_SIZE as usize;

/// The full grid of fields. Fields are never added or removed; only their
/// tokens change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBoard {
    fields: [[TokenBoardField; SIDE]; SIDE],
}

impl Default for TokenBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenBoard {
    /// Create a board with every field empty.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: std::array::from_fn(|r| {
                std::array::from_fn(|c| TokenBoardField::empty(Coord::at(r as u8 + 1, c as u8 + 1)))
            }),
        }
    }

    /// Look up a field by raw 1-based coordinates.
    pub fn field_at(&self, row: u8, col: u8) -> Result<&TokenBoardField, BoardError> {
        self.fields
            .get((row as usize).wrapping_sub(1))
            .and_then(|r| r.get((col as usize).wrapping_sub(1)))
            .ok_or(BoardError::OutOfBounds { row, col })
    }

    /// Look up a field.
    pub fn field(&self, coord: Coord) -> Result<&TokenBoardField, BoardError> {
        self.field_at(coord.row(), coord.col())
    }

    fn field_mut(&mut self, coord: Coord) -> Result<&mut TokenBoardField, BoardError> {
        let (row, col) = (coord.row(), coord.col());
        self.fields
            .get_mut((row as usize).wrapping_sub(1))
            .and_then(|r| r.get_mut((col as usize).wrapping_sub(1)))
            .ok_or(BoardError::OutOfBounds { row, col })
    }

    /// Token on a field, if any.
    pub fn token_at(&self, coord: Coord) -> Result<Option<Token>, BoardError> {
        Ok(self.field(coord)?.token())
    }

    /// Shuffle the bag, then fill empty fields in spiral order until either
    /// the board is full or the bag runs dry.
    ///
    /// Returns how many tokens were placed.
    pub fn replenish(&mut self, bag: &mut TokenBag, rng: &mut GameRng) -> usize {
        bag.shuffle(rng);

        let mut placed = 0;
        for coord in REPLENISH_ORDER {
            let field = &mut self.fields[coord.row() as usize - 1][coord.col() as usize - 1];
            if !field.is_empty() {
                continue;
            }
            match bag.draw() {
                Some(token) => {
                    field.place(token);
                    placed += 1;
                }
                None => {
                    debug!(placed, "bag ran out while replenishing");
                    break;
                }
            }
        }

        debug!(placed, remaining = bag.len(), "board replenished");
        placed
    }

    /// Remove and return the tokens on the selected fields, in selection order.
    pub fn take_tokens(&mut self, coords: &[Coord]) -> Result<Vec<Token>, BoardError> {
        self.check_selection(coords)?;

        let mut taken = Vec::with_capacity(coords.len());
        for &coord in coords {
            if let Some(token) = self.field_mut(coord)?.clear() {
                taken.push(token);
            }
        }

        debug!(?coords, ?taken, "tokens taken from board");
        Ok(taken)
    }

    /// Validate a selection against the current board without changing it.
    pub fn check_selection(&self, coords: &[Coord]) -> Result<(), BoardError> {
        if coords.is_empty() || coords.len() > MAX_SELECTION {
            return Err(BoardError::invalid(format!(
                "select between 1 and {} fields, got {}",
                MAX_SELECTION,
                coords.len()
            )));
        }

        for (i, coord) in coords.iter().enumerate() {
            if coords[..i].contains(coord) {
                return Err(BoardError::invalid(format!("field {} selected twice", coord)));
            }
        }

        for &coord in coords {
            if self.field(coord)?.is_empty() {
                return Err(BoardError::EmptyField(coord));
            }
        }

        for pair in coords.windows(2) {
            if !pair[0].is_adjacent(pair[1]) {
                return Err(BoardError::NotAdjacent {
                    from: pair[0],
                    to: pair[1],
                });
            }
        }

        if let [a, b, c] = *coords {
            if a.step_to(b) != b.step_to(c) {
                return Err(BoardError::NotAligned(a, b, c));
            }
        }

        Ok(())
    }

    // === Snapshots ===

    /// Token grid, row-major, 0-based indices.
    #[must_use]
    pub fn grid(&self) -> [[Option<Token>; SIDE]; SIDE] {
        std::array::from_fn(|r| std::array::from_fn(|c| self.fields[r][c].token()))
    }

    /// Iterate over every field, row-major.
    pub fn fields(&self) -> impl Iterator<Item = &TokenBoardField> {
        self.fields.iter().flatten()
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.fields().filter(|f| !f.is_empty()).count()
    }

    /// Tokens currently on the board grouped by color.
    #[must_use]
    pub fn contents(&self) -> TokenQuantity {
        self.fields().filter_map(|f| f.token()).collect()
    }
}

impl std::fmt::Display for TokenBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.fields {
            let line: Vec<String> = row
                .iter()
                .map(|field| match field.token() {
                    Some(token) => token.abbreviation().to_string(),
                    None => ".".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
