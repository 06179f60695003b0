//! Token board, bag and field coordinates.
//!
//! ## Key Types
//!
//! - `Coord`: validated 1-based (row, col) position
//! - `TokenBoardField`: one position holding zero or one token
//! - `TokenBoard`: the 5x5 grid with spiral replenishment and line selection
//! - `TokenBag`: tokens not currently on the board

pub mod bag;
pub mod field;
pub mod token_board;

pub use bag::TokenBag;
pub use field::{Coord, TokenBoardField, BOARD_SIZE};
pub use token_board::{TokenBoard, MAX_SELECTION, REPLENISH_ORDER};
