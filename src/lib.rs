//! # crown-duel
//!
//! Rules engine for a turn-based token-board and card-purchasing game in the
//! style of Splendor Duel.
//!
//! ## Design Principles
//!
//! 1. **Atomic Turns**: A turn is validated and applied as one unit. A
//!    rejected action leaves the board, piles, bag and players unchanged.
//!
//! 2. **No Stored Scores**: Crowns and prestige are recomputed from acquired
//!    cards on every call.
//!
//! 3. **No I/O**: Decisions come in through `DecisionSource`, snapshots go out
//!    as plain values. Logging goes through `tracing`; installing a
//!    subscriber is up to the caller.
//!
//! 4. **Deterministic**: Every shuffle and random choice draws from one
//!    seeded `GameRng`.
//!
//! ## Modules
//!
//! - `core`: Tokens, seats, actions, RNG, configuration
//! - `board`: The 5x5 token board and the token bag
//! - `cards`: Cards, level piles, the face-up market, card records
//! - `player`: Holdings, derived scores, win conditions
//! - `turn`: Generic state machine
//! - `game`: Session, turn states and the `Game` controller
//! - `error`: Error types for every component

pub mod board;
pub mod cards;
pub mod core;
pub mod error;
pub mod game;
pub mod player;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, CardPosition, GameConfig, GameRng, MandatoryAction, OptionalAction, PlayerId,
    Token, TokenQuantity, TurnAction, WinThresholds,
};

pub use crate::board::{Coord, TokenBag, TokenBoard, TokenBoardField, REPLENISH_ORDER};

pub use crate::cards::{cards_from_json, Card, CardId, CardRecord, Deck, Level, Market};

pub use crate::player::{Player, Standing, WinCondition};

pub use crate::turn::{StateMachine, Transition};

pub use crate::game::{
    DecisionSource, EndReason, Game, GameOutcome, ScriptedDecisions, TurnState, TurnView,
};

pub use crate::error::{
    BoardError, CardSpecError, ConfigError, DeckError, GameError, PlayerError, StateError,
};
