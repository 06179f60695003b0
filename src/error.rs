//! Error types for every component of the engine.
//!
//! Every error here describes a rejected request, never a corrupted engine:
//! the operation that returned it left all state untouched.

use thiserror::Error;

use crate::board::Coord;
use crate::cards::Level;
use crate::core::{PlayerId, Token};

/// Rejected token-board access or selection.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Wrong number of fields, a repeated field, or a field that may not be
    /// taken with the chosen action.
    #[error("invalid selection: {reason}")]
    InvalidSelection { reason: String },

    #[error("field {0} holds no token")]
    EmptyField(Coord),

    #[error("fields {from} and {to} are not adjacent")]
    NotAdjacent { from: Coord, to: Coord },

    #[error("fields {0}, {1} and {2} are not on one straight line")]
    NotAligned(Coord, Coord, Coord),

    #[error("coordinates ({row}, {col}) are outside the 5x5 board")]
    OutOfBounds { row: u8, col: u8 },
}

impl BoardError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        BoardError::InvalidSelection { reason: reason.into() }
    }
}

/// Rejected pile or market access.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("cannot deal {requested} cards from {level}: only {remaining} remain")]
    InsufficientCards {
        level: Level,
        requested: usize,
        remaining: usize,
    },

    #[error("no card at index {index} of {level}")]
    InvalidIndex { level: Level, index: usize },

    #[error("{0} pile is empty")]
    EmptyPile(Level),
}

/// A spendable resource a player can run short of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Token(Token),
    Privilege,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Token(token) => write!(f, "{} tokens", token),
            Resource::Privilege => f.write_str("privileges"),
        }
    }
}

/// Rejected change to a player's holdings.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("not enough {resource}: need {required}, have {available}")]
    InsufficientResources {
        resource: Resource,
        required: u32,
        available: u32,
    },

    #[error("{0} is not seated at this table")]
    NotSeated(PlayerId),
}

/// State-machine wiring error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("no handler registered for state {0}")]
    UnknownState(String),
}

/// Invalid game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("player count must be between 2 and 4, got {0}")]
    PlayerCount(usize),

    #[error("first player {first} is not seated in a {player_count}-player game")]
    FirstPlayer { first: u8, player_count: usize },

    #[error("turn limit must be at least 1")]
    TurnLimit,
}

/// Malformed card record.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CardSpecError {
    #[error("unknown token color {0:?}")]
    UnknownColor(String),

    #[error("malformed token quantity {0:?}")]
    MalformedQuantity(String),

    #[error("card level {0} is outside 0..=2")]
    InvalidLevel(u8),

    #[error("invalid card list: {0}")]
    Json(String),
}

/// Any error the engine can report.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Player(#[from] PlayerError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    CardSpec(#[from] CardSpecError),
}
