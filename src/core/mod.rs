//! Core value types: tokens, seats, actions, RNG, configuration.
//!
//! Everything here is plain data. Actions name board coordinates and card
//! levels, but nothing in this module reads or changes game state.

pub mod action;
pub mod config;
pub mod rng;
pub mod seat;
pub mod token;

pub use action::{ActionRecord, CardPosition, MandatoryAction, OptionalAction, TurnAction};
pub use config::{GameConfig, WinThresholds};
pub use rng::GameRng;
pub use seat::PlayerId;
pub use token::{Token, TokenQuantity};
