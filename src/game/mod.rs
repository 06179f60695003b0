//! Game sessions: setup, the turn cycle and the final outcome.
//!
//! ## Key Types
//!
//! - `Game`: drives a `Session` through `TurnState`s on a `StateMachine`
//! - `DecisionSource`: where turn actions come from
//! - `TurnView`: read-only table snapshot handed to the decision source
//! - `GameOutcome`: final ranking, winner and reason
//!
//! ## Turn cycle
//!
//! `Setup` seats the players, shuffles the deck, replenishes the board and
//! deals the market. `PlayerTurn` applies one optional and one mandatory
//! action as a unit: if any part is rejected the whole turn is rolled back
//! and the error returned. `EndTurn` clears the player's turn log and passes
//! play on. `GameOver` ranks the players and halts.

pub mod decision;
pub mod engine;
mod handlers;
pub mod outcome;
pub mod session;

pub use decision::{DecisionSource, ScriptedDecisions, TurnView};
pub use engine::Game;
pub use outcome::{EndReason, GameOutcome};
pub use session::{Session, Table, TurnContext, TurnState};
