//! Cards, level piles and the face-up market.
//!
//! ## Key Types
//!
//! - `Card`: immutable development card (cost, output, points, crowns)
//! - `Level`: card level 0..=2
//! - `Deck`: every card, split into shuffled per-level piles
//! - `Market`: the face-up cards players can buy
//! - `CardRecord`: deck-file shape of a card
//!
//! A card is always in exactly one place: a pile, the market, or one
//! player's collection. Moving it means moving the value.

pub mod card;
pub mod deck;
pub mod market;
pub mod record;

pub use card::{Card, CardId, Level};
pub use deck::{Deck, PileSizes};
pub use market::Market;
pub use record::{cards_from_json, cards_from_records, CardRecord};
