//! Turn actions as closed variant types.
//!
//! A turn is one optional action followed by exactly one mandatory action.
//! The decision source builds these values; the engine never parses text.
//!
//! ```
//! use crown_duel::board::Coord;
//! use crown_duel::core::{MandatoryAction, OptionalAction, TurnAction};
//!
//! let line = [Coord::new(3, 3)?, Coord::new(3, 4)?, Coord::new(3, 5)?];
//! let turn = TurnAction::take_tokens(&line).with_optional(OptionalAction::Replenish);
//!
//! assert_eq!(turn.optional, OptionalAction::Replenish);
//! assert!(matches!(turn.mandatory, MandatoryAction::TakeTokens(ref c) if c.len() == 3));
//! # Ok::<(), crown_duel::error::BoardError>(())
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::seat::PlayerId;
use crate::board::Coord;
use crate::cards::Level;

/// Action a player may take before the mandatory one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionalAction {
    #[default]
    None,
    /// Spend a privilege to take the token on one field.
    UsePrivilege(Coord),
    /// Refill the empty board fields from the bag.
    Replenish,
}

/// Where a purchased card comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardPosition {
    /// Index into the face-up cards of the level.
    FaceUp(usize),
    /// Index into the level's draw pile.
    Pile(usize),
}

/// The one action every turn must contain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MandatoryAction {
    BuyCard { level: Level, position: CardPosition },
    /// Up to three fields, in selection order.
    /// SmallVec keeps the common case off the heap.
    TakeTokens(SmallVec<[Coord; 3]>),
}

/// A complete turn decision.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnAction {
    pub optional: OptionalAction,
    pub mandatory: MandatoryAction,
}

impl TurnAction {
    /// Take tokens from the given fields, with no optional action.
    #[must_use]
    pub fn take_tokens(coords: &[Coord]) -> Self {
        Self {
            optional: OptionalAction::None,
            mandatory: MandatoryAction::TakeTokens(SmallVec::from_slice(coords)),
        }
    }

    /// Buy the face-up card at `index` of `level`, with no optional action.
    #[must_use]
    pub fn buy_face_up(level: Level, index: usize) -> Self {
        Self {
            optional: OptionalAction::None,
            mandatory: MandatoryAction::BuyCard {
                level,
                position: CardPosition::FaceUp(index),
            },
        }
    }

    /// Buy the card at `index` of the `level` pile, with no optional action.
    #[must_use]
    pub fn buy_from_pile(level: Level, index: usize) -> Self {
        Self {
            optional: OptionalAction::None,
            mandatory: MandatoryAction::BuyCard {
                level,
                position: CardPosition::Pile(index),
            },
        }
    }

    /// Set the optional action.
    #[must_use]
    pub fn with_optional(mut self, optional: OptionalAction) -> Self {
        self.optional = optional;
        self
    }
}

/// A turn that was applied, kept in the session history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    /// Turn number when the action was applied.
    pub turn: u32,
    pub action: TurnAction,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, turn: u32, action: TurnAction) -> Self {
        Self { player, turn, action }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(row: u8, col: u8) -> Coord {
        Coord::new(row, col).unwrap()
    }

    #[test]
    fn test_take_tokens_keeps_order() {
        let action = TurnAction::take_tokens(&[coord(2, 2), coord(1, 1)]);
        assert_eq!(action.optional, OptionalAction::None);
        match action.mandatory {
            MandatoryAction::TakeTokens(coords) => {
                assert_eq!(coords.as_slice(), &[coord(2, 2), coord(1, 1)]);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_buy_constructors() {
        let level = Level::new(1).unwrap();
        assert_eq!(
            TurnAction::buy_face_up(level, 2).mandatory,
            MandatoryAction::BuyCard { level, position: CardPosition::FaceUp(2) }
        );
        assert_eq!(
            TurnAction::buy_from_pile(level, 0).mandatory,
            MandatoryAction::BuyCard { level, position: CardPosition::Pile(0) }
        );
    }

    #[test]
    fn test_action_record_serialization() {
        let action = TurnAction::take_tokens(&[coord(3, 3)])
            .with_optional(OptionalAction::UsePrivilege(coord(1, 5)));
        let record = ActionRecord::new(PlayerId::new(1), 4, action);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
