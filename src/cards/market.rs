//! Face-up cards available for purchase.

use serde::{Deserialize, Serialize};

use super::card::{Card, Level};
use super::deck::Deck;
use crate::error::DeckError;

/// The active cards, one row per level.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    rows: [Vec<Card>; Level::COUNT],
}

impl Market {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deal up to `count` cards of `level` from the deck onto the market.
    ///
    /// Deals fewer when the pile runs short. Returns how many were dealt.
    pub fn fill(&mut self, deck: &mut Deck, level: Level, count: usize) -> Result<usize, DeckError> {
        let available = count.min(deck.pile(level).len());
        let cards = deck.deal(level, available)?;
        self.rows[level.index()].extend(cards);
        Ok(available)
    }

    /// Face-up cards of one level, in display order.
    #[must_use]
    pub fn row(&self, level: Level) -> &[Card] {
        &self.rows[level.index()]
    }

    pub fn get(&self, level: Level, index: usize) -> Result<&Card, DeckError> {
        self.rows[level.index()]
            .get(index)
            .ok_or(DeckError::InvalidIndex { level, index })
    }

    /// Remove a face-up card and refill its slot from the top of the pile.
    ///
    /// When the pile is empty the slot closes and later cards shift left.
    pub fn take(&mut self, deck: &mut Deck, level: Level, index: usize) -> Result<Card, DeckError> {
        let row = &mut self.rows[level.index()];
        if index >= row.len() {
            return Err(DeckError::InvalidIndex { level, index });
        }

        let card = match deck.pop(level) {
            Ok(replacement) => std::mem::replace(&mut row[index], replacement),
            Err(_) => row.remove(index),
        };
        Ok(card)
    }

    /// Total face-up cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }
}
