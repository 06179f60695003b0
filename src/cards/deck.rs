//! The deck: every card of the game, split into per-level draw piles.
//!
//! Piles are built once: the whole card list is shuffled, then partitioned
//! by level in shuffled order. There is no separate per-level shuffle, so the
//! one permutation decides both orders.
//!
//! Cards only ever move out of the piles. At any time
//! `cards in piles + dealt + taken == total`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::card::{Card, Level};
use crate::core::GameRng;
use crate::error::DeckError;

/// Remaining card counts per level, for display.
pub type PileSizes = [usize; Level::COUNT];

/// Per-level draw piles. The top of each pile is the end of its vec.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    piles: [Vec<Card>; Level::COUNT],
    total: usize,
    dealt: usize,
    taken: usize,
}

impl Deck {
    /// Shuffle `cards` and partition them into level piles.
    #[must_use]
    pub fn new(mut cards: Vec<Card>, rng: &mut GameRng) -> Self {
        rng.shuffle(&mut cards);

        let total = cards.len();
        let mut piles: [Vec<Card>; Level::COUNT] = Default::default();
        for card in cards {
            piles[card.level().index()].push(card);
        }

        debug!(total, sizes = ?piles.each_ref().map(Vec::len), "deck built");
        Self {
            piles,
            total,
            dealt: 0,
            taken: 0,
        }
    }

    /// Deal `count` cards from the top of a pile, topmost first.
    ///
    /// Deals nothing unless the pile holds at least `count` cards.
    pub fn deal(&mut self, level: Level, count: usize) -> Result<Vec<Card>, DeckError> {
        let pile = &mut self.piles[level.index()];
        if pile.len() < count {
            return Err(DeckError::InsufficientCards {
                level,
                requested: count,
                remaining: pile.len(),
            });
        }

        let split = pile.len() - count;
        let mut dealt = pile.split_off(split);
        dealt.reverse();
        self.dealt += count;
        Ok(dealt)
    }

    /// Remove the card at `index` of a pile. Index 0 is the bottom card and
    /// the last index is the top.
    pub fn take(&mut self, level: Level, index: usize) -> Result<Card, DeckError> {
        let pile = &mut self.piles[level.index()];
        if index >= pile.len() {
            return Err(DeckError::InvalidIndex { level, index });
        }
        self.taken += 1;
        Ok(pile.remove(index))
    }

    /// Remove the top card of a pile.
    pub fn pop(&mut self, level: Level) -> Result<Card, DeckError> {
        let card = self.piles[level.index()]
            .pop()
            .ok_or(DeckError::EmptyPile(level))?;
        self.dealt += 1;
        Ok(card)
    }

    /// Look at the card at `index` of a pile without removing it.
    pub fn peek(&self, level: Level, index: usize) -> Result<&Card, DeckError> {
        self.piles[level.index()]
            .get(index)
            .ok_or(DeckError::InvalidIndex { level, index })
    }

    /// Cards still in a pile, bottom first.
    #[must_use]
    pub fn pile(&self, level: Level) -> &[Card] {
        &self.piles[level.index()]
    }

    #[must_use]
    pub fn pile_sizes(&self) -> PileSizes {
        self.piles.each_ref().map(Vec::len)
    }

    /// Cards left across all piles.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.piles.iter().map(Vec::len).sum()
    }

    /// Cards the deck was built with.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Cards removed from a pile top by `deal` or `pop`.
    #[must_use]
    pub fn dealt(&self) -> usize {
        self.dealt
    }

    /// Cards removed by index with `take`.
    #[must_use]
    pub fn taken(&self) -> usize {
        self.taken
    }

    /// Every card is in a pile or was dealt or taken.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.remaining() + self.dealt + self.taken == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn sample_cards() -> Vec<Card> {
        // 6 level-0, 4 level-1, 2 level-2 cards.
        (0..12u32)
            .map(|i| {
                let level = match i {
                    0..=5 => Level::ALL[0],
                    6..=9 => Level::ALL[1],
                    _ => Level::ALL[2],
                };
                Card::new(CardId::new(i), level, i % 3)
            })
            .collect()
    }

    #[test]
    fn test_partition_by_level() {
        let deck = Deck::new(sample_cards(), &mut GameRng::new(42));

        assert_eq!(deck.pile_sizes(), [6, 4, 2]);
        assert_eq!(deck.total(), 12);
        for level in Level::ALL {
            assert!(deck.pile(level).iter().all(|c| c.level() == level));
        }
        assert!(deck.is_balanced());
    }

    #[test]
    fn test_same_seed_same_piles() {
        let a = Deck::new(sample_cards(), &mut GameRng::new(5));
        let b = Deck::new(sample_cards(), &mut GameRng::new(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_deal_from_top() {
        let mut deck = Deck::new(sample_cards(), &mut GameRng::new(42));
        let level = Level::ALL[0];
        let top = deck.pile(level).last().unwrap().id();

        let dealt = deck.deal(level, 4).unwrap();

        assert_eq!(dealt.len(), 4);
        assert_eq!(dealt[0].id(), top);
        assert_eq!(deck.pile(level).len(), 2);
        assert_eq!(deck.dealt(), 4);
        assert!(deck.is_balanced());
    }

    #[test]
    fn test_deal_insufficient_leaves_pile() {
        let mut deck = Deck::new(sample_cards(), &mut GameRng::new(42));
        let level = Level::ALL[2];
        let before = deck.pile(level).to_vec();

        let err = deck.deal(level, 3).unwrap_err();

        assert_eq!(
            err,
            DeckError::InsufficientCards {
                level,
                requested: 3,
                remaining: 2
            }
        );
        assert_eq!(deck.pile(level), before.as_slice());
        assert_eq!(deck.dealt(), 0);
    }

    #[test]
    fn test_take_by_index() {
        let mut deck = Deck::new(sample_cards(), &mut GameRng::new(42));
        let level = Level::ALL[1];
        let expected = deck.peek(level, 1).unwrap().id();

        let card = deck.take(level, 1).unwrap();

        assert_eq!(card.id(), expected);
        assert_eq!(deck.pile(level).len(), 3);
        assert!(deck.pile(level).iter().all(|c| c.id() != expected));
        assert_eq!(deck.taken(), 1);
        assert!(deck.is_balanced());

        assert_eq!(
            deck.take(level, 3).unwrap_err(),
            DeckError::InvalidIndex { level, index: 3 }
        );
    }

    #[test]
    fn test_pop_until_empty() {
        let mut deck = Deck::new(sample_cards(), &mut GameRng::new(42));
        let level = Level::ALL[2];

        assert!(deck.pop(level).is_ok());
        assert!(deck.pop(level).is_ok());
        assert_eq!(deck.pop(level).unwrap_err(), DeckError::EmptyPile(level));
        assert_eq!(deck.dealt(), 2);
        assert!(deck.is_balanced());
    }

    #[test]
    fn test_empty_deck() {
        let mut deck = Deck::default();
        assert_eq!(deck.remaining(), 0);
        assert!(deck.deal(Level::ALL[0], 0).unwrap().is_empty());
        assert!(deck.pop(Level::ALL[0]).is_err());
        assert!(deck.is_balanced());
    }
}
