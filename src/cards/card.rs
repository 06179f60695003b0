//! Development cards.
//!
//! A `Card` is immutable once built. It moves between a pile, the face-up
//! market and a player's collection, but it is never duplicated.

use serde::{Deserialize, Serialize};

use crate::core::{Token, TokenQuantity};
use crate::error::CardSpecError;

/// Unique identifier of one physical card within a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card level, 0 through 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    /// Number of levels.
    pub const COUNT: usize = 3;

    /// Every level, lowest first.
    pub const ALL: [Level; Level::COUNT] = [Level(0), Level(1), Level(2)];

    /// Create a level, or `None` if `level` is not 0, 1 or 2.
    #[must_use]
    pub const fn new(level: u8) -> Option<Self> {
        if (level as usize) < Self::COUNT {
            Some(Self(level))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Index into per-level arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for Level {
    type Error = CardSpecError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Level::new(level).ok_or(CardSpecError::InvalidLevel(level))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "level {}", self.0)
    }
}

/// A development card.
///
/// ## Example
///
/// ```
/// use crown_duel::cards::{Card, CardId, Level};
/// use crown_duel::core::{Token, TokenQuantity};
///
/// let card = Card::new(CardId::new(1), Level::ALL[0], 1)
///     .with_requirements("2W1R".parse().unwrap())
///     .with_output(TokenQuantity::from_pairs([(Token::Blue, 1)]))
///     .with_crowns(1);
///
/// assert_eq!(card.color(), Some(Token::Blue));
/// assert_eq!(card.requirements().total(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    level: Level,
    points: u32,
    feature: Option<String>,
    requirements: TokenQuantity,
    output: TokenQuantity,
    crowns: u32,
}

impl Card {
    /// Create a card with no cost, no output, no crowns and no feature.
    #[must_use]
    pub fn new(id: CardId, level: Level, points: u32) -> Self {
        Self {
            id,
            level,
            points,
            feature: None,
            requirements: TokenQuantity::new(),
            output: TokenQuantity::new(),
            crowns: 0,
        }
    }

    #[must_use]
    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.feature = Some(feature.into());
        self
    }

    #[must_use]
    pub fn with_requirements(mut self, requirements: TokenQuantity) -> Self {
        self.requirements = requirements;
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: TokenQuantity) -> Self {
        self.output = output;
        self
    }

    #[must_use]
    pub fn with_crowns(mut self, crowns: u32) -> Self {
        self.crowns = crowns;
        self
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Prestige points.
    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn feature(&self) -> Option<&str> {
        self.feature.as_deref()
    }

    /// Tokens needed to buy the card.
    #[must_use]
    pub fn requirements(&self) -> &TokenQuantity {
        &self.requirements
    }

    /// Permanent tokens the card provides once owned.
    #[must_use]
    pub fn output(&self) -> &TokenQuantity {
        &self.output
    }

    #[must_use]
    pub fn crowns(&self) -> u32 {
        self.crowns
    }

    /// The color this card counts toward: its most plentiful output token,
    /// ties going to the earlier color. `None` for cards without output.
    #[must_use]
    pub fn color(&self) -> Option<Token> {
        let mut best: Option<(Token, u32)> = None;
        for (token, count) in self.output.iter() {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((token, count));
            }
        }
        best.map(|(token, _)| token)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] points={} crowns={} feature={} cost={} output={}",
            self.id,
            self.level,
            self.points,
            self.crowns,
            self.feature.as_deref().unwrap_or("none"),
            self.requirements,
            self.output
        )
    }
}
