//! Token colors and token multisets.
//!
//! ## Token
//!
//! The closed set of resource colors. Gold is the wild token: it can stand in
//! for any color when paying for a card.
//!
//! ## TokenQuantity
//!
//! A multiset of tokens keyed by color. Used for card costs, card payouts,
//! player holdings and bag contents. Zero counts are never stored, so two
//! quantities holding the same tokens always compare equal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CardSpecError;

/// One resource color.
///
/// Ordering follows declaration order and is used wherever a deterministic
/// color order matters (tie-breaking, display).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    White,
    Red,
    Blue,
    Green,
    Black,
    Purple,
    Gold,
}

impl Token {
    /// Every token color, in declaration order.
    pub const ALL: [Token; 7] = [
        Token::White,
        Token::Red,
        Token::Blue,
        Token::Green,
        Token::Black,
        Token::Purple,
        Token::Gold,
    ];

    /// Lowercase color name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Token::White => "white",
            Token::Red => "red",
            Token::Blue => "blue",
            Token::Green => "green",
            Token::Black => "black",
            Token::Purple => "purple",
            Token::Gold => "gold",
        }
    }

    /// Single-character abbreviation used in compact deck notation.
    #[must_use]
    pub const fn abbreviation(self) -> char {
        match self {
            Token::White => 'W',
            Token::Red => 'R',
            Token::Blue => 'B',
            Token::Green => 'G',
            Token::Black => 'K',
            Token::Purple => 'P',
            Token::Gold => '*',
        }
    }

    /// Parse a single-character abbreviation.
    #[must_use]
    pub fn from_abbreviation(c: char) -> Option<Token> {
        Token::ALL.into_iter().find(|t| t.abbreviation() == c)
    }

    /// Hex color code for renderers.
    #[must_use]
    pub const fn color_code(self) -> &'static str {
        match self {
            Token::White => "#FFFFFF",
            Token::Red => "#FF0000",
            Token::Blue => "#0000FF",
            Token::Green => "#00FF00",
            Token::Black => "#000000",
            Token::Purple => "#800080",
            Token::Gold => "#FFFF00",
        }
    }

    /// Is this the wild token?
    #[must_use]
    pub const fn is_wild(self) -> bool {
        matches!(self, Token::Gold)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Token {
    type Err = CardSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Token::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CardSpecError::UnknownColor(s.to_string()))
    }
}

/// Multiset of tokens keyed by color.
///
/// ## Example
///
/// ```
/// use crown_duel::core::{Token, TokenQuantity};
///
/// let cost: TokenQuantity = "2W1P".parse().unwrap();
/// assert_eq!(cost.get(Token::White), 2);
/// assert_eq!(cost.get(Token::Purple), 1);
/// assert_eq!(cost.total(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Token, u32>", into = "BTreeMap<Token, u32>")]
pub struct TokenQuantity {
    counts: BTreeMap<Token, u32>,
}

impl From<BTreeMap<Token, u32>> for TokenQuantity {
    fn from(counts: BTreeMap<Token, u32>) -> Self {
        Self::from_pairs(counts)
    }
}

impl From<TokenQuantity> for BTreeMap<Token, u32> {
    fn from(quantity: TokenQuantity) -> Self {
        quantity.counts
    }
}

impl TokenQuantity {
    /// Create an empty quantity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (token, count) pairs. Repeated tokens accumulate.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Token, u32)>) -> Self {
        let mut quantity = Self::new();
        for (token, count) in pairs {
            quantity.add(token, count);
        }
        quantity
    }

    /// Count of one color.
    #[must_use]
    pub fn get(&self, token: Token) -> u32 {
        self.counts.get(&token).copied().unwrap_or(0)
    }

    /// Add `count` tokens of one color.
    pub fn add(&mut self, token: Token, count: u32) {
        if count > 0 {
            *self.counts.entry(token).or_insert(0) += count;
        }
    }

    /// Add every token of another quantity.
    pub fn add_all(&mut self, other: &TokenQuantity) {
        for (token, count) in other.iter() {
            self.add(token, count);
        }
    }

    /// Remove up to `count` tokens of one color, returning how many were removed.
    pub fn remove_up_to(&mut self, token: Token, count: u32) -> u32 {
        let held = self.get(token);
        let removed = held.min(count);
        if held == removed {
            self.counts.remove(&token);
        } else {
            self.counts.insert(token, held - removed);
        }
        removed
    }

    /// Does this quantity hold at least every token of `other`?
    #[must_use]
    pub fn contains(&self, other: &TokenQuantity) -> bool {
        other.iter().all(|(token, count)| self.get(token) >= count)
    }

    /// Total number of tokens across all colors.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over (token, count) pairs with non-zero count, in color order.
    pub fn iter(&self) -> impl Iterator<Item = (Token, u32)> + '_ {
        self.counts.iter().map(|(&token, &count)| (token, count))
    }

    /// Expand into individual tokens, in color order.
    #[must_use]
    pub fn to_tokens(&self) -> Vec<Token> {
        self.iter()
            .flat_map(|(token, count)| std::iter::repeat(token).take(count as usize))
            .collect()
    }
}

impl FromIterator<Token> for TokenQuantity {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::from_pairs(iter.into_iter().map(|token| (token, 1)))
    }
}

impl std::str::FromStr for TokenQuantity {
    type Err = CardSpecError;

    /// Parse compact notation such as `2W2G1P` (count then abbreviation).
    ///
    /// The empty string and `"None"` parse as an empty quantity.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("none") {
            return Ok(Self::new());
        }

        let mut quantity = Self::new();
        let mut digits = String::new();
        for c in s.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            let token = Token::from_abbreviation(c)
                .ok_or_else(|| CardSpecError::UnknownColor(c.to_string()))?;
            if digits.is_empty() {
                return Err(CardSpecError::MalformedQuantity(s.to_string()));
            }
            let count: u32 = digits
                .parse()
                .map_err(|_| CardSpecError::MalformedQuantity(s.to_string()))?;
            quantity.add(token, count);
            digits.clear();
        }

        if !digits.is_empty() {
            return Err(CardSpecError::MalformedQuantity(s.to_string()));
        }
        Ok(quantity)
    }
}

impl std::fmt::Display for TokenQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (token, count) in self.iter() {
            write!(f, "{}{}", count, token.abbreviation())?;
        }
        Ok(())
    }
}
