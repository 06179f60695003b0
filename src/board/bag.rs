//! The bag of tokens not yet on the board.
//!
//! Tokens leave the bag only when the board is replenished and come back only
//! when a player spends them. Nothing is created or destroyed here.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, Token, TokenQuantity};

/// Remaining unplaced tokens. The draw end is the end of the vec.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBag {
    tokens: Vec<Token>,
}

impl TokenBag {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bag holding exactly `contents`.
    #[must_use]
    pub fn with_contents(contents: &TokenQuantity) -> Self {
        Self {
            tokens: contents.to_tokens(),
        }
    }

    /// Randomly reorder the remaining tokens.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.tokens);
    }

    /// Draw one token, or `None` if the bag is empty.
    pub fn draw(&mut self) -> Option<Token> {
        self.tokens.pop()
    }

    /// Return one token to the bag.
    pub fn put_back(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Return every token of `spent` to the bag.
    pub fn put_back_all(&mut self, spent: &TokenQuantity) {
        self.tokens.extend(spent.to_tokens());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Remaining tokens grouped by color.
    #[must_use]
    pub fn contents(&self) -> TokenQuantity {
        self.tokens.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    #[test]
    fn test_standard_bag() {
        let bag = TokenBag::with_contents(&GameConfig::standard_bag());
        assert_eq!(bag.len(), 25);
        assert_eq!(bag.contents(), GameConfig::standard_bag());
    }

    #[test]
    fn test_shuffle_preserves_contents() {
        let mut bag = TokenBag::with_contents(&GameConfig::standard_bag());
        let before = bag.contents();

        bag.shuffle(&mut GameRng::new(7));

        assert_eq!(bag.contents(), before);
    }

    #[test]
    fn test_draw_until_empty() {
        let mut bag = TokenBag::with_contents(&TokenQuantity::from_pairs([(Token::Red, 2)]));
        assert_eq!(bag.draw(), Some(Token::Red));
        assert_eq!(bag.draw(), Some(Token::Red));
        assert_eq!(bag.draw(), None);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_put_back() {
        let mut bag = TokenBag::new();
        bag.put_back(Token::Gold);
        bag.put_back_all(&TokenQuantity::from_pairs([(Token::Blue, 2)]));

        assert_eq!(bag.len(), 3);
        assert_eq!(bag.contents().get(Token::Blue), 2);
        assert_eq!(bag.contents().get(Token::Gold), 1);
    }
}
