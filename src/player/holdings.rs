//! A player's tokens, privileges and acquired cards.
//!
//! Crowns and prestige are never stored. They are summed from the acquired
//! cards on every call, so they cannot drift from the collection.

use std::collections::BTreeMap;

use tracing::debug;

use super::standing::{Standing, WinCondition};
use crate::cards::Card;
use crate::core::{PlayerId, Token, TokenQuantity, TurnAction, WinThresholds};
use crate::error::{PlayerError, Resource};

/// One participant's holdings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    name: String,
    tokens: TokenQuantity,
    privileges: u32,
    /// Acquired cards keyed by card color. `None` holds cards without output.
    cards: BTreeMap<Option<Token>, Vec<Card>>,
    /// Actions applied during the current turn.
    turn_log: Vec<TurnAction>,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tokens: TokenQuantity::new(),
            privileges: 0,
            cards: BTreeMap::new(),
            turn_log: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Tokens ===

    #[must_use]
    pub fn tokens(&self) -> &TokenQuantity {
        &self.tokens
    }

    pub fn add_token(&mut self, token: Token, quantity: u32) {
        self.tokens.add(token, quantity);
    }

    pub fn add_tokens(&mut self, tokens: impl IntoIterator<Item = Token>) {
        for token in tokens {
            self.tokens.add(token, 1);
        }
    }

    /// Remove `quantity` tokens of one color.
    pub fn remove_token(&mut self, token: Token, quantity: u32) -> Result<(), PlayerError> {
        let available = self.tokens.get(token);
        if available < quantity {
            return Err(PlayerError::InsufficientResources {
                resource: Resource::Token(token),
                required: quantity,
                available,
            });
        }
        self.tokens.remove_up_to(token, quantity);
        Ok(())
    }

    /// Remove every token of `cost`, or nothing if any color falls short.
    pub fn spend(&mut self, cost: &TokenQuantity) -> Result<(), PlayerError> {
        for (token, required) in cost.iter() {
            let available = self.tokens.get(token);
            if available < required {
                return Err(PlayerError::InsufficientResources {
                    resource: Resource::Token(token),
                    required,
                    available,
                });
            }
        }
        for (token, count) in cost.iter() {
            self.tokens.remove_up_to(token, count);
        }
        Ok(())
    }

    // === Privileges ===

    #[must_use]
    pub fn privileges(&self) -> u32 {
        self.privileges
    }

    pub fn grant_privileges(&mut self, count: u32) {
        self.privileges += count;
    }

    /// Spend one privilege.
    pub fn use_privilege(&mut self) -> Result<(), PlayerError> {
        if self.privileges == 0 {
            return Err(PlayerError::InsufficientResources {
                resource: Resource::Privilege,
                required: 1,
                available: 0,
            });
        }
        self.privileges -= 1;
        Ok(())
    }

    // === Cards ===

    /// Add a card to the collection.
    pub fn acquire(&mut self, card: Card) {
        debug!(player = %self.name, card = %card.id(), "card acquired");
        self.cards.entry(card.color()).or_default().push(card);
    }

    /// Every acquired card, grouped by color.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values().flatten()
    }

    /// Acquired cards of one color (`None` for cards without output).
    #[must_use]
    pub fn cards_of(&self, color: Option<Token>) -> &[Card] {
        self.cards.get(&color).map_or(&[][..], Vec::as_slice)
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.values().map(Vec::len).sum()
    }

    /// Permanent tokens from acquired cards.
    #[must_use]
    pub fn bonuses(&self) -> TokenQuantity {
        let mut bonuses = TokenQuantity::new();
        for card in self.cards() {
            bonuses.add_all(card.output());
        }
        bonuses
    }

    /// Tokens this player would hand over to buy `card`.
    ///
    /// Bonuses reduce each color's requirement first, own tokens of that
    /// color pay next, and gold covers whatever is left.
    pub fn payment_for(&self, card: &Card) -> Result<TokenQuantity, PlayerError> {
        let bonuses = self.bonuses();
        let mut payment = TokenQuantity::new();
        let mut shortfall = 0;

        for (token, required) in card.requirements().iter() {
            let due = required.saturating_sub(bonuses.get(token));
            let paid = due.min(self.tokens.get(token));
            payment.add(token, paid);
            shortfall += due - paid;
        }

        let spare_gold = self.tokens.get(Token::Gold) - payment.get(Token::Gold);
        if shortfall > spare_gold {
            return Err(PlayerError::InsufficientResources {
                resource: Resource::Token(Token::Gold),
                required: shortfall,
                available: spare_gold,
            });
        }
        payment.add(Token::Gold, shortfall);
        Ok(payment)
    }

    /// Pay for `card` and add it to the collection. Returns the tokens spent.
    pub fn buy(&mut self, card: Card) -> Result<TokenQuantity, PlayerError> {
        let payment = self.payment_for(&card)?;
        self.spend(&payment)?;
        self.acquire(card);
        Ok(payment)
    }

    // === Derived scores ===

    #[must_use]
    pub fn calculate_crowns(&self) -> u32 {
        self.cards().map(Card::crowns).sum()
    }

    #[must_use]
    pub fn calculate_prestige(&self) -> u32 {
        self.cards().map(Card::points).sum()
    }

    /// Prestige per card color. Cards without output count toward no color.
    #[must_use]
    pub fn calculate_prestige_by_color(&self) -> BTreeMap<Token, u32> {
        self.cards
            .iter()
            .filter_map(|(color, cards)| {
                color.map(|token| (token, cards.iter().map(Card::points).sum::<u32>()))
            })
            .collect()
    }

    /// Best single-color prestige and its color, earliest color on ties.
    #[must_use]
    pub fn max_color_prestige(&self) -> Option<(Token, u32)> {
        let mut best: Option<(Token, u32)> = None;
        for (token, points) in self.calculate_prestige_by_color() {
            if best.map_or(true, |(_, top)| points > top) {
                best = Some((token, points));
            }
        }
        best
    }

    /// The first threshold this player has reached, checking crowns, then
    /// total prestige, then single-color prestige.
    #[must_use]
    pub fn win_condition(&self, thresholds: &WinThresholds) -> Option<WinCondition> {
        if self.calculate_crowns() >= thresholds.crowns {
            return Some(WinCondition::Crowns);
        }
        if self.calculate_prestige() >= thresholds.prestige {
            return Some(WinCondition::Prestige);
        }
        match self.max_color_prestige() {
            Some((token, points)) if points >= thresholds.color_prestige => {
                Some(WinCondition::ColorPrestige(token))
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn check_win_condition(&self, thresholds: &WinThresholds) -> bool {
        self.win_condition(thresholds).is_some()
    }

    // === Turn log ===

    pub fn record_action(&mut self, action: TurnAction) {
        self.turn_log.push(action);
    }

    #[must_use]
    pub fn turn_log(&self) -> &[TurnAction] {
        &self.turn_log
    }

    /// Clear the per-turn action log.
    pub fn end_turn(&mut self) {
        self.turn_log.clear();
    }

    /// Score summary for display and ranking.
    #[must_use]
    pub fn standing(&self, seat: PlayerId) -> Standing {
        Standing {
            player: seat,
            name: self.name.clone(),
            prestige: self.calculate_prestige(),
            crowns: self.calculate_crowns(),
            max_color_prestige: self.max_color_prestige().map_or(0, |(_, points)| points),
            cards: self.card_count(),
            tokens: self.tokens.total(),
            privileges: self.privileges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Level};

    fn card(id: u32, points: u32, crowns: u32, color: Option<Token>) -> Card {
        let mut card = Card::new(CardId::new(id), Level::ALL[0], points).with_crowns(crowns);
        if let Some(token) = color {
            card = card.with_output(TokenQuantity::from_pairs([(token, 1)]));
        }
        card
    }

    #[test]
    fn test_spend_is_all_or_nothing() {
        let mut player = Player::new("Ada");
        player.add_token(Token::Red, 2);
        player.add_token(Token::Blue, 1);

        let cost = TokenQuantity::from_pairs([(Token::Red, 1), (Token::Blue, 2)]);
        let err = player.spend(&cost).unwrap_err();

        assert_eq!(
            err,
            PlayerError::InsufficientResources {
                resource: Resource::Token(Token::Blue),
                required: 2,
                available: 1
            }
        );
        assert_eq!(player.tokens().get(Token::Red), 2);

        player.spend(&TokenQuantity::from_pairs([(Token::Red, 2)])).unwrap();
        assert_eq!(player.tokens().get(Token::Red), 0);
    }

    #[test]
    fn test_remove_token_below_zero() {
        let mut player = Player::new("Ada");
        player.add_token(Token::Green, 1);
        assert!(player.remove_token(Token::Green, 2).is_err());
        assert!(player.remove_token(Token::Green, 1).is_ok());
        assert!(player.tokens().is_empty());
    }

    #[test]
    fn test_privileges() {
        let mut player = Player::new("Ada");
        assert!(matches!(
            player.use_privilege(),
            Err(PlayerError::InsufficientResources { resource: Resource::Privilege, .. })
        ));
        player.grant_privileges(2);
        player.use_privilege().unwrap();
        assert_eq!(player.privileges(), 1);
    }

    #[test]
    fn test_payment_uses_bonuses_then_tokens_then_gold() {
        let mut player = Player::new("Ada");
        player.acquire(card(1, 0, 0, Some(Token::White)));
        player.add_token(Token::White, 1);
        player.add_token(Token::Red, 1);
        player.add_token(Token::Gold, 2);

        // 3 white - 1 bonus = 2 due: 1 white + 1 gold. 2 red: 1 red + 1 gold.
        let target = Card::new(CardId::new(2), Level::ALL[1], 3)
            .with_requirements("3W2R".parse().unwrap());
        let payment = player.payment_for(&target).unwrap();

        assert_eq!(
            payment,
            TokenQuantity::from_pairs([(Token::White, 1), (Token::Red, 1), (Token::Gold, 2)])
        );

        let spent = player.buy(target).unwrap();
        assert_eq!(spent, payment);
        assert!(player.tokens().is_empty());
        assert_eq!(player.card_count(), 2);
    }

    #[test]
    fn test_payment_shortfall() {
        let mut player = Player::new("Ada");
        player.add_token(Token::Gold, 1);
        let target = Card::new(CardId::new(2), Level::ALL[0], 0)
            .with_requirements("2K".parse().unwrap());

        let err = player.buy(target).unwrap_err();

        assert_eq!(
            err,
            PlayerError::InsufficientResources {
                resource: Resource::Token(Token::Gold),
                required: 2,
                available: 1
            }
        );
        assert_eq!(player.tokens().get(Token::Gold), 1);
        assert_eq!(player.card_count(), 0);
    }

    #[test]
    fn test_free_card() {
        let mut player = Player::new("Ada");
        let target = Card::new(CardId::new(5), Level::ALL[0], 1);
        assert!(player.buy(target).unwrap().is_empty());
        assert_eq!(player.calculate_prestige(), 1);
    }

    #[test]
    fn test_derived_scores() {
        let mut player = Player::new("Ada");
        player.acquire(card(1, 3, 1, Some(Token::Red)));
        player.acquire(card(2, 4, 0, Some(Token::Red)));
        player.acquire(card(3, 2, 2, Some(Token::Blue)));
        player.acquire(card(4, 5, 1, None));

        assert_eq!(player.calculate_crowns(), 4);
        assert_eq!(player.calculate_prestige(), 14);
        assert_eq!(
            player.calculate_prestige_by_color(),
            BTreeMap::from([(Token::Red, 7), (Token::Blue, 2)])
        );
        assert_eq!(player.max_color_prestige(), Some((Token::Red, 7)));
        assert_eq!(player.cards_of(Some(Token::Red)).len(), 2);
        assert_eq!(player.cards_of(None).len(), 1);
        assert_eq!(player.cards_of(Some(Token::Gold)).len(), 0);
    }

    #[test]
    fn test_win_by_crowns() {
        let thresholds = WinThresholds::default();
        let mut player = Player::new("Ada");
        player.acquire(card(1, 0, 9, None));
        assert!(!player.check_win_condition(&thresholds));

        player.acquire(card(2, 0, 1, None));
        assert_eq!(player.win_condition(&thresholds), Some(WinCondition::Crowns));
    }

    #[test]
    fn test_win_by_total_prestige_split_across_colors() {
        let thresholds = WinThresholds {
            color_prestige: 11,
            ..WinThresholds::default()
        };
        let mut player = Player::new("Ada");
        player.acquire(card(1, 10, 0, Some(Token::Red)));
        player.acquire(card(2, 10, 0, Some(Token::Blue)));

        assert_eq!(player.win_condition(&thresholds), Some(WinCondition::Prestige));
    }

    #[test]
    fn test_win_by_single_color() {
        let thresholds = WinThresholds::default();
        let mut player = Player::new("Ada");
        player.acquire(card(1, 6, 0, Some(Token::Green)));
        player.acquire(card(2, 4, 0, Some(Token::Green)));
        player.acquire(card(3, 9, 0, None));

        assert_eq!(
            player.win_condition(&thresholds),
            Some(WinCondition::ColorPrestige(Token::Green))
        );
    }

    #[test]
    fn test_no_win_just_below_thresholds() {
        let thresholds = WinThresholds::default();
        let mut player = Player::new("Ada");
        player.acquire(card(1, 9, 9, Some(Token::Black)));
        player.acquire(card(2, 9, 0, Some(Token::White)));
        player.acquire(card(3, 1, 0, None));

        assert_eq!(player.calculate_prestige(), 19);
        assert!(!player.check_win_condition(&thresholds));
    }

    #[test]
    fn test_turn_log_cleared_on_end_turn() {
        let mut player = Player::new("Ada");
        player.record_action(TurnAction::take_tokens(&[]));
        assert_eq!(player.turn_log().len(), 1);

        player.end_turn();
        assert!(player.turn_log().is_empty());
    }

    #[test]
    fn test_standing() {
        let mut player = Player::new("Ada");
        player.acquire(card(1, 3, 2, Some(Token::Red)));
        player.add_token(Token::Blue, 2);
        player.grant_privileges(1);

        let standing = player.standing(PlayerId::new(1));

        assert_eq!(standing.player, PlayerId::new(1));
        assert_eq!(standing.name, "Ada");
        assert_eq!(standing.prestige, 3);
        assert_eq!(standing.crowns, 2);
        assert_eq!(standing.max_color_prestige, 3);
        assert_eq!(standing.cards, 1);
        assert_eq!(standing.tokens, 2);
        assert_eq!(standing.privileges, 1);
    }
}
