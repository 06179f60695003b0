//! Game configuration.
//!
//! `GameConfig` carries every tunable the rules engine reads: table size,
//! seed, win thresholds, bag contents, market size and privilege rules.
//! Defaults describe the base two-player game.

use serde::{Deserialize, Serialize};

use super::seat::PlayerId;
use super::token::{Token, TokenQuantity};
use crate::cards::Level;
use crate::error::ConfigError;

/// Thresholds for the three independent win conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinThresholds {
    /// Crowns needed to win.
    pub crowns: u32,
    /// Total prestige needed to win.
    pub prestige: u32,
    /// Prestige from cards of a single color needed to win.
    pub color_prestige: u32,
}

impl Default for WinThresholds {
    fn default() -> Self {
        Self {
            crowns: 10,
            prestige: 20,
            color_prestige: 10,
        }
    }
}

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seated players (2..=4).
    pub player_count: usize,

    /// Seed for every shuffle and random choice in the session.
    pub seed: u64,

    pub thresholds: WinThresholds,

    /// Starting contents of the token bag.
    pub bag: TokenQuantity,

    /// Face-up cards per level, indexed by level.
    pub face_up: [usize; Level::COUNT],

    /// Privileges each player starts with.
    pub starting_privileges: u32,

    /// Replenishing the board hands the next player one privilege.
    pub replenish_grants_privilege: bool,

    /// Fixed first player. `None` draws one from the seeded RNG.
    pub first_player: Option<PlayerId>,

    /// End the game after this many completed turns. `None` for unlimited.
    pub max_turns: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            seed: 42,
            thresholds: WinThresholds::default(),
            bag: Self::standard_bag(),
            face_up: [5, 4, 3],
            starting_privileges: 0,
            replenish_grants_privilege: true,
            first_player: None,
            max_turns: None,
        }
    }
}

impl GameConfig {
    /// The base bag: four of each standard color, two purple, three gold.
    #[must_use]
    pub fn standard_bag() -> TokenQuantity {
        TokenQuantity::from_pairs(Token::ALL.into_iter().map(|token| {
            let count = match token {
                Token::Purple => 2,
                Token::Gold => 3,
                _ => 4,
            };
            (token, count)
        }))
    }

    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: WinThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn with_bag(mut self, bag: TokenQuantity) -> Self {
        self.bag = bag;
        self
    }

    #[must_use]
    pub fn with_face_up(mut self, face_up: [usize; Level::COUNT]) -> Self {
        self.face_up = face_up;
        self
    }

    #[must_use]
    pub fn with_starting_privileges(mut self, privileges: u32) -> Self {
        self.starting_privileges = privileges;
        self
    }

    #[must_use]
    pub fn with_replenish_privilege(mut self, enabled: bool) -> Self {
        self.replenish_grants_privilege = enabled;
        self
    }

    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = Some(player);
        self
    }

    #[must_use]
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = Some(turns);
        self
    }

    /// Face-up card count for one level.
    #[must_use]
    pub fn face_up_count(&self, level: Level) -> usize {
        self.face_up[level.index()]
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=4).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if let Some(first) = self.first_player {
            if !first.is_seated(self.player_count) {
                return Err(ConfigError::FirstPlayer {
                    first: first.0,
                    player_count: self.player_count,
                });
            }
        }
        if self.max_turns == Some(0) {
            return Err(ConfigError::TurnLimit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.player_count, 2);
        assert_eq!(config.thresholds.crowns, 10);
        assert_eq!(config.thresholds.prestige, 20);
        assert_eq!(config.thresholds.color_prestige, 10);
        assert_eq!(config.face_up, [5, 4, 3]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_standard_bag_fills_board() {
        let bag = GameConfig::standard_bag();
        assert_eq!(bag.total(), 25);
        assert_eq!(bag.get(Token::Red), 4);
        assert_eq!(bag.get(Token::Purple), 2);
        assert_eq!(bag.get(Token::Gold), 3);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_player_count(3)
            .with_seed(7)
            .with_first_player(PlayerId::new(2))
            .with_max_turns(40);

        assert_eq!(config.player_count, 3);
        assert_eq!(config.seed, 7);
        assert_eq!(config.first_player, Some(PlayerId::new(2)));
        assert_eq!(config.max_turns, Some(40));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert_eq!(
            GameConfig::default().with_player_count(1).validate(),
            Err(ConfigError::PlayerCount(1))
        );
        assert_eq!(
            GameConfig::default().with_player_count(5).validate(),
            Err(ConfigError::PlayerCount(5))
        );
        assert!(matches!(
            GameConfig::default().with_first_player(PlayerId::new(2)).validate(),
            Err(ConfigError::FirstPlayer { .. })
        ));
        assert_eq!(
            GameConfig::default().with_max_turns(0).validate(),
            Err(ConfigError::TurnLimit)
        );
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_seed(99);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
