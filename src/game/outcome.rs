//! How a finished game ended.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::player::{Standing, WinCondition};

/// Why the game stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The active player reached a win threshold.
    Victory(WinCondition),
    /// The decision source had no action for this player.
    Forfeit(PlayerId),
    /// The configured turn limit was reached.
    TurnLimit,
}

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Standings by descending prestige, ties in seat order.
    pub ranking: Vec<Standing>,
    /// `None` when the game ended without a single best player.
    pub winner: Option<PlayerId>,
    pub reason: EndReason,
    /// Turns played, including the last one.
    pub turns: u32,
}

impl GameOutcome {
    /// Build the outcome from unsorted standings.
    ///
    /// A victory goes to `active`. A forfeit goes to the best-ranked other
    /// player. At the turn limit the top-ranked player wins unless tied on
    /// prestige with the next one.
    #[must_use]
    pub fn new(mut standings: Vec<Standing>, active: PlayerId, reason: EndReason, turns: u32) -> Self {
        standings.sort_by(|a, b| b.prestige.cmp(&a.prestige).then(a.player.cmp(&b.player)));

        let winner = match reason {
            EndReason::Victory(_) => Some(active),
            EndReason::Forfeit(loser) => standings
                .iter()
                .map(|standing| standing.player)
                .find(|&player| player != loser),
            EndReason::TurnLimit => match standings.as_slice() {
                [first, second, ..] if first.prestige == second.prestige => None,
                [first, ..] => Some(first.player),
                [] => None,
            },
        };

        Self {
            ranking: standings,
            winner,
            reason,
            turns,
        }
    }

    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == Some(player)
    }

    /// Standing of one seat.
    #[must_use]
    pub fn standing(&self, player: PlayerId) -> Option<&Standing> {
        self.ranking.iter().find(|standing| standing.player == player)
    }
}
