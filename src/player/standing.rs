//! Win conditions and per-player score summaries.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Token};

/// Which threshold a player crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinCondition {
    Crowns,
    Prestige,
    /// Prestige from cards of this one color.
    ColorPrestige(Token),
}

impl std::fmt::Display for WinCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WinCondition::Crowns => f.write_str("crowns"),
            WinCondition::Prestige => f.write_str("total prestige"),
            WinCondition::ColorPrestige(token) => write!(f, "{} prestige", token),
        }
    }
}

/// Read-only score summary of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub name: String,
    pub prestige: u32,
    pub crowns: u32,
    /// Best single-color prestige, 0 when no colored card is owned.
    pub max_color_prestige: u32,
    pub cards: usize,
    pub tokens: u32,
    pub privileges: u32,
}
