//! The boundary where players decide.
//!
//! The engine never reads input itself. On every turn it hands a read-only
//! `TurnView` to a `DecisionSource` and applies whatever `TurnAction` comes
//! back. Returning `None` forfeits the game for the active player.

use std::collections::VecDeque;

use crate::board::{TokenBag, TokenBoard};
use crate::cards::{Market, PileSizes};
use crate::core::{PlayerId, TurnAction, WinThresholds};
use crate::error::GameError;
use crate::player::{Player, Standing};

/// Everything a player may look at when choosing a turn.
#[derive(Clone, Copy, Debug)]
pub struct TurnView<'a> {
    pub active: PlayerId,
    pub turn: u32,
    pub board: &'a TokenBoard,
    pub bag: &'a TokenBag,
    pub market: &'a Market,
    pub pile_sizes: PileSizes,
    pub players: &'a [Player],
    pub thresholds: &'a WinThresholds,
}

impl<'a> TurnView<'a> {
    /// Holdings of the player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> Option<&'a Player> {
        self.players.get(self.active.index())
    }

    /// Score summaries in seat order.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        self.players
            .iter()
            .zip(PlayerId::seats(self.players.len()))
            .map(|(player, seat)| player.standing(seat))
            .collect()
    }
}

/// Supplies player names and turn decisions.
pub trait DecisionSource {
    /// Display name for a seat, asked once during setup.
    fn player_name(&mut self, seat: PlayerId) -> String {
        seat.to_string()
    }

    /// The action the active player takes. `None` forfeits.
    fn choose_turn(&mut self, view: &TurnView<'_>) -> Option<TurnAction>;

    /// Called when the engine rejected an action and rolled the turn back.
    /// The same player is asked again on the next step.
    fn rejected(&mut self, _player: PlayerId, _action: &TurnAction, _error: &GameError) {}
}

/// Replays a fixed queue of actions, one per turn, whoever is active.
///
/// Runs out by forfeiting, so a script that ends early ends the game.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDecisions {
    names: Vec<String>,
    actions: VecDeque<TurnAction>,
    rejections: Vec<(PlayerId, GameError)>,
}

impl ScriptedDecisions {
    #[must_use]
    pub fn new(actions: impl IntoIterator<Item = TurnAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Names by seat. Seats without a name fall back to "Player N".
    #[must_use]
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn push(&mut self, action: TurnAction) {
        self.actions.push_back(action);
    }

    /// Actions not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.actions.len()
    }

    /// Every rejection reported so far, oldest first.
    #[must_use]
    pub fn rejections(&self) -> &[(PlayerId, GameError)] {
        &self.rejections
    }
}

impl DecisionSource for ScriptedDecisions {
    fn player_name(&mut self, seat: PlayerId) -> String {
        self.names
            .get(seat.index())
            .cloned()
            .unwrap_or_else(|| seat.to_string())
    }

    fn choose_turn(&mut self, _view: &TurnView<'_>) -> Option<TurnAction> {
        self.actions.pop_front()
    }

    fn rejected(&mut self, player: PlayerId, _action: &TurnAction, error: &GameError) {
        self.rejections.push((player, error.clone()));
    }
}
