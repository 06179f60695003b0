//! Session state shared by the turn-state handlers.
//!
//! ## Key Types
//!
//! - `TurnState`: the four named states of a game
//! - `Table`: shared components (board, bag, deck, market)
//! - `TurnContext`: whose turn it is, the turn counter and the history
//! - `Session`: owns all of the above plus the players and the RNG
//!
//! Handlers take the whole `Session`, but each helper they call borrows only
//! the parts it changes.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::decision::{DecisionSource, TurnView};
use super::outcome::{EndReason, GameOutcome};
use crate::board::{TokenBag, TokenBoard};
use crate::cards::{Card, Deck, Market};
use crate::core::{ActionRecord, GameConfig, GameRng, PlayerId};
use crate::player::Player;

/// Named states of the turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    Setup,
    PlayerTurn,
    EndTurn,
    /// Terminal: its handler halts the machine.
    GameOver,
}

/// Shared components every player acts on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub board: TokenBoard,
    pub bag: TokenBag,
    pub deck: Deck,
    pub market: Market,
}

/// Turn bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnContext {
    pub active: PlayerId,
    pub first_player: PlayerId,
    /// 1-based number of the turn in progress.
    pub number: u32,
    /// Set once the game is decided.
    pub end: Option<EndReason>,
    /// Every applied turn, oldest first.
    pub history: Vector<ActionRecord>,
}

impl TurnContext {
    #[must_use]
    pub fn new(first_player: PlayerId) -> Self {
        Self {
            active: first_player,
            first_player,
            number: 1,
            end: None,
            history: Vector::new(),
        }
    }
}

/// Build a view from disjoint session fields, leaving the rest borrowable.
pub(crate) fn turn_view<'a>(
    table: &'a Table,
    players: &'a [Player],
    turn: &TurnContext,
    config: &'a GameConfig,
) -> TurnView<'a> {
    TurnView {
        active: turn.active,
        turn: turn.number,
        board: &table.board,
        bag: &table.bag,
        market: &table.market,
        pile_sizes: table.deck.pile_sizes(),
        players,
        thresholds: &config.thresholds,
    }
}

/// One game's mutable state, owned by the `Game` controller.
pub struct Session<D> {
    pub config: GameConfig,
    pub rng: GameRng,
    /// Card list waiting to be shuffled into the deck at setup.
    pub(crate) pending_cards: Vec<Card>,
    pub table: Table,
    /// Seated players, empty until setup runs.
    pub players: Vec<Player>,
    pub turn: TurnContext,
    pub decisions: D,
    pub outcome: Option<GameOutcome>,
}

impl<D: DecisionSource> Session<D> {
    #[must_use]
    pub fn new(config: GameConfig, cards: Vec<Card>, decisions: D) -> Self {
        let rng = GameRng::new(config.seed);
        let first = config.first_player.unwrap_or(PlayerId::new(0));
        Self {
            config,
            rng,
            pending_cards: cards,
            table: Table::default(),
            players: Vec::new(),
            turn: TurnContext::new(first),
            decisions,
            outcome: None,
        }
    }

    /// What the active player sees.
    #[must_use]
    pub fn view(&self) -> TurnView<'_> {
        turn_view(&self.table, &self.players, &self.turn, &self.config)
    }

    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.players.get(self.turn.active.index())
    }
}
