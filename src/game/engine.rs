//! The game controller: a session plus the state machine that drives it.

use im::Vector;

use super::decision::DecisionSource;
use super::handlers;
use super::outcome::GameOutcome;
use super::session::{Session, TurnState};
use crate::board::{TokenBag, TokenBoard};
use crate::cards::{Card, Deck, Market};
use crate::core::{ActionRecord, GameConfig, PlayerId};
use crate::error::GameError;
use crate::player::{Player, Standing};
use crate::turn::StateMachine;

/// A single game from setup to outcome.
///
/// ```
/// use crown_duel::board::Coord;
/// use crown_duel::core::{GameConfig, PlayerId, TurnAction};
/// use crown_duel::game::{Game, ScriptedDecisions, TurnState};
///
/// let config = GameConfig::default().with_first_player(PlayerId::new(0));
/// let script = ScriptedDecisions::new([TurnAction::take_tokens(&[Coord::new(3, 3)?])]);
/// let mut game = Game::new(config, Vec::new(), script)?;
///
/// assert_eq!(game.step()?, Some(TurnState::PlayerTurn));
/// assert_eq!(game.step()?, Some(TurnState::EndTurn));
/// assert_eq!(game.player(PlayerId::new(0)).map(|p| p.tokens().total()), Some(1));
///
/// // The script is exhausted, so the next player forfeits.
/// game.play()?;
/// assert_eq!(game.outcome().and_then(|o| o.winner), Some(PlayerId::new(0)));
/// # Ok::<(), crown_duel::GameError>(())
/// ```
pub struct Game<D> {
    machine: StateMachine<TurnState, Session<D>>,
    session: Session<D>,
}

impl<D: DecisionSource> Game<D> {
    /// Validate the configuration and prepare a game positioned at `Setup`.
    ///
    /// Nothing is dealt until the first `step`.
    pub fn new(config: GameConfig, cards: Vec<Card>, decisions: D) -> Result<Self, GameError> {
        config.validate()?;

        let mut machine = StateMachine::new();
        machine.add_state(TurnState::Setup, handlers::setup::<D>);
        machine.add_state(TurnState::PlayerTurn, handlers::player_turn::<D>);
        machine.add_state(TurnState::EndTurn, handlers::end_turn::<D>);
        machine.add_state(TurnState::GameOver, handlers::game_over::<D>);
        machine.set_state(TurnState::Setup)?;

        Ok(Self {
            machine,
            session: Session::new(config, cards, decisions),
        })
    }

    /// Run the current state once. Returns the state that is now current,
    /// `None` once the game is over.
    ///
    /// A rejected action is returned as an error with the game unchanged
    /// and still at `PlayerTurn`; stepping again asks the same player.
    pub fn step(&mut self) -> Result<Option<TurnState>, GameError> {
        self.machine.run(&mut self.session)
    }

    /// Step until the game is over or an action is rejected.
    pub fn play(&mut self) -> Result<(), GameError> {
        self.machine.run_to_completion(&mut self.session)
    }

    #[must_use]
    pub fn state(&self) -> Option<TurnState> {
        self.machine.current()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.session.outcome.is_some()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.session.outcome.as_ref()
    }

    // === Snapshots ===

    #[must_use]
    pub fn session(&self) -> &Session<D> {
        &self.session
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.session.config
    }

    #[must_use]
    pub fn board(&self) -> &TokenBoard {
        &self.session.table.board
    }

    #[must_use]
    pub fn bag(&self) -> &TokenBag {
        &self.session.table.bag
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.session.table.deck
    }

    #[must_use]
    pub fn market(&self) -> &Market {
        &self.session.table.market
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.session.players
    }

    #[must_use]
    pub fn player(&self, seat: PlayerId) -> Option<&Player> {
        self.session.players.get(seat.index())
    }

    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.session.turn.active
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.session.turn.number
    }

    /// Applied turns, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.session.turn.history
    }

    /// Current standings in seat order.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        self.session.view().standings()
    }

    #[must_use]
    pub fn decisions(&self) -> &D {
        &self.session.decisions
    }

    pub fn decisions_mut(&mut self) -> &mut D {
        &mut self.session.decisions
    }
}
