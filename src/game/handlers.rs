//! Turn-state handlers and the rules for applying one turn.

use tracing::{debug, info, instrument, warn};

use super::decision::DecisionSource;
use super::outcome::{EndReason, GameOutcome};
use super::session::{turn_view, Session, Table, TurnContext, TurnState};
use crate::board::{Coord, TokenBag};
use crate::cards::{Card, Deck, Level};
use crate::core::{
    ActionRecord, CardPosition, GameConfig, GameRng, MandatoryAction, OptionalAction, PlayerId,
    Token, TurnAction,
};
use crate::error::{BoardError, GameError, PlayerError};
use crate::player::Player;
use crate::turn::Transition;

type Step = Result<Transition<TurnState>, GameError>;

// === State handlers ===

/// Seat the players, build the table and pick who starts.
#[instrument(skip_all, fields(players = session.config.player_count, seed = session.config.seed))]
pub(crate) fn setup<D: DecisionSource>(session: &mut Session<D>) -> Step {
    let count = session.config.player_count;

    session.players = PlayerId::seats(count)
        .map(|seat| {
            let mut player = Player::new(session.decisions.player_name(seat));
            player.grant_privileges(session.config.starting_privileges);
            player
        })
        .collect();

    let cards = std::mem::take(&mut session.pending_cards);
    session.table = build_table(&session.config, cards, &mut session.rng)?;

    let first = match session.config.first_player {
        Some(player) => player,
        None => session.rng.for_context("first_player").pick_seat(count),
    };
    session.turn = TurnContext::new(first);

    info!(
        first = %first,
        board = session.table.board.occupied_count(),
        bag = session.table.bag.len(),
        market = session.table.market.len(),
        "game set up"
    );
    Ok(Transition::Next(TurnState::PlayerTurn))
}

/// Ask the active player for a turn, apply it atomically and check for a win.
#[instrument(skip_all, fields(turn = session.turn.number, player = %session.turn.active))]
pub(crate) fn player_turn<D: DecisionSource>(session: &mut Session<D>) -> Step {
    let active = session.turn.active;

    let view = turn_view(&session.table, &session.players, &session.turn, &session.config);
    let Some(action) = session.decisions.choose_turn(&view) else {
        info!("no action chosen, player forfeits");
        session.turn.end = Some(EndReason::Forfeit(active));
        return Ok(Transition::Next(TurnState::GameOver));
    };

    let snapshot = (
        session.table.clone(),
        session.players.clone(),
        session.rng.clone(),
    );
    if let Err(err) = apply_turn(
        &mut session.table,
        &mut session.players,
        &mut session.rng,
        &session.config,
        active,
        &action,
    ) {
        (session.table, session.players, session.rng) = snapshot;
        warn!(error = %err, ?action, "action rejected, turn rolled back");
        session.decisions.rejected(active, &action, &err);
        return Err(err);
    }

    session
        .turn
        .history
        .push_back(ActionRecord::new(active, session.turn.number, action));

    let condition = session
        .players
        .get(active.index())
        .and_then(|player| player.win_condition(&session.config.thresholds));
    if let Some(condition) = condition {
        info!(%condition, "win condition reached");
        session.turn.end = Some(EndReason::Victory(condition));
        return Ok(Transition::Next(TurnState::GameOver));
    }
    Ok(Transition::Next(TurnState::EndTurn))
}

/// Close the turn and pass play to the next seat.
#[instrument(skip_all, fields(turn = session.turn.number, player = %session.turn.active))]
pub(crate) fn end_turn<D: DecisionSource>(session: &mut Session<D>) -> Step {
    if let Some(player) = session.players.get_mut(session.turn.active.index()) {
        player.end_turn();
    }

    if session
        .config
        .max_turns
        .is_some_and(|limit| session.turn.number >= limit)
    {
        info!("turn limit reached");
        session.turn.end = Some(EndReason::TurnLimit);
        return Ok(Transition::Next(TurnState::GameOver));
    }

    session.turn.active = session.turn.active.next(session.config.player_count);
    session.turn.number += 1;
    debug!(next = %session.turn.active, "turn passed");
    Ok(Transition::Next(TurnState::PlayerTurn))
}

/// Rank the players and record the outcome.
#[instrument(skip_all)]
pub(crate) fn game_over<D: DecisionSource>(session: &mut Session<D>) -> Step {
    let standings = session
        .players
        .iter()
        .zip(PlayerId::seats(session.players.len()))
        .map(|(player, seat)| player.standing(seat))
        .collect();
    // Only entered after another handler set the reason.
    let reason = session.turn.end.unwrap_or(EndReason::TurnLimit);

    let outcome = GameOutcome::new(standings, session.turn.active, reason, session.turn.number);
    match outcome.winner {
        Some(winner) => info!(winner = %winner, ?reason, turns = outcome.turns, "game over"),
        None => info!(?reason, turns = outcome.turns, "game over without a winner"),
    }
    session.outcome = Some(outcome);
    Ok(Transition::Halt)
}

// === Applying a turn ===

/// Shuffle the deck, fill the bag, replenish the board and deal the market.
fn build_table(
    config: &GameConfig,
    cards: Vec<Card>,
    rng: &mut GameRng,
) -> Result<Table, GameError> {
    let mut table = Table {
        deck: Deck::new(cards, rng),
        bag: TokenBag::with_contents(&config.bag),
        ..Table::default()
    };
    table.board.replenish(&mut table.bag, rng);
    for level in Level::ALL {
        table
            .market
            .fill(&mut table.deck, level, config.face_up_count(level))?;
    }
    Ok(table)
}

/// Apply the optional then the mandatory part of `action` for `active`.
///
/// May leave `table` and `players` partly changed on error; the caller
/// restores its snapshot.
pub(crate) fn apply_turn(
    table: &mut Table,
    players: &mut [Player],
    rng: &mut GameRng,
    config: &GameConfig,
    active: PlayerId,
    action: &TurnAction,
) -> Result<(), GameError> {
    match action.optional {
        OptionalAction::None => {}
        OptionalAction::UsePrivilege(coord) => {
            use_privilege(table, player_mut(players, active)?, coord)?;
        }
        OptionalAction::Replenish => {
            let placed = table.board.replenish(&mut table.bag, rng);
            debug!(placed, "board replenished by player");
            if config.replenish_grants_privilege {
                let next = active.next(players.len());
                player_mut(players, next)?.grant_privileges(1);
                debug!(player = %next, "privilege granted for replenish");
            }
        }
    }

    let player = player_mut(players, active)?;
    match &action.mandatory {
        MandatoryAction::TakeTokens(coords) => {
            let tokens = table.board.take_tokens(coords)?;
            player.add_tokens(tokens);
        }
        MandatoryAction::BuyCard { level, position } => {
            buy_card(table, player, *level, *position)?;
        }
    }

    player.record_action(action.clone());
    Ok(())
}

fn player_mut(players: &mut [Player], seat: PlayerId) -> Result<&mut Player, PlayerError> {
    players.get_mut(seat.index()).ok_or(PlayerError::NotSeated(seat))
}

/// Spend a privilege on the single non-gold token at `coord`.
fn use_privilege(table: &mut Table, player: &mut Player, coord: Coord) -> Result<(), GameError> {
    match table.board.token_at(coord)? {
        None => return Err(BoardError::EmptyField(coord).into()),
        Some(Token::Gold) => {
            return Err(BoardError::invalid("a privilege cannot take a gold token").into());
        }
        Some(_) => {}
    }
    player.use_privilege()?;
    let tokens = table.board.take_tokens(&[coord])?;
    player.add_tokens(tokens);
    Ok(())
}

/// Pay for a card and move it to the player. Spent tokens go back in the bag.
fn buy_card(
    table: &mut Table,
    player: &mut Player,
    level: Level,
    position: CardPosition,
) -> Result<(), GameError> {
    let card = match position {
        CardPosition::FaceUp(index) => {
            player.payment_for(table.market.get(level, index)?)?;
            table.market.take(&mut table.deck, level, index)?
        }
        CardPosition::Pile(index) => {
            player.payment_for(table.deck.peek(level, index)?)?;
            table.deck.take(level, index)?
        }
    };
    let spent = player.buy(card)?;
    table.bag.put_back_all(&spent);
    debug!(%spent, "card bought");
    Ok(())
}
