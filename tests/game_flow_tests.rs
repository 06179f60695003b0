//! Whole-game flow through the turn state machine.
//!
//! Set `RUST_LOG=crown_duel=debug` to see the engine's trace output.

use crown_duel::board::Coord;
use crown_duel::cards::{Card, CardId, Level};
use crown_duel::core::{GameConfig, PlayerId, Token, TokenQuantity, TurnAction};
use crown_duel::error::{GameError, StateError};
use crown_duel::game::{DecisionSource, EndReason, Game, ScriptedDecisions, TurnState, TurnView};
use crown_duel::player::WinCondition;
use crown_duel::turn::StateMachine;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn coord(row: u8, col: u8) -> Coord {
    Coord::new(row, col).unwrap()
}

/// Free level-0 cards worth `points` each, producing `color` when given.
fn free_cards(count: u32, points: u32, color: Option<Token>) -> Vec<Card> {
    (0..count)
        .map(|id| {
            let card = Card::new(CardId::new(id), Level::ALL[0], points);
            match color {
                Some(token) => card.with_output(TokenQuantity::from_pairs([(token, 1)])),
                None => card,
            }
        })
        .collect()
}

fn config() -> GameConfig {
    GameConfig::default().with_first_player(PlayerId::new(0))
}

#[test]
fn test_two_player_state_sequence() {
    init_tracing();
    let script = ScriptedDecisions::new([
        TurnAction::take_tokens(&[coord(3, 3)]),
        TurnAction::take_tokens(&[coord(4, 3)]),
    ]);
    let mut game = Game::new(config(), Vec::new(), script).unwrap();

    let mut states = vec![game.state()];
    for _ in 0..4 {
        states.push(game.step().unwrap());
    }

    assert_eq!(
        states,
        vec![
            Some(TurnState::Setup),
            Some(TurnState::PlayerTurn),
            Some(TurnState::EndTurn),
            Some(TurnState::PlayerTurn),
            Some(TurnState::EndTurn),
        ]
    );
    let seats: Vec<PlayerId> = game.history().iter().map(|r| r.player).collect();
    assert_eq!(seats, vec![PlayerId::new(0), PlayerId::new(1)]);
}

#[test]
fn test_unregistered_state_machine() {
    let mut machine: StateMachine<TurnState, ()> = StateMachine::new();
    assert_eq!(
        machine.run(&mut ()).unwrap_err(),
        GameError::State(StateError::UnknownState("<none>".to_string()))
    );
    assert!(machine.set_state(TurnState::Setup).is_err());
}

#[test]
fn test_win_by_total_prestige() {
    init_tracing();
    let script = ScriptedDecisions::new([
        TurnAction::buy_face_up(Level::ALL[0], 0),
        TurnAction::buy_face_up(Level::ALL[0], 0),
        TurnAction::buy_face_up(Level::ALL[0], 0),
    ])
    .with_names(["Ada", "Grace"]);
    let mut game = Game::new(config(), free_cards(6, 10, None), script).unwrap();

    game.play().unwrap();

    let outcome = game.outcome().unwrap();
    assert_eq!(outcome.reason, EndReason::Victory(WinCondition::Prestige));
    assert_eq!(outcome.winner, Some(PlayerId::new(0)));
    assert_eq!(outcome.turns, 3);
    assert_eq!(outcome.ranking[0].name, "Ada");
    assert_eq!(outcome.ranking[0].prestige, 20);
    assert_eq!(outcome.ranking[1].name, "Grace");
    assert_eq!(outcome.ranking[1].prestige, 10);
    assert_eq!(game.state(), None);
}

#[test]
fn test_win_by_single_color() {
    let script = ScriptedDecisions::new([
        TurnAction::buy_face_up(Level::ALL[0], 0),
        TurnAction::take_tokens(&[coord(3, 3)]),
        TurnAction::buy_face_up(Level::ALL[0], 0),
    ]);
    let mut game = Game::new(config(), free_cards(6, 5, Some(Token::Red)), script).unwrap();

    game.play().unwrap();

    let outcome = game.outcome().unwrap();
    assert_eq!(
        outcome.reason,
        EndReason::Victory(WinCondition::ColorPrestige(Token::Red))
    );
    assert_eq!(outcome.winner, Some(PlayerId::new(0)));
    let winner = game.player(PlayerId::new(0)).unwrap();
    assert_eq!(winner.calculate_prestige(), 10);
    assert_eq!(winner.cards_of(Some(Token::Red)).len(), 2);
}

#[test]
fn test_retry_after_rejection() {
    let script = ScriptedDecisions::new([
        TurnAction::take_tokens(&[coord(1, 1), coord(3, 3)]),
        TurnAction::take_tokens(&[coord(1, 1), coord(2, 2), coord(3, 3)]),
    ]);
    let mut game = Game::new(config().with_max_turns(1), Vec::new(), script).unwrap();

    let err = game.play().unwrap_err();
    assert!(matches!(err, GameError::Board(_)));
    assert_eq!(game.state(), Some(TurnState::PlayerTurn));
    assert_eq!(game.board().occupied_count(), 25);

    game.play().unwrap();

    assert_eq!(game.outcome().unwrap().reason, EndReason::TurnLimit);
    assert_eq!(game.player(PlayerId::new(0)).unwrap().tokens().total(), 3);
    assert_eq!(game.decisions().rejections().len(), 1);
}

#[test]
fn test_four_players_rotate_from_first() {
    let config = GameConfig::default()
        .with_player_count(4)
        .with_first_player(PlayerId::new(2))
        .with_max_turns(5);
    let script = ScriptedDecisions::new(
        [(3, 3), (4, 3), (4, 2), (3, 2), (2, 2)]
            .into_iter()
            .map(|(r, c)| TurnAction::take_tokens(&[coord(r, c)])),
    );
    let mut game = Game::new(config, Vec::new(), script).unwrap();

    game.play().unwrap();

    let seats: Vec<u8> = game.history().iter().map(|r| r.player.0).collect();
    assert_eq!(seats, vec![2, 3, 0, 1, 2]);
    let turns: Vec<u32> = game.history().iter().map(|r| r.turn).collect();
    assert_eq!(turns, vec![1, 2, 3, 4, 5]);
    assert_eq!(game.player(PlayerId::new(2)).unwrap().tokens().total(), 2);
}

/// Takes the first occupied field on the board each turn, buying the first
/// affordable face-up card instead whenever there is one.
struct Greedy {
    turns_seen: u32,
}

impl DecisionSource for Greedy {
    fn choose_turn(&mut self, view: &TurnView<'_>) -> Option<TurnAction> {
        self.turns_seen += 1;
        let player = view.active_player()?;
        for level in Level::ALL {
            for (index, card) in view.market.row(level).iter().enumerate() {
                if player.payment_for(card).is_ok() {
                    return Some(TurnAction::buy_face_up(level, index));
                }
            }
        }
        let field = view.board.fields().find(|field| !field.is_empty())?;
        Some(TurnAction::take_tokens(&[field.coord()]))
    }
}

fn priced_cards() -> Vec<Card> {
    (0..30u32)
        .map(|id| {
            let level = Level::ALL[(id % 3) as usize];
            let color = Token::ALL[(id % 5) as usize];
            Card::new(CardId::new(id), level, 1 + id % 4)
                .with_requirements(TokenQuantity::from_pairs([(color, 1 + id % 3)]))
                .with_output(TokenQuantity::from_pairs([(color, 1)]))
                .with_crowns(id % 2)
        })
        .collect()
}

fn greedy_game(seed: u64) -> Game<Greedy> {
    let config = GameConfig::default().with_seed(seed).with_max_turns(60);
    let mut game = Game::new(config, priced_cards(), Greedy { turns_seen: 0 }).unwrap();
    game.play().unwrap();
    game
}

#[test]
fn test_greedy_game_finishes() {
    init_tracing();
    let game = greedy_game(5);
    let outcome = game.outcome().unwrap();

    assert!(outcome.turns <= 60);
    assert_eq!(outcome.ranking.len(), 2);
    assert!(outcome.ranking[0].prestige >= outcome.ranking[1].prestige);
    assert!(game.deck().is_balanced());
    let forfeited = matches!(outcome.reason, EndReason::Forfeit(_));
    assert_eq!(
        game.decisions().turns_seen as usize,
        game.history().len() + usize::from(forfeited)
    );

    // Tokens are conserved between board, bag and players.
    let held: u32 = game.players().iter().map(|p| p.tokens().total()).sum();
    let on_board = game.board().occupied_count() as u32;
    assert_eq!(held + on_board + game.bag().len() as u32, 25);
}

#[test]
fn test_same_seed_same_game() {
    let a = greedy_game(17);
    let b = greedy_game(17);

    assert_eq!(a.history(), b.history());
    assert_eq!(a.outcome(), b.outcome());
    assert_eq!(a.board(), b.board());
}
