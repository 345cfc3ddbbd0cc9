//! Whole-session flow tests.
//!
//! These tests drive sessions from the lobby to the end of the game and
//! check the phase protocol, the storyteller rotation, and the end-of-pile
//! rule.

use dixit_engine::core::{ActionKind, CardId, ErrorKind, GameError, GameRng, Phase, PlayerId, SessionConfig};
use dixit_engine::session::Session;

fn started(players: usize, config: SessionConfig, seed: u64) -> Session {
    let mut session = Session::with_rng(config, GameRng::new(seed));
    for i in 0..players {
        session.add_player(PlayerId::new(format!("player-{}", i))).unwrap();
    }
    session.start_game().unwrap();
    session
}

/// Play one turn where every guesser finds the storyteller's card.
/// Returns whether the game ended.
fn play_turn(session: &mut Session) -> bool {
    let storyteller = session.storyteller().unwrap().clone();
    let story_card = session.get_hand(&storyteller).unwrap()[0];
    session.tell(&storyteller, story_card, "a door in the sky").unwrap();

    for player in session.pending_players() {
        let card = session.get_hand(&player).unwrap()[0];
        session.play(&player, card).unwrap();
    }
    for player in session.pending_players() {
        session.vote(&player, story_card).unwrap();
    }
    session.end_turn().unwrap()
}

fn total_cards(session: &Session) -> usize {
    session.cards_in_hands() + session.pile_len() + session.cards_on_tables()
}

/// Test a full four-player game: 84 cards give 16 turns.
#[test]
fn test_four_player_game_to_completion() {
    let mut session = started(4, SessionConfig::default(), 42);
    assert_eq!(total_cards(&session), 84);

    let mut turns = 0;
    while !play_turn(&mut session) {
        turns += 1;
        assert_eq!(total_cards(&session), 84);
        assert!(turns < 100, "game should end");
    }
    turns += 1;

    assert_eq!(turns, 16);
    assert_eq!(session.phase(), Phase::EndGame);
    assert_eq!(session.history().len(), 16);
    assert_eq!(session.pile_len(), 0);
    assert_eq!(total_cards(&session), 84);
    assert!(session.current_turn().is_none());
    assert!(session.pending_players().is_empty());
}

/// Test that five and six player games end when the pile runs short.
#[test]
fn test_game_length_by_player_count() {
    for (players, expected_turns) in [(5, 11), (6, 9)] {
        let mut session = started(players, SessionConfig::default(), 7);
        let mut turns = 1;
        while !play_turn(&mut session) {
            turns += 1;
        }
        assert_eq!(turns, expected_turns, "{} players", players);
        assert_eq!(total_cards(&session), 84);
    }
}

/// Test that the storyteller cycles through the shuffled roster.
#[test]
fn test_storyteller_rotation() {
    let mut session = started(5, SessionConfig::default(), 3);
    let roster = session.roster().to_vec();

    for turn in 0..10 {
        assert_eq!(session.storyteller(), Some(&roster[turn % roster.len()]));
        assert!(!play_turn(&mut session));
    }
    // The roster order never changes after start.
    assert_eq!(session.roster(), roster.as_slice());
}

/// Test that end_turn with one card too few ends the game without dealing.
#[test]
fn test_end_turn_with_short_pile_ends_game() {
    // 4 players x 6 cards + 3 spare: after the deal, the pile holds roster - 1.
    let config = SessionConfig::new().with_deck_size(27);
    let mut session = started(4, config, 11);
    assert_eq!(session.pile_len(), 3);

    assert!(play_turn(&mut session));
    assert_eq!(session.phase(), Phase::EndGame);
    assert_eq!(session.pile_len(), 3);
    for player in session.roster() {
        assert_eq!(session.get_hand(player).unwrap().len(), 5);
    }
    assert_eq!(total_cards(&session), 27);
}

/// Test that the hand refills by exactly one per completed turn.
#[test]
fn test_hands_refill_after_turn() {
    let mut session = started(4, SessionConfig::default(), 5);
    let pile_before = session.pile_len();

    assert!(!play_turn(&mut session));
    for player in session.roster() {
        assert_eq!(session.get_hand(player).unwrap().len(), 6);
    }
    assert_eq!(session.pile_len(), pile_before - 4);
}

/// Test the table visibility rules across phases.
#[test]
fn test_table_visibility() {
    let mut session = started(4, SessionConfig::default(), 9);
    assert!(session.get_table().is_empty());

    let storyteller = session.storyteller().unwrap().clone();
    let card = session.get_hand(&storyteller).unwrap()[0];
    session.tell(&storyteller, card, "echo").unwrap();
    assert!(session.get_table().is_empty());

    for player in session.pending_players() {
        let c = session.get_hand(&player).unwrap()[0];
        session.play(&player, c).unwrap();
    }
    let table = session.get_table();
    assert_eq!(table.len(), 4);
    assert!(table.contains(&card));

    for player in session.pending_players() {
        session.vote(&player, card).unwrap();
    }
    // Same order once scored.
    assert_eq!(session.get_table(), table);
}

/// Test that the final table stays readable after the game ends.
#[test]
fn test_table_readable_at_end_game() {
    let config = SessionConfig::new().with_deck_size(24);
    let mut session = started(4, config, 2);
    assert!(play_turn(&mut session));

    let last = session.get_last_turn().unwrap();
    assert_eq!(session.get_table(), last.table_cards());
}

/// Test that nothing but queries is accepted after the game ends.
#[test]
fn test_end_game_is_terminal() {
    let config = SessionConfig::new().with_deck_size(24);
    let mut session = started(4, config, 2);
    assert!(play_turn(&mut session));

    let player = session.roster()[0].clone();
    let errors = [
        session.start_game().unwrap_err(),
        session.tell(&player, CardId(1), "again").unwrap_err(),
        session.play(&player, CardId(1)).unwrap_err(),
        session.vote(&player, CardId(1)).unwrap_err(),
        session.end_turn().unwrap_err(),
        session.add_player(PlayerId::new("late")).unwrap_err(),
    ];
    for err in &errors {
        assert_eq!(err.kind(), ErrorKind::Phase);
    }

    let status = session.get_status(&player);
    assert_eq!(status.phase(), Phase::EndGame);
    assert!(!status.action_needed);
    assert_eq!(session.get_points().len(), 4);
    assert_eq!(session.stats().turns_played, 1);
}

/// Test that action_needed tracks exactly who owes an action.
#[test]
fn test_status_tracks_pending_actions() {
    let mut session = started(4, SessionConfig::default(), 21);
    let storyteller = session.storyteller().unwrap().clone();
    let guessers: Vec<PlayerId> = session
        .roster()
        .iter()
        .filter(|p| **p != storyteller)
        .cloned()
        .collect();

    assert!(session.get_status(&storyteller).action_needed);
    for g in &guessers {
        assert!(!session.get_status(g).action_needed);
    }

    let card = session.get_hand(&storyteller).unwrap()[0];
    session.tell(&storyteller, card, "a paper boat").unwrap();
    assert!(!session.get_status(&storyteller).action_needed);
    for g in &guessers {
        let status = session.get_status(g);
        assert_eq!(status.phase(), Phase::Play);
        assert!(status.action_needed);
        assert!(status.message.contains("a paper boat"));
    }

    let first = &guessers[0];
    let c = session.get_hand(first).unwrap()[0];
    session.play(first, c).unwrap();
    assert!(!session.get_status(first).action_needed);
    assert_eq!(session.pending_players().len(), 2);
}

/// Test that rejected actions leave the session untouched.
#[test]
fn test_rejections_do_not_mutate() {
    let mut session = started(4, SessionConfig::default(), 33);
    let storyteller = session.storyteller().unwrap().clone();
    let hand_before = session.get_hand(&storyteller).unwrap().to_vec();
    let pile_before = session.pile_len();

    let guesser = session.roster()[1].clone();
    let guesser_card = session.get_hand(&guesser).unwrap()[0];

    assert!(session.tell(&storyteller, guesser_card, "valid clue").is_err());
    assert!(session.tell(&storyteller, hand_before[0], "no").is_err());
    assert!(session.play(&guesser, guesser_card).is_err());
    assert!(session.vote(&guesser, guesser_card).is_err());

    assert_eq!(session.phase(), Phase::Tell);
    assert_eq!(session.get_hand(&storyteller).unwrap(), hand_before.as_slice());
    assert_eq!(session.get_hand(&guesser).unwrap().len(), 6);
    assert_eq!(session.pile_len(), pile_before);
    assert!(session.description().is_none());
}

/// Test the phase error carries the attempted action and current phase.
#[test]
fn test_phase_error_details() {
    let mut session = started(4, SessionConfig::default(), 1);
    let player = session.roster()[1].clone();
    let card = session.get_hand(&player).unwrap()[0];

    assert_eq!(
        session.play(&player, card),
        Err(GameError::ActionImpossibleNow {
            action: ActionKind::Play,
            phase: Phase::Tell,
        })
    );
}

/// Test debug mode allows small tables.
#[test]
fn test_debug_mode_two_players() {
    let config = SessionConfig::new().debug().with_player_bounds(2, 6);
    let mut session = started(2, config, 8);

    let storyteller = session.storyteller().unwrap().clone();
    let guesser = session.roster()[1].clone();
    let story_card = session.get_hand(&storyteller).unwrap()[0];
    session.tell(&storyteller, story_card, "tiny table").unwrap();

    let c = session.get_hand(&guesser).unwrap()[0];
    assert_eq!(session.play(&guesser, c), Ok(true));
    assert_eq!(session.vote(&guesser, story_card), Ok(true));

    // The only guesser found it: everybody found it.
    let points = session.get_points();
    assert_eq!(points[&storyteller], 0);
    assert_eq!(points[&guesser], 2);
}

/// Test a pinned seed reproduces the same game in debug mode.
#[test]
fn test_seeded_sessions_are_reproducible() {
    let make = || {
        let mut session = Session::new(SessionConfig::new().debug().with_seed(99));
        for id in ["a", "b", "c", "d"] {
            session.add_player(PlayerId::new(id)).unwrap();
        }
        session.start_game().unwrap();
        session
    };

    let one = make();
    let two = make();
    assert_eq!(one.roster(), two.roster());
    for player in one.roster() {
        assert_eq!(one.get_hand(player), two.get_hand(player));
    }
}
