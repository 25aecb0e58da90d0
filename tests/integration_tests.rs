//! Integration tests for the engine driven through the facade

use std::fs;
use std::path::PathBuf;

use blockfall::core::{
    ActiveSnapshot, GameState, HighScoreStore, MemoryStore, MoveOutcome, ScriptedRng, SimpleRng,
};
use blockfall::store::FileHighScoreStore;
use blockfall::types::{GameAction, ShapeKind, BOARD_WIDTH, GRAVITY_MS, TICK_MS};

fn o_pieces<S: HighScoreStore>(store: S) -> GameState<ScriptedRng, S> {
    GameState::new(ScriptedRng::new(vec![ShapeKind::O.index(), 0]), store)
}

/// Slide the active piece to column `x`, then drop it until it freezes.
fn drop_at<S: HighScoreStore>(game: &mut GameState<ScriptedRng, S>, x: i8) {
    while game.active().x > x {
        assert_eq!(game.move_piece(-1, 0), MoveOutcome::Moved);
    }
    while game.active().x < x {
        assert_eq!(game.move_piece(1, 0), MoveOutcome::Moved);
    }
    while game.move_piece(0, 1) != MoveOutcome::Froze {}
}

/// Five O pieces side by side fill the bottom two rows.
fn clear_two_rows<S: HighScoreStore>(game: &mut GameState<ScriptedRng, S>) {
    for x in (0..BOARD_WIDTH as i8).step_by(2) {
        drop_at(game, x);
    }
}

#[test]
fn test_two_line_clear_scores_twenty() {
    let mut game = o_pieces(MemoryStore::new());
    clear_two_rows(&mut game);

    assert_eq!(game.score(), 20);
    assert_eq!(game.high_score(), 20);
    assert!(game.board().cells().iter().all(|c| c.is_none()));
    assert!(!game.game_over());
    assert_eq!(game.store().saves(), &[20]);
}

#[test]
fn test_center_stack_ends_game_without_scoring() {
    let mut game = o_pieces(MemoryStore::new());

    let mut freezes = 0;
    while !game.game_over() {
        if game.move_piece(0, 1) == MoveOutcome::Froze {
            freezes += 1;
        }
        assert!(freezes <= 10, "game should be over by now");
    }

    assert_eq!(freezes, 10);
    assert_eq!(game.score(), 0);
    assert!(game.snapshot().active.is_none());

    // Input and gravity are inert once the game is over
    let before = game.snapshot();
    assert!(!game.apply_action(GameAction::MoveLeft));
    assert!(!game.apply_action(GameAction::Rotate));
    assert!(!game.tick(GRAVITY_MS * 4));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_same_seed_replays_same_game() {
    let actions = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::SoftDrop,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::Rotate,
        GameAction::SoftDrop,
    ];

    let mut a = GameState::with_seed(2024);
    let mut b = GameState::with_seed(2024);

    for step in 0..2_000 {
        let action = actions[step % actions.len()];
        assert_eq!(a.apply_action(action), b.apply_action(action));
        assert_eq!(a.tick(TICK_MS), b.tick(TICK_MS));
        assert_eq!(a.snapshot(), b.snapshot(), "diverged at step {}", step);
        if a.game_over() {
            break;
        }
    }
}

#[test]
fn test_gravity_moves_piece_after_interval() {
    let mut game = GameState::new(SimpleRng::new(7), MemoryStore::new());
    let y0 = game.active().y;

    // Exactly the interval does not fire
    let mut elapsed = 0;
    while elapsed + TICK_MS <= GRAVITY_MS {
        assert!(!game.tick(TICK_MS));
        elapsed += TICK_MS;
    }
    assert!(!game.tick(GRAVITY_MS - elapsed));
    assert_eq!(game.active().y, y0);

    // One more millisecond does
    assert!(game.tick(1));
    assert_eq!(game.active().y, y0 + 1);
}

#[test]
fn test_active_cells_match_snapshot() {
    let mut game = GameState::with_seed(31);
    game.apply_action(GameAction::Rotate);
    game.apply_action(GameAction::SoftDrop);

    let piece = *game.active();
    let snap = game.snapshot();
    let active: ActiveSnapshot = snap.active.expect("piece is falling");

    let from_piece: Vec<_> = piece.cells().collect();
    let from_snapshot: Vec<_> = active.cells().collect();
    assert_eq!(from_piece.len(), 4);
    assert_eq!(from_piece, from_snapshot);
}

#[test]
fn test_high_score_persists_across_games() {
    let path: PathBuf = std::env::temp_dir().join(format!(
        "blockfall-integration-{}-high-score.txt",
        std::process::id()
    ));
    let _ = fs::remove_file(&path);

    let mut first = o_pieces(FileHighScoreStore::new(&path));
    assert_eq!(first.high_score(), 0);
    clear_two_rows(&mut first);
    assert_eq!(fs::read_to_string(&path).unwrap(), "20");

    // A lower score in the next game leaves the file alone
    let second = o_pieces(FileHighScoreStore::new(&path));
    assert_eq!(second.high_score(), 20);
    assert_eq!(second.score(), 0);

    let _ = fs::remove_file(&path);
}

#[test]
fn test_failing_store_keeps_high_score_in_memory() {
    let mut game = o_pieces(MemoryStore::failing());
    clear_two_rows(&mut game);
    assert_eq!(game.high_score(), 20);
    assert_eq!(game.store().value(), None);
}
