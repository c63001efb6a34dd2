//! Integration tests for the game loop: engine, match loop and input together

use crossterm::event::{KeyCode, KeyEvent};

use teratis::core::{Effect, GameConfig, GameState, MemoryRecorder};
use teratis::engine::{LoopControl, MatchLoop};
use teratis::input::{map_key_event, SoftDropLatch};
use teratis::types::{Color, GameAction, GameStatus, TICK_MS};

fn new_game(seed: u32) -> GameState {
    let mut state = GameState::new(GameConfig::default(), seed).unwrap();
    state.tick(TICK_MS);
    state
}

/// Fill the bottom row except where the current piece will land, then hard drop.
fn complete_bottom_row(state: &mut GameState) -> u32 {
    let piece = *state.current().unwrap();
    let mut dy = 0;
    while state.grid().is_valid_move(&piece, 0, dy + 1) {
        dy += 1;
    }
    let landed = piece.moved(0, dy);
    let bottom = state.grid().height() as i16 - 1;
    for x in 0..state.grid().width() as i16 {
        if !landed.cells().any(|c| c == (x, bottom)) {
            state.grid_mut().set(x, bottom, Some(Color::Purple));
        }
    }
    let before = state.score();
    state.apply_action(GameAction::HardDrop);
    state.score() - before
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(GameConfig::default(), 12345).unwrap();
    assert_eq!(state.status(), GameStatus::Playing);
    assert!(state.current().is_none());

    state.tick(TICK_MS);
    assert!(state.current().is_some());
    assert!(state.next_piece().is_some());

    state.apply_action(GameAction::TogglePause);
    assert_eq!(state.status(), GameStatus::Paused);
    state.apply_action(GameAction::TogglePause);
    assert_eq!(state.status(), GameStatus::Playing);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = new_game(777);
    let mut b = new_game(777);
    for _ in 0..20 {
        assert_eq!(a.current(), b.current());
        assert_eq!(a.next_piece(), b.next_piece());
        a.apply_action(GameAction::HardDrop);
        b.apply_action(GameAction::HardDrop);
        a.tick(TICK_MS);
        b.tick(TICK_MS);
    }
    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.status(), b.status());
}

#[test]
fn test_hard_drop_until_top_out() {
    let mut state = new_game(42);
    let mut placements = 0;
    while state.status() == GameStatus::Playing && placements < 500 {
        state.apply_action(GameAction::HardDrop);
        state.tick(TICK_MS);
        placements += 1;
    }
    assert_eq!(state.status(), GameStatus::GameOver);
    assert!(state.current().is_none());
    assert!(state.pending_outcome().is_some());
}

#[test]
fn test_consecutive_clears_build_combo() {
    let mut state = new_game(9);
    assert_eq!(complete_bottom_row(&mut state), 0);
    assert_eq!(state.combo(), 1);
    state.tick(TICK_MS);

    assert_eq!(complete_bottom_row(&mut state), 100);
    assert_eq!(state.combo(), 2);
    state.tick(TICK_MS);

    assert_eq!(complete_bottom_row(&mut state), 200);
    assert_eq!(state.combo(), 3);
    assert_eq!(state.score(), 300);
}

#[test]
fn test_combo_resets_after_dry_placement() {
    let mut state = new_game(9);
    complete_bottom_row(&mut state);
    state.tick(TICK_MS);
    complete_bottom_row(&mut state);
    assert_eq!(state.combo(), 2);
    state.tick(TICK_MS);

    state.apply_action(GameAction::HardDrop);
    assert_eq!(state.combo(), 0);
}

#[test]
fn test_score_never_decreases() {
    let mut state = new_game(2024);
    let mut last = 0;
    for i in 0..200 {
        if i % 3 == 0 {
            complete_bottom_row(&mut state);
        } else {
            state.apply_action(GameAction::HardDrop);
        }
        state.tick(TICK_MS);
        assert!(state.score() >= last);
        last = state.score();
        if state.status() != GameStatus::Playing {
            break;
        }
    }
}

#[test]
fn test_effects_drain_once() {
    let mut state = new_game(3);
    complete_bottom_row(&mut state);
    let effects: Vec<Effect> = state.drain_effects().collect();
    assert!(effects.iter().any(|e| matches!(e, Effect::Landed { .. })));
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::LineCleared { cells } if cells.len() == 10)));
    assert_eq!(state.drain_effects().count(), 0);
}

#[test]
fn test_timeout_then_restart_via_match_loop() {
    let cfg = GameConfig {
        time_limit_secs: 2,
        ..GameConfig::default()
    };
    let state = GameState::new(cfg, 11).unwrap();
    let mut game = MatchLoop::new(state, MemoryRecorder::default());

    let mut frames = 0;
    while game.status() == GameStatus::Playing {
        game.tick(TICK_MS);
        frames += 1;
    }
    assert_eq!(game.status(), GameStatus::GameOver);
    assert_eq!(frames, (2000 + TICK_MS - 1) / TICK_MS);
    assert_eq!(game.recorder().records.len(), 1);

    assert_eq!(game.handle_action(GameAction::Restart), LoopControl::Continue);
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.state().elapsed_ms(), 0);
    assert_eq!(game.state().score(), 0);
}

#[test]
fn test_key_events_drive_the_engine() {
    let state = GameState::new(GameConfig::default(), 5).unwrap();
    let mut game = MatchLoop::new(state, MemoryRecorder::default());
    let mut latch = SoftDropLatch::new();
    game.tick(TICK_MS);

    let mut press = |game: &mut MatchLoop<MemoryRecorder>, code: KeyCode| {
        map_key_event(KeyEvent::from(code))
            .and_then(|a| latch.observe(a))
            .map(|a| game.handle_action(a))
    };

    press(&mut game, KeyCode::Down);
    assert!(game.state().is_soft_dropping());
    assert_eq!(game.state().fall_interval_ms(), 50);

    press(&mut game, KeyCode::Char(' '));
    assert_eq!(game.state().pieces_placed(), 1);

    assert_eq!(
        press(&mut game, KeyCode::Char('q')),
        Some(LoopControl::Exit)
    );
    assert!(game.should_quit());
}

#[test]
fn test_soft_drop_release_timeout_restores_interval() {
    let state = GameState::new(GameConfig::default(), 5).unwrap();
    let mut game = MatchLoop::new(state, MemoryRecorder::default());
    let mut latch = SoftDropLatch::new();
    game.tick(TICK_MS);

    if let Some(a) = latch.observe(GameAction::SoftDropStart) {
        game.handle_action(a);
    }
    assert_eq!(game.state().fall_interval_ms(), 50);

    for _ in 0..20 {
        if let Some(release) = latch.update(TICK_MS) {
            game.handle_action(release);
        }
        game.tick(TICK_MS);
    }
    assert_eq!(game.state().fall_interval_ms(), 500);
}
