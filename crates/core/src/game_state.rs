//! Game state module - the engine
//!
//! This module ties together all core components: grid, pieces, RNG, and scoring.
//! It handles the fall timer, piece movement and rotation, placement with chained
//! clear resolution, the round clock, and the Playing/Paused/GameOver/Won lifecycle.

use tracing::{debug, info};

use crate::config::{ConfigError, GameConfig};
use crate::effects::{Effect, EffectBuffer};
use crate::grid::Grid;
use crate::outcome::{Outcome, ScoreRecorder};
use crate::piece::{Piece, PieceQueue};
use crate::rng::PieceGenerator;
use crate::scoring::{self, ClearResult};
use crate::snapshot::GameSnapshot;
use crate::types::{GameAction, GameStatus};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    queue: PieceQueue,
    generator: PieceGenerator,
    status: GameStatus,
    score: u32,
    /// Consecutive clear passes; reset by any placement that clears nothing.
    combo: u32,
    /// Round clock. Advances while playing or paused, stops in terminal states.
    elapsed_ms: u64,
    /// Time since the last gravity step or hard drop.
    fall_timer_ms: u32,
    soft_drop: bool,
    effects: EffectBuffer,
    /// Set once on entering GameOver/Won, consumed by `record_outcome`.
    pending_outcome: Option<Outcome>,
    /// Monotonic round id (increments on restart).
    round_id: u32,
    lines_cleared: u32,
    pieces_placed: u32,
}

impl GameState {
    /// Create a new round with the given configuration and RNG seed.
    ///
    /// No piece exists until the first `tick` (or an explicit `spawn`).
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            grid: Grid::new(config.grid_width, config.grid_height),
            queue: PieceQueue::new(),
            generator: PieceGenerator::new(seed, config.grid_width),
            status: GameStatus::Playing,
            score: 0,
            combo: 0,
            elapsed_ms: 0,
            fall_timer_ms: 0,
            soft_drop: false,
            effects: EffectBuffer::new(),
            pending_outcome: None,
            round_id: 0,
            lines_cleared: 0,
            pieces_placed: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for scripted setups (tests, benchmarks).
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn pieces_placed(&self) -> u32 {
        self.pieces_placed
    }

    pub fn current(&self) -> Option<&Piece> {
        self.queue.current()
    }

    pub fn next_piece(&self) -> Option<&Piece> {
        self.queue.next()
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.soft_drop
    }

    pub fn time_remaining_secs(&self) -> u32 {
        scoring::time_remaining_secs(self.elapsed_ms, self.config.time_limit_secs)
    }

    /// Current gravity interval
    pub fn fall_interval_ms(&self) -> u32 {
        scoring::fall_interval_ms(self.soft_drop, &self.config)
    }

    pub fn pending_outcome(&self) -> Option<Outcome> {
        self.pending_outcome
    }

    /// Hand accumulated cosmetic notifications to the caller
    pub fn drain_effects(&mut self) -> std::vec::Drain<'_, Effect> {
        self.effects.drain()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.board.clear();
        out.board.extend_from_slice(self.grid.cells());
        out.current = self.queue.current().copied();
        out.next = self.queue.next().copied();
        out.score = self.score;
        out.combo = self.combo;
        out.time_remaining_secs = self.time_remaining_secs();
        out.target_score = self.config.target_score;
        out.status = self.status;
        out.round_id = self.round_id;
        out.lines_cleared = self.lines_cleared;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Promote the lookahead piece (generating one if needed) and refill it.
    ///
    /// Returns true if a new current piece is falling. A spawn that collides with the
    /// stack ends the round instead; the blocked piece is discarded, never placed.
    pub fn spawn(&mut self) -> bool {
        if self.status != GameStatus::Playing || self.queue.has_current() {
            return false;
        }

        let generator = &mut self.generator;
        let Some(piece) = self.queue.advance(|| generator.next_piece()) else {
            return false;
        };

        if !self.grid.is_valid_move(&piece, 0, 0) {
            debug!(kind = piece.kind().as_str(), x = piece.x, "spawn blocked");
            self.queue.take_current();
            self.finish(GameStatus::GameOver);
            return false;
        }

        debug!(kind = piece.kind().as_str(), color = ?piece.color, "spawned piece");
        true
    }

    /// Shift the current piece horizontally; rejected moves leave it unchanged
    pub fn move_horizontal(&mut self, dx: i16) -> bool {
        self.try_shift(dx, 0)
    }

    fn try_shift(&mut self, dx: i16, dy: i16) -> bool {
        let Some(piece) = self.queue.current() else {
            return false;
        };
        if !self.grid.is_valid_move(piece, dx, dy) {
            return false;
        }
        let moved = piece.moved(dx, dy);
        if let Some(slot) = self.queue.current_mut() {
            *slot = moved;
        }
        true
    }

    /// Rotate the current piece 90° clockwise in place, or not at all.
    ///
    /// There is no kick search: a rotation that does not fit at the current anchor
    /// is discarded.
    pub fn rotate(&mut self) -> bool {
        let Some(piece) = self.queue.current() else {
            return false;
        };
        let candidate = piece.rotated();
        if !self.grid.is_valid_move(&candidate, 0, 0) {
            return false;
        }
        if let Some(slot) = self.queue.current_mut() {
            *slot = candidate;
        }
        true
    }

    /// Switch gravity between the soft-drop and base intervals
    pub fn set_soft_drop(&mut self, active: bool) {
        self.soft_drop = active;
    }

    /// Drop the current piece as far as it goes and place it immediately.
    ///
    /// Returns the number of rows travelled, or `None` without a current piece.
    pub fn hard_drop(&mut self) -> Option<u32> {
        self.queue.current()?;
        let mut distance = 0;
        while self.try_shift(0, 1) {
            distance += 1;
        }
        self.fall_timer_ms = 0;
        self.place_block();
        Some(distance)
    }

    /// One gravity step: fall a row if possible, otherwise place.
    ///
    /// Returns whether a placement occurred.
    pub fn gravity_tick(&mut self) -> bool {
        if !self.queue.has_current() {
            return false;
        }
        if self.try_shift(0, 1) {
            return false;
        }
        self.place_block();
        true
    }

    /// Bake the current piece into the grid and resolve clears until none remain.
    pub fn place_block(&mut self) -> ClearResult {
        let Some(piece) = self.queue.take_current() else {
            return ClearResult::default();
        };

        for (x, y, color) in self.grid.bake(&piece) {
            self.effects.push(Effect::Landed { x, y, color });
        }
        self.pieces_placed = self.pieces_placed.wrapping_add(1);

        let mut result = ClearResult::default();
        loop {
            let matches = self.grid.find_matches();
            if matches.is_empty() {
                break;
            }
            let combo_before = self.combo;
            let gain = scoring::apply_clear_pass(&mut self.score, &mut self.combo, matches.len());
            let removed = self.grid.remove_rows(&matches);
            self.effects.push(Effect::LineCleared { cells: removed });
            self.grid.apply_gravity();

            debug!(
                rows = ?matches,
                combo_before,
                gain,
                score = self.score,
                "cleared rows"
            );
            result.passes += 1;
            result.lines += matches.len() as u32;
            result.score_gain = result.score_gain.saturating_add(gain);
        }

        if result.passes == 0 {
            self.combo = 0;
        }
        self.lines_cleared = self.lines_cleared.saturating_add(result.lines);
        result
    }

    /// Advance the game by `elapsed_ms`.
    ///
    /// Order per frame: round clock, win/lose policy, fall timer, spawn.
    /// Returns whether a placement occurred.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        match self.status {
            GameStatus::Paused => {
                self.elapsed_ms += elapsed_ms as u64;
                return false;
            }
            GameStatus::GameOver | GameStatus::Won => return false,
            GameStatus::Playing => {}
        }

        self.elapsed_ms += elapsed_ms as u64;
        if let Some(end) = scoring::evaluate_status(self.elapsed_ms, self.score, &self.config) {
            self.finish(end);
            return false;
        }

        let mut placed = false;
        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms >= self.fall_interval_ms() {
            self.fall_timer_ms = 0;
            placed = self.gravity_tick();
        }

        if !self.queue.has_current() {
            self.spawn();
        }

        placed
    }

    /// Flip between Playing and Paused; terminal states ignore it
    pub fn toggle_pause(&mut self) -> bool {
        self.status = match self.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            GameStatus::GameOver | GameStatus::Won => return false,
        };
        info!(status = self.status.as_str(), "pause toggled");
        true
    }

    /// Reset grid, score, combo, clock and state; valid from any state
    pub fn restart(&mut self) {
        self.grid.clear();
        self.queue.clear();
        self.effects.clear();
        self.status = GameStatus::Playing;
        self.score = 0;
        self.combo = 0;
        self.elapsed_ms = 0;
        self.fall_timer_ms = 0;
        self.soft_drop = false;
        self.pending_outcome = None;
        self.lines_cleared = 0;
        self.pieces_placed = 0;
        self.round_id = self.round_id.wrapping_add(1);
        info!(round = self.round_id, "round restarted");
    }

    fn finish(&mut self, status: GameStatus) {
        self.status = status;
        self.queue.take_current();
        self.soft_drop = false;
        self.pending_outcome = Some(Outcome {
            status,
            score: self.score,
            round_id: self.round_id,
        });
        info!(
            status = status.as_str(),
            score = self.score,
            elapsed_ms = self.elapsed_ms,
            "round finished"
        );
    }

    /// Deliver the pending outcome (if any) to `recorder`, exactly once per round
    pub fn record_outcome(
        &mut self,
        recorder: &mut dyn ScoreRecorder,
        player_name: Option<&str>,
    ) -> bool {
        let Some(outcome) = self.pending_outcome.take() else {
            return false;
        };
        recorder.record_score(outcome.score, player_name);
        info!(score = outcome.score, player = ?player_name, "score recorded");
        true
    }

    /// Apply a game action
    ///
    /// Quit is never consumed here; the loop that owns the engine handles it.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::TogglePause => return self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                return true;
            }
            GameAction::SoftDropEnd => {
                let was = self.soft_drop;
                self.set_soft_drop(false);
                return was;
            }
            GameAction::Quit => return false,
            _ => {}
        }

        if self.status != GameStatus::Playing {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.move_horizontal(-1),
            GameAction::MoveRight => self.move_horizontal(1),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => self.hard_drop().is_some(),
            GameAction::SoftDropStart => {
                self.set_soft_drop(true);
                true
            }
            GameAction::TogglePause
            | GameAction::Restart
            | GameAction::SoftDropEnd
            | GameAction::Quit => false,
        }
    }
}
