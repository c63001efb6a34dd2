//! Terminal-agnostic match loop.
//!
//! [`MatchLoop`] owns a [`GameState`] and the [`ScoreRecorder`] finished rounds are
//! delivered to. A front end feeds it decoded actions and frame time; the loop decides
//! what the engine sees, when a round's score is recorded, and when the program quits.
//!
//! Settlement rules:
//! - `GameOver` is recorded as soon as it happens, without a player name.
//! - `Won` waits for [`MatchLoop::submit_name`]; while the name is pending the game
//!   ignores every action except `Quit`.
//! - Quitting with a win still pending records it under the default name.

use tracing::{debug, info};

use teratis_core::{Effect, GameSnapshot, GameState, ScoreRecorder};
use teratis_types::{GameAction, GameStatus};

/// What the caller should do after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub struct MatchLoop<R: ScoreRecorder> {
    state: GameState,
    recorder: R,
    awaiting_name: bool,
    quit: bool,
}

impl<R: ScoreRecorder> MatchLoop<R> {
    pub fn new(state: GameState, recorder: R) -> Self {
        Self {
            state,
            recorder,
            awaiting_name: false,
            quit: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// True while a won round is waiting for the player's name
    pub fn awaiting_name(&self) -> bool {
        self.awaiting_name
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Route one decoded action.
    ///
    /// Quit is handled here before the engine is consulted.
    pub fn handle_action(&mut self, action: GameAction) -> LoopControl {
        if action == GameAction::Quit {
            if self.awaiting_name {
                self.submit_name(None);
            }
            self.quit = true;
            info!("quit requested");
            return LoopControl::Exit;
        }

        if self.awaiting_name {
            debug!(action = action.as_str(), "ignored while entering name");
            return LoopControl::Continue;
        }

        self.state.apply_action(action);
        self.settle();
        LoopControl::Continue
    }

    /// Advance the engine by one frame
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.quit {
            return false;
        }
        let placed = self.state.tick(elapsed_ms);
        self.settle();
        placed
    }

    /// Record a pending win under `name`; `None` or a blank name uses the recorder's default.
    pub fn submit_name(&mut self, name: Option<&str>) -> bool {
        if !self.awaiting_name {
            return false;
        }
        self.awaiting_name = false;
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        self.state.record_outcome(&mut self.recorder, name)
    }

    pub fn drain_effects(&mut self) -> std::vec::Drain<'_, Effect> {
        self.state.drain_effects()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }

    fn settle(&mut self) {
        let Some(outcome) = self.state.pending_outcome() else {
            return;
        };
        if outcome.wants_player_name() {
            if !self.awaiting_name {
                debug!(score = outcome.score, "waiting for player name");
            }
            self.awaiting_name = true;
        } else {
            self.state.record_outcome(&mut self.recorder, None);
        }
    }
}
