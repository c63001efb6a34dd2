//! Soft-drop hold tracking for terminals without key-release events.
//!
//! Most terminals only report presses plus auto-repeat. The latch remembers that a
//! soft drop is held and, once no press or repeat has arrived for the release
//! timeout, reports the release the terminal never sent.

use crate::types::GameAction;

// Must exceed the terminal's auto-repeat interval.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

#[derive(Debug, Clone)]
pub struct SoftDropLatch {
    held: bool,
    since_last_key_ms: u32,
    key_release_timeout_ms: u32,
    /// Set once a real release event has been seen; disables the timeout.
    releases_reported: bool,
}

impl Default for SoftDropLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl SoftDropLatch {
    pub fn new() -> Self {
        Self {
            held: false,
            since_last_key_ms: 0,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            releases_reported: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Feed every mapped action through the latch.
    ///
    /// Returns the action to forward; repeated starts while held are swallowed.
    pub fn observe(&mut self, action: GameAction) -> Option<GameAction> {
        match action {
            GameAction::SoftDropStart => {
                self.since_last_key_ms = 0;
                if self.held {
                    None
                } else {
                    self.held = true;
                    Some(action)
                }
            }
            GameAction::SoftDropEnd => {
                self.releases_reported = true;
                if self.held {
                    self.held = false;
                    Some(action)
                } else {
                    None
                }
            }
            other => Some(other),
        }
    }

    /// Advance the release timer; yields `SoftDropEnd` when the hold has lapsed.
    pub fn update(&mut self, elapsed_ms: u32) -> Option<GameAction> {
        if !self.held || self.releases_reported {
            return None;
        }
        self.since_last_key_ms = self.since_last_key_ms.saturating_add(elapsed_ms);
        if self.since_last_key_ms > self.key_release_timeout_ms {
            self.held = false;
            self.since_last_key_ms = 0;
            return Some(GameAction::SoftDropEnd);
        }
        None
    }

    /// Forget any hold (used on restart and when the name prompt opens)
    pub fn reset(&mut self) {
        self.held = false;
        self.since_last_key_ms = 0;
    }
}
