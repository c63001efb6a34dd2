//! Cosmetic notifications emitted by the engine.
//!
//! The engine only appends; a presentation layer drains the buffer once per frame.
//! Nothing here ever feeds back into game state.

use crate::grid::PlacedCell;
use crate::types::Color;

/// Upper bound on buffered notifications; later ones are dropped until drained.
pub const EFFECT_BUFFER_CAP: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// One cell of a piece was written into the grid
    Landed { x: i16, y: i16, color: Color },
    /// One resolution pass removed these cells
    LineCleared { cells: Vec<PlacedCell> },
}

#[derive(Debug, Clone, Default)]
pub struct EffectBuffer {
    pending: Vec<Effect>,
    dropped: u64,
}

impl EffectBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        if self.pending.len() >= EFFECT_BUFFER_CAP {
            self.dropped += 1;
            return;
        }
        self.pending.push(effect);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Effect> {
        self.pending.drain(..)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Notifications discarded because nobody drained the buffer in time
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
