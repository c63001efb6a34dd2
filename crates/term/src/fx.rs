//! Short-lived cosmetic flashes driven by engine effects.
//!
//! The layer only reads drained [`Effect`]s and ages its own state once per frame.

use crate::core::Effect;
use crate::types::Color;

/// Frames a landed cell stays highlighted
pub const LANDED_FRAMES: u8 = 6;
/// Frames a cleared cell keeps fading out
pub const CLEARED_FRAMES: u8 = 12;

const MAX_FLASHES: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Landed,
    Cleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash {
    pub x: i16,
    pub y: i16,
    pub color: Color,
    pub kind: FlashKind,
    pub frames_left: u8,
}

impl Flash {
    /// Remaining intensity in `[0, 255]`
    pub fn intensity(&self) -> u8 {
        let total = match self.kind {
            FlashKind::Landed => LANDED_FRAMES,
            FlashKind::Cleared => CLEARED_FRAMES,
        };
        ((self.frames_left as u16 * 255) / total as u16) as u8
    }
}

#[derive(Debug, Clone, Default)]
pub struct EffectLayer {
    flashes: Vec<Flash>,
}

impl EffectLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&mut self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            match effect {
                Effect::Landed { x, y, color } => self.push(Flash {
                    x,
                    y,
                    color,
                    kind: FlashKind::Landed,
                    frames_left: LANDED_FRAMES,
                }),
                Effect::LineCleared { cells } => {
                    for (x, y, color) in cells {
                        self.push(Flash {
                            x,
                            y,
                            color,
                            kind: FlashKind::Cleared,
                            frames_left: CLEARED_FRAMES,
                        });
                    }
                }
            }
        }
    }

    fn push(&mut self, flash: Flash) {
        if self.flashes.len() < MAX_FLASHES {
            self.flashes.push(flash);
        }
    }

    /// Advance one frame, dropping expired flashes
    pub fn age(&mut self) {
        for f in &mut self.flashes {
            f.frames_left = f.frames_left.saturating_sub(1);
        }
        self.flashes.retain(|f| f.frames_left > 0);
    }

    pub fn flashes(&self) -> &[Flash] {
        &self.flashes
    }

    pub fn is_empty(&self) -> bool {
        self.flashes.is_empty()
    }

    pub fn clear(&mut self) {
        self.flashes.clear();
    }
}
