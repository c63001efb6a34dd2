//! RNG module - piece generation
//!
//! Every new piece gets a color from the five-color palette and a shape kind from the
//! five canonical kinds, chosen independently and uniformly.
//!
//! The generator is backed by a small LCG so that a seed fully determines a game,
//! which keeps engine tests and benchmarks reproducible.

use crate::piece::Piece;
use crate::types::{Color, ShapeKind};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG with a power-of-two modulus cycle
    /// with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Produces spawn-ready pieces for a grid of a given width
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
    grid_width: u16,
}

impl PieceGenerator {
    pub fn new(seed: u32, grid_width: u16) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            grid_width,
        }
    }

    pub fn next_color(&mut self) -> Color {
        Color::ALL[self.rng.next_range(Color::ALL.len() as u32) as usize]
    }

    pub fn next_kind(&mut self) -> ShapeKind {
        ShapeKind::ALL[self.rng.next_range(ShapeKind::ALL.len() as u32) as usize]
    }

    /// A fresh piece at the spawn anchor
    pub fn next_piece(&mut self) -> Piece {
        let color = self.next_color();
        let kind = self.next_kind();
        Piece::spawn(kind, color, self.grid_width)
    }

    /// Current RNG state; feeding it back into `new` continues the same sequence
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}
