//! Piece module - positioned shapes and the two-slot piece queue

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::shape::Shape;
use crate::types::{Color, ShapeKind};

/// A shape instance positioned on the grid
///
/// `(x, y)` is the grid coordinate of the pattern's top-left anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub x: i16,
    pub y: i16,
    pub color: Color,
    pub shape: Shape,
}

impl Piece {
    /// Create a piece anchored at the spawn position for a grid of `grid_width` columns
    pub fn spawn(kind: ShapeKind, color: Color, grid_width: u16) -> Self {
        Self {
            x: (grid_width / 2) as i16,
            y: 0,
            color,
            shape: Shape::new(kind),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Absolute grid coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Check whether this piece would be legal after shifting by (dx, dy)
    pub fn is_valid_move(&self, dx: i16, dy: i16, grid: &Grid) -> bool {
        grid.is_valid_move(self, dx, dy)
    }

    /// Copy of this piece shifted by (dx, dy)
    pub fn moved(&self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Copy of this piece with its shape rotated 90° clockwise
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }
}

/// The current falling piece plus a single lookahead, as a FIFO of capacity two.
///
/// Layout:
/// - `[]`: nothing generated yet (fresh round)
/// - `[next]`: no current piece; `next` is promoted on the following spawn
/// - `[current, next]`: a piece is falling
#[derive(Debug, Clone, Default)]
pub struct PieceQueue {
    slots: ArrayVec<Piece, 2>,
}

impl PieceQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The falling piece, if any
    pub fn current(&self) -> Option<&Piece> {
        if self.slots.len() == 2 {
            self.slots.first()
        } else {
            None
        }
    }

    pub fn current_mut(&mut self) -> Option<&mut Piece> {
        if self.slots.len() == 2 {
            self.slots.first_mut()
        } else {
            None
        }
    }

    /// The lookahead piece, if any
    pub fn next(&self) -> Option<&Piece> {
        self.slots.last()
    }

    pub fn has_current(&self) -> bool {
        self.slots.len() == 2
    }

    /// Promote the lookahead to current and refill the lookahead.
    ///
    /// `generate` is called once when a lookahead already exists, twice on a fresh
    /// queue. Returns the new current piece, or `None` if a piece is already falling.
    pub fn advance(&mut self, mut generate: impl FnMut() -> Piece) -> Option<Piece> {
        if self.has_current() {
            return None;
        }
        if self.slots.is_empty() {
            self.slots.push(generate());
        }
        self.slots.push(generate());
        self.slots.first().copied()
    }

    /// Remove the falling piece, leaving the lookahead in place
    pub fn take_current(&mut self) -> Option<Piece> {
        if self.has_current() {
            Some(self.slots.remove(0))
        } else {
            None
        }
    }

    /// Drop everything (used on restart)
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
