//! Shape module - occupancy patterns and the rotation transform
//!
//! A shape is a small boolean pattern (at most 4x4) stored inline so that
//! rotation candidates can be built and thrown away without allocating.
//! Rotation is a pure transform: reverse the row order, then transpose.
//! Bounds and collision checks belong to the grid.

use crate::types::ShapeKind;

/// Largest pattern side length across all shape kinds
pub const MAX_SHAPE_DIM: usize = 4;

/// Occupancy pattern storage, row-major (`cells[row][col]`)
pub type Pattern = [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];

/// Offset of a single occupied cell relative to the shape's top-left anchor
pub type CellOffset = (i16, i16);

/// A shape kind together with its current occupancy pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    kind: ShapeKind,
    rows: u8,
    cols: u8,
    cells: Pattern,
}

/// Canonical spawn pattern for each kind, as (rows, cols, row strings)
fn canonical(kind: ShapeKind) -> (u8, u8, &'static [&'static str]) {
    match kind {
        ShapeKind::I => (4, 1, &["X", "X", "X", "X"]),
        ShapeKind::L => (3, 2, &["X.", "X.", "XX"]),
        ShapeKind::T => (2, 3, &["XXX", ".X."]),
        ShapeKind::S => (2, 3, &[".XX", "XX."]),
        ShapeKind::O => (2, 2, &["XX", "XX"]),
    }
}

impl Shape {
    /// Create a shape in its spawn orientation
    pub fn new(kind: ShapeKind) -> Self {
        let (rows, cols, art) = canonical(kind);
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, line) in art.iter().enumerate() {
            for (c, ch) in line.chars().enumerate() {
                cells[r][c] = ch == 'X';
            }
        }
        Self {
            kind,
            rows,
            cols,
            cells,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the pattern cell at (row, col) is occupied.
    /// Out-of-pattern coordinates read as empty.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.cells[row][col]
    }

    /// The current occupancy pattern as `rows` vectors of `cols` booleans
    pub fn occupancy(&self) -> Vec<Vec<bool>> {
        (0..self.rows as usize)
            .map(|r| self.cells[r][..self.cols as usize].to_vec())
            .collect()
    }

    /// Occupied cells as (dx, dy) offsets, row-major
    pub fn cells(&self) -> impl Iterator<Item = CellOffset> + '_ {
        let cols = self.cols as usize;
        (0..self.rows as usize).flat_map(move |r| {
            (0..cols)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (c as i16, r as i16))
        })
    }

    /// Number of occupied cells
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// The 90° clockwise rotation of this shape, leaving `self` untouched.
    ///
    /// `new[r][c] = old[rows - 1 - c][r]` with the row/column counts swapped.
    pub fn rotated(&self) -> Self {
        let old_rows = self.rows as usize;
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in cells.iter_mut().enumerate().take(self.cols as usize) {
            for (c, cell) in row.iter_mut().enumerate().take(old_rows) {
                *cell = self.cells[old_rows - 1 - c][r];
            }
        }
        Self {
            kind: self.kind,
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Rotate in place (90° clockwise)
    pub fn rotate(&mut self) {
        *self = self.rotated();
    }
}
