//! Grid module - manages the playfield
//!
//! The grid is a `width x height` matrix where each cell is empty or holds the color
//! of a landed piece. Storage is a flat row-major vector sized once at construction.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Cells above the visible grid (y < 0) are legal for a falling piece but never stored.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::shape::MAX_SHAPE_DIM;
use crate::types::{Cell, Color};

/// A placed cell reported by [`Grid::bake`] or [`Grid::remove_rows`]
pub type PlacedCell = (i16, i16, Color);

/// Cells written by a single bake (one piece)
pub type Landed = ArrayVec<PlacedCell, { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

/// The game grid, flat row-major storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid.
    ///
    /// Dimensions are expected to be validated by `GameConfig::validate`.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i16 || y >= self.height as i16 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// The single placement predicate.
    ///
    /// Every occupied cell of `piece` shifted by (dx, dy) must have `x` in `[0, width)`
    /// and `y < height`; cells with `y >= 0` must also land on an empty cell.
    /// Cells above the grid (`y < 0`) are accepted.
    pub fn is_valid_move(&self, piece: &Piece, dx: i16, dy: i16) -> bool {
        piece.cells().all(|(cx, cy)| {
            let x = cx + dx;
            let y = cy + dy;
            if x < 0 || x >= self.width as i16 || y >= self.height as i16 {
                return false;
            }
            y < 0 || !self.is_occupied(x, y)
        })
    }

    /// Write every occupied cell of `piece` into the grid with the piece's color.
    ///
    /// Returns the cells that were written; cells above the grid are skipped.
    pub fn bake(&mut self, piece: &Piece) -> Landed {
        let mut landed = Landed::new();
        for (x, y) in piece.cells() {
            if self.set(x, y, Some(piece.color)) {
                landed.push((x, y, piece.color));
            }
        }
        landed
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: u16) -> bool {
        if y >= self.height {
            return false;
        }
        let start = y as usize * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .all(|c| c.is_some())
    }

    /// All completely filled rows, scanned bottom to top
    pub fn find_matches(&self) -> Vec<u16> {
        (0..self.height).rev().filter(|&y| self.is_row_full(y)).collect()
    }

    /// Empty every cell of the given rows and return what was removed.
    ///
    /// Rows above are *not* shifted; call [`Grid::apply_gravity`] afterwards.
    pub fn remove_rows(&mut self, rows: &[u16]) -> Vec<PlacedCell> {
        let mut removed = Vec::with_capacity(rows.len() * self.width as usize);
        for &y in rows {
            for x in 0..self.width as i16 {
                if let Some(Some(color)) = self.get(x, y as i16) {
                    removed.push((x, y as i16, color));
                    self.set(x, y as i16, None);
                }
            }
        }
        removed
    }

    /// Compact every column downward independently.
    ///
    /// Scans each column bottom to top keeping the lowest empty slot seen so far;
    /// each filled cell above it drops into that slot. Relative order within a
    /// column is preserved.
    pub fn apply_gravity(&mut self) {
        let width = self.width as usize;
        for x in 0..width {
            let mut empty_y: Option<usize> = None;
            for y in (0..self.height as usize).rev() {
                let i = y * width + x;
                match (self.cells[i], empty_y) {
                    (None, None) => empty_y = Some(y),
                    (Some(cell), Some(slot)) => {
                        self.cells[slot * width + x] = Some(cell);
                        self.cells[i] = None;
                        empty_y = Some(slot - 1);
                    }
                    _ => {}
                }
            }
        }
    }

    /// Number of placed cells on the grid
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a grid from rows of text for tests: '.' is empty, anything else is filled.
    pub fn from_rows(rows: &[&str], color: Color) -> Self {
        let height = rows.len() as u16;
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0) as u16;
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch != '.' {
                    grid.set(x as i16, y as i16, Some(color));
                }
            }
        }
        grid
    }

    /// Render rows back to text ('#' filled, '.' empty)
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1) as usize)
            .map(|row| {
                row.iter()
                    .map(|c| if c.is_some() { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}
