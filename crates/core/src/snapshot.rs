//! Read-only view of a round for rendering.
//!
//! Snapshots are plain data; a front end keeps one around and refreshes it with
//! [`GameState::snapshot_into`](crate::GameState::snapshot_into) each frame so the
//! board allocation is reused.

use crate::piece::Piece;
use crate::types::{Cell, GameStatus};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major, `width * height` cells
    pub board: Vec<Cell>,
    pub current: Option<Piece>,
    pub next: Option<Piece>,
    pub score: u32,
    pub combo: u32,
    pub time_remaining_secs: u32,
    pub target_score: u32,
    pub status: GameStatus,
    pub round_id: u32,
    pub lines_cleared: u32,
}

impl GameSnapshot {
    /// Cell at (x, y), `None` when out of bounds
    pub fn cell(&self, x: i16, y: i16) -> Option<Cell> {
        if x < 0 || y < 0 || x >= self.width as i16 || y >= self.height as i16 {
            return None;
        }
        self.board
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Progress toward the target score in `[0.0, 1.0]`
    pub fn target_progress(&self) -> f32 {
        crate::scoring::target_progress(self.score, self.target_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn cell_lookup_is_bounds_checked() {
        let mut snap = GameSnapshot {
            width: 2,
            height: 2,
            board: vec![None, Some(Color::Gold), None, None],
            ..GameSnapshot::default()
        };
        assert_eq!(snap.cell(1, 0), Some(Some(Color::Gold)));
        assert_eq!(snap.cell(0, 1), Some(None));
        assert_eq!(snap.cell(2, 0), None);
        assert_eq!(snap.cell(0, -1), None);

        snap.status = GameStatus::Paused;
        assert!(!snap.playable());
    }

    #[test]
    fn progress_tracks_target() {
        let snap = GameSnapshot {
            score: 250,
            target_score: 1000,
            ..GameSnapshot::default()
        };
        assert_eq!(snap.target_progress(), 0.25);
    }
}
