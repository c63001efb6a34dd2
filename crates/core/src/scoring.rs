//! Scoring module - line-clear points, combo, and the round timer policy
//!
//! Points for a clear pass are `LINE_SCORES[lines] * combo_before`, where
//! `combo_before` is the combo count *before* the pass increments it. The first
//! clear of a streak is therefore worth nothing; only consecutive clears pay.

use crate::config::GameConfig;
use crate::types::{GameStatus, LINE_SCORES};

/// Base points for clearing `lines` rows in one pass (4 or more pay the 4-line value)
pub fn base_line_score(lines: usize) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)]
}

/// Points awarded for a clear pass of `lines` rows at the given pre-increment combo
pub fn line_clear_score(lines: usize, combo_before: u32) -> u32 {
    base_line_score(lines).saturating_mul(combo_before)
}

/// Outcome of a single placement's clear resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearResult {
    /// Resolution passes that removed at least one row
    pub passes: u32,
    /// Rows removed across all passes
    pub lines: u32,
    /// Points added across all passes
    pub score_gain: u32,
}

/// Apply one clear pass to `(score, combo)`, returning the points gained.
pub fn apply_clear_pass(score: &mut u32, combo: &mut u32, lines: usize) -> u32 {
    let gain = line_clear_score(lines, *combo);
    *score = score.saturating_add(gain);
    *combo = combo.saturating_add(1);
    gain
}

/// Decide whether a playing round ends.
///
/// Reaching the target score wins even when the time limit expires on the same tick.
pub fn evaluate_status(elapsed_ms: u64, score: u32, config: &GameConfig) -> Option<GameStatus> {
    if score >= config.target_score {
        Some(GameStatus::Won)
    } else if elapsed_ms >= config.time_limit_ms() {
        Some(GameStatus::GameOver)
    } else {
        None
    }
}

/// Whole seconds left on the clock, saturating at zero
pub fn time_remaining_secs(elapsed_ms: u64, limit_secs: u32) -> u32 {
    let elapsed_secs = elapsed_ms / 1000;
    (limit_secs as u64).saturating_sub(elapsed_secs) as u32
}

/// Progress toward the target score in `[0.0, 1.0]`
pub fn target_progress(score: u32, target: u32) -> f32 {
    if target == 0 {
        return 1.0;
    }
    (score as f32 / target as f32).clamp(0.0, 1.0)
}

/// Gravity interval for the current input state
pub fn fall_interval_ms(soft_drop: bool, config: &GameConfig) -> u32 {
    if soft_drop {
        config.soft_drop_fall_ms
    } else {
        config.initial_fall_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_line_scores() {
        assert_eq!(base_line_score(1), 100);
        assert_eq!(base_line_score(2), 300);
        assert_eq!(base_line_score(3), 500);
        assert_eq!(base_line_score(4), 800);
        assert_eq!(base_line_score(7), 800);
    }

    #[test]
    fn test_first_clear_in_streak_scores_zero() {
        assert_eq!(line_clear_score(1, 0), 0);
        assert_eq!(line_clear_score(4, 0), 0);
    }

    #[test]
    fn test_combo_multiplier() {
        assert_eq!(line_clear_score(1, 1), 100);
        assert_eq!(line_clear_score(4, 2), 1600);
        assert_eq!(line_clear_score(3, 3), 1500);
    }

    #[test]
    fn test_apply_clear_pass_increments_after_scoring() {
        let mut score = 0;
        let mut combo = 0;
        assert_eq!(apply_clear_pass(&mut score, &mut combo, 1), 0);
        assert_eq!((score, combo), (0, 1));
        assert_eq!(apply_clear_pass(&mut score, &mut combo, 2), 300);
        assert_eq!((score, combo), (300, 2));
    }

    #[test]
    fn test_evaluate_status() {
        let cfg = GameConfig::default();
        assert_eq!(evaluate_status(0, 0, &cfg), None);
        assert_eq!(evaluate_status(179_999, 999, &cfg), None);
        assert_eq!(evaluate_status(180_000, 999, &cfg), Some(GameStatus::GameOver));
        assert_eq!(evaluate_status(1_000, 1000, &cfg), Some(GameStatus::Won));
        // Both limits on the same tick: the win stands.
        assert_eq!(evaluate_status(180_000, 1200, &cfg), Some(GameStatus::Won));
    }

    #[test]
    fn test_time_remaining() {
        assert_eq!(time_remaining_secs(0, 180), 180);
        assert_eq!(time_remaining_secs(999, 180), 180);
        assert_eq!(time_remaining_secs(1_000, 180), 179);
        assert_eq!(time_remaining_secs(500_000, 180), 0);
    }

    #[test]
    fn test_target_progress() {
        assert_eq!(target_progress(0, 1000), 0.0);
        assert_eq!(target_progress(500, 1000), 0.5);
        assert_eq!(target_progress(5000, 1000), 1.0);
    }

    #[test]
    fn test_fall_interval() {
        let cfg = GameConfig::default();
        assert_eq!(fall_interval_ms(false, &cfg), 500);
        assert_eq!(fall_interval_ms(true, &cfg), 50);
    }
}
