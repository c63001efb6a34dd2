//! Game configuration, fixed at construction.

use thiserror::Error;

use crate::types::{
    DEFAULT_CELL_SIZE, DEFAULT_FALL_MS, DEFAULT_TARGET_SCORE, DEFAULT_TIME_LIMIT_SECS,
    GRID_HEIGHT, GRID_WIDTH, MAX_GRID_DIM, SOFT_DROP_FALL_MS,
};

/// Rejected configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },

    #[error("grid dimensions must not exceed {max}, got {width}x{height}")]
    GridTooLarge { width: u16, height: u16, max: u16 },

    #[error("grid {width}x{height} is too small to spawn every shape")]
    GridTooSmall { width: u16, height: u16 },

    #[error("time limit must be at least one second")]
    ZeroTimeLimit,

    #[error("target score must be positive")]
    ZeroTargetScore,

    #[error("{name} must be a positive number of milliseconds")]
    ZeroInterval { name: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub grid_width: u16,
    pub grid_height: u16,
    /// Pixel size of a cell; the terminal front end ignores it.
    pub cell_size: u16,
    pub time_limit_secs: u32,
    pub target_score: u32,
    pub initial_fall_ms: u32,
    pub soft_drop_fall_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            target_score: DEFAULT_TARGET_SCORE,
            initial_fall_ms: DEFAULT_FALL_MS,
            soft_drop_fall_ms: SOFT_DROP_FALL_MS,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.grid_width, self.grid_height);
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        if width > MAX_GRID_DIM || height > MAX_GRID_DIM {
            return Err(ConfigError::GridTooLarge {
                width,
                height,
                max: MAX_GRID_DIM,
            });
        }
        // The spawn anchor sits at width / 2; the widest pattern is three columns
        // and the tallest is four rows.
        if width / 2 + 3 > width || height < 4 {
            return Err(ConfigError::GridTooSmall { width, height });
        }
        if self.time_limit_secs == 0 {
            return Err(ConfigError::ZeroTimeLimit);
        }
        if self.target_score == 0 {
            return Err(ConfigError::ZeroTargetScore);
        }
        if self.initial_fall_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "initial fall interval",
            });
        }
        if self.soft_drop_fall_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "soft drop fall interval",
            });
        }
        Ok(())
    }

    /// Round length in milliseconds
    pub fn time_limit_ms(&self) -> u64 {
        self.time_limit_secs as u64 * 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_grid() {
        let cfg = GameConfig {
            grid_width: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::EmptyGrid {
                width: 0,
                height: 20
            })
        );
    }

    #[test]
    fn rejects_grid_too_small_to_spawn() {
        let cfg = GameConfig {
            grid_width: 4,
            ..GameConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::GridTooSmall {
                width: 4,
                height: 20
            })
        );
        let cfg = GameConfig {
            grid_width: 5,
            ..GameConfig::default()
        };
        assert!(cfg.validate().is_ok());

        let cfg = GameConfig {
            grid_height: 3,
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::GridTooSmall { .. })
        ));
    }

    #[test]
    fn rejects_oversized_grid() {
        let cfg = GameConfig {
            grid_height: MAX_GRID_DIM + 1,
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn rejects_zero_limits() {
        let cfg = GameConfig {
            time_limit_secs: 0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroTimeLimit));

        let cfg = GameConfig {
            target_score: 0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroTargetScore));

        let cfg = GameConfig {
            soft_drop_fall_ms: 0,
            ..GameConfig::default()
        };
        assert!(cfg.validate().unwrap_err().to_string().contains("soft drop"));
    }
}
