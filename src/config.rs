//! Startup configuration: an optional TOML file overlaid by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::GameConfig;

/// On-disk configuration; every key is optional.
///
/// ```toml
/// grid_width = 12
/// time_limit_secs = 120
/// target_score = 1500
/// scores_path = "/tmp/teratis.json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub grid_width: Option<u16>,
    pub grid_height: Option<u16>,
    pub cell_size: Option<u16>,
    pub time_limit_secs: Option<u32>,
    pub target_score: Option<u32>,
    pub initial_fall_ms: Option<u32>,
    pub soft_drop_fall_ms: Option<u32>,
    /// Soft-drop release fallback for terminals that never report key releases
    pub key_release_timeout_ms: Option<u32>,
    pub seed: Option<u32>,
    pub scores_path: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Overlay `other` on top of `self`; set keys in `other` win.
    pub fn merge(self, other: ConfigFile) -> ConfigFile {
        ConfigFile {
            grid_width: other.grid_width.or(self.grid_width),
            grid_height: other.grid_height.or(self.grid_height),
            cell_size: other.cell_size.or(self.cell_size),
            time_limit_secs: other.time_limit_secs.or(self.time_limit_secs),
            target_score: other.target_score.or(self.target_score),
            initial_fall_ms: other.initial_fall_ms.or(self.initial_fall_ms),
            soft_drop_fall_ms: other.soft_drop_fall_ms.or(self.soft_drop_fall_ms),
            key_release_timeout_ms: other.key_release_timeout_ms.or(self.key_release_timeout_ms),
            seed: other.seed.or(self.seed),
            scores_path: other.scores_path.or(self.scores_path),
        }
    }

    /// Resolve into a validated game configuration
    pub fn game_config(&self) -> Result<GameConfig> {
        let d = GameConfig::default();
        let cfg = GameConfig {
            grid_width: self.grid_width.unwrap_or(d.grid_width),
            grid_height: self.grid_height.unwrap_or(d.grid_height),
            cell_size: self.cell_size.unwrap_or(d.cell_size),
            time_limit_secs: self.time_limit_secs.unwrap_or(d.time_limit_secs),
            target_score: self.target_score.unwrap_or(d.target_score),
            initial_fall_ms: self.initial_fall_ms.unwrap_or(d.initial_fall_ms),
            soft_drop_fall_ms: self.soft_drop_fall_ms.unwrap_or(d.soft_drop_fall_ms),
        };
        cfg.validate().context("invalid game configuration")?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let file = ConfigFile::parse("").unwrap();
        assert_eq!(file, ConfigFile::default());
        assert_eq!(file.game_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn parses_partial_file() {
        let file = ConfigFile::parse("grid_width = 12\ntarget_score = 1500\n").unwrap();
        let cfg = file.game_config().unwrap();
        assert_eq!(cfg.grid_width, 12);
        assert_eq!(cfg.target_score, 1500);
        assert_eq!(cfg.grid_height, 20);
    }

    #[test]
    fn parses_key_release_timeout() {
        let file = ConfigFile::parse("key_release_timeout_ms = 220").unwrap();
        assert_eq!(file.key_release_timeout_ms, Some(220));
        assert_eq!(ConfigFile::default().key_release_timeout_ms, None);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(ConfigFile::parse("level = 3").is_err());
    }

    #[test]
    fn invalid_values_fail_fast() {
        let file = ConfigFile::parse("time_limit_secs = 0").unwrap();
        let err = file.game_config().unwrap_err();
        assert!(format!("{:#}", err).contains("time limit"));
    }

    #[test]
    fn later_layer_wins() {
        let base = ConfigFile {
            grid_width: Some(12),
            seed: Some(1),
            ..ConfigFile::default()
        };
        let cli = ConfigFile {
            seed: Some(7),
            ..ConfigFile::default()
        };
        let merged = base.merge(cli);
        assert_eq!(merged.grid_width, Some(12));
        assert_eq!(merged.seed, Some(7));
    }
}
