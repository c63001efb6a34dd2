//! Persisted high-score table.
//!
//! Scores live in a JSON array of `{ "score", "name", "date" }` records, best first,
//! at most [`HIGH_SCORE_LIMIT`] entries. Storage problems never reach the player:
//! a missing or corrupt file loads as an empty table, and failed saves are logged.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use teratis_core::ScoreRecorder;
use teratis_types::{DEFAULT_PLAYER_NAME, HIGH_SCORE_LIMIT, MAX_NAME_LEN};

pub const SCORES_FILE_NAME: &str = "high_scores.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u32,
    pub name: String,
    /// Local date the score was set, `YYYY-MM-DD`
    pub date: String,
}

/// Default location: `<data dir>/teratis/high_scores.json`, or the working directory
/// when the platform has no data directory.
pub fn default_scores_path() -> PathBuf {
    match dirs::data_local_dir() {
        Some(dir) => dir.join("teratis").join(SCORES_FILE_NAME),
        None => PathBuf::from(SCORES_FILE_NAME),
    }
}

#[derive(Debug, Clone)]
pub struct HighScoreTable {
    path: Option<PathBuf>,
    entries: Vec<HighScore>,
}

impl HighScoreTable {
    /// A table that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Vec::new(),
        }
    }

    /// Load the table at `path`, recovering from any read or parse failure.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(Some(mut entries)) => {
                sort_and_truncate(&mut entries);
                debug!(path = %path.display(), count = entries.len(), "loaded high scores");
                entries
            }
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable high scores");
                Vec::new()
            }
        };
        Self {
            path: Some(path),
            entries,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Best scores first
    pub fn entries(&self) -> &[HighScore] {
        &self.entries
    }

    pub fn top(&self, n: usize) -> &[HighScore] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Insert a result dated today and persist the table.
    pub fn record(&mut self, score: u32, name: Option<&str>) {
        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        self.insert(score, name, date);
        if let Err(err) = self.save() {
            warn!(error = %err, "failed to save high scores");
        }
    }

    /// Insert without saving; keeps the table sorted and bounded.
    pub fn insert(&mut self, score: u32, name: Option<&str>, date: String) {
        let name = sanitize_name(name);
        info!(score, name = %name, "new high score entry");
        self.entries.push(HighScore { score, name, date });
        sort_and_truncate(&mut self.entries);
    }

    /// Write the table atomically (temp file, then rename)
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let temp_path = path.with_extension("tmp");
        let contents = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&temp_path, contents)
            .with_context(|| format!("writing {}", temp_path.display()))?;
        fs::rename(&temp_path, path).with_context(|| format!("replacing {}", path.display()))?;
        debug!(path = %path.display(), "saved high scores");
        Ok(())
    }
}

impl ScoreRecorder for HighScoreTable {
    fn record_score(&mut self, score: u32, player_name: Option<&str>) {
        self.record(score, player_name);
    }
}

fn read_entries(path: &Path) -> Result<Option<Vec<HighScore>>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path)?;
    let entries = serde_json::from_str(&contents)?;
    Ok(Some(entries))
}

/// Stable sort keeps earlier entries ahead of later equal scores.
fn sort_and_truncate(entries: &mut Vec<HighScore>) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(HIGH_SCORE_LIMIT);
}

fn sanitize_name(name: Option<&str>) -> String {
    let trimmed = name.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return DEFAULT_PLAYER_NAME.to_string();
    }
    trimmed.chars().take(MAX_NAME_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> String {
        "2024-01-01".to_string()
    }

    #[test]
    fn insert_sorts_descending_and_truncates() {
        let mut table = HighScoreTable::in_memory();
        for score in [300, 100, 900, 500, 700, 200, 800, 400, 600, 1000, 50] {
            table.insert(score, Some("x"), date());
        }
        let scores: Vec<u32> = table.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![1000, 900, 800, 700, 600, 500, 400, 300, 200, 100]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut table = HighScoreTable::in_memory();
        table.insert(500, Some("first"), date());
        table.insert(500, Some("second"), date());
        assert_eq!(table.entries()[0].name, "first");
        assert_eq!(table.entries()[1].name, "second");
    }

    #[test]
    fn names_default_and_cap() {
        assert_eq!(sanitize_name(None), "Player");
        assert_eq!(sanitize_name(Some("   ")), "Player");
        assert_eq!(sanitize_name(Some(" ada ")), "ada");
        assert_eq!(sanitize_name(Some("abcdefghijklmnop")), "abcdefghijkl");
    }

    #[test]
    fn in_memory_save_is_noop() {
        let table = HighScoreTable::in_memory();
        assert!(table.path().is_none());
        assert!(table.save().is_ok());
    }

    #[test]
    fn top_is_bounded() {
        let mut table = HighScoreTable::in_memory();
        table.insert(1, None, date());
        assert_eq!(table.top(5).len(), 1);
    }

    #[test]
    fn record_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SCORES_FILE_NAME);

        let mut table = HighScoreTable::load(&path);
        assert!(table.entries().is_empty());
        table.record_score(420, Some("ada"));
        table.record_score(99, None);
        assert!(path.exists());

        let reloaded = HighScoreTable::load(&path);
        assert_eq!(reloaded.entries().len(), 2);
        assert_eq!(reloaded.entries()[0].score, 420);
        assert_eq!(reloaded.entries()[0].name, "ada");
        assert_eq!(reloaded.entries()[1].name, "Player");
        assert_eq!(reloaded.entries()[0].date.len(), 10);
    }
}
