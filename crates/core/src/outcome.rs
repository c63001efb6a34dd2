//! Round outcomes and the persistence hook they are delivered to.

use crate::types::GameStatus;

/// How a round ended, captured at the moment of the transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// `GameOver` or `Won`
    pub status: GameStatus,
    pub score: u32,
    /// Round the outcome belongs to (increments on restart)
    pub round_id: u32,
}

impl Outcome {
    /// Won rounds ask the player for a name before recording.
    pub fn wants_player_name(&self) -> bool {
        self.status == GameStatus::Won
    }
}

/// External collaborator that stores finished rounds.
///
/// Implementations must return promptly and must not surface storage failures to the
/// player; recover locally instead.
pub trait ScoreRecorder {
    fn record_score(&mut self, score: u32, player_name: Option<&str>);
}

/// Recorder that keeps results in memory, in call order.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecorder {
    pub records: Vec<(u32, Option<String>)>,
}

impl ScoreRecorder for MemoryRecorder {
    fn record_score(&mut self, score: u32, player_name: Option<&str>) {
        self.records.push((score, player_name.map(str::to_owned)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_wins_prompt_for_a_name() {
        let won = Outcome {
            status: GameStatus::Won,
            score: 1200,
            round_id: 0,
        };
        let lost = Outcome {
            status: GameStatus::GameOver,
            ..won
        };
        assert!(won.wants_player_name());
        assert!(!lost.wants_player_name());
    }

    #[test]
    fn memory_recorder_keeps_order() {
        let mut rec = MemoryRecorder::default();
        rec.record_score(10, None);
        rec.record_score(20, Some("ada"));
        assert_eq!(
            rec.records,
            vec![(10, None), (20, Some("ada".to_string()))]
        );
    }
}
