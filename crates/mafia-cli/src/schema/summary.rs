use chrono::{DateTime, Utc};
use mafia_engine::{DealSeed, SessionSummary, SummaryEntry, ValidatedConfig};
use serde::Serialize;

/// Exported summary of one finished session.
#[derive(Debug, Clone, Serialize)]
pub struct RecordedSummary {
    /// When the summary was shown (ISO 8601)
    pub recorded_at: DateTime<Utc>,
    /// Seed of the deal the rounds were played with
    pub seed: DealSeed,
    pub config: ValidatedConfig,
    pub max_rounds: u32,
    /// Sum of the recorded round durations in seconds
    pub total_seconds: u64,
    pub rounds: Vec<SummaryEntry>,
}

impl RecordedSummary {
    pub fn new(
        recorded_at: DateTime<Utc>,
        seed: DealSeed,
        config: ValidatedConfig,
        max_rounds: u32,
        summary: &SessionSummary,
    ) -> Self {
        Self {
            recorded_at,
            seed,
            config,
            max_rounds,
            total_seconds: summary.total_seconds(),
            rounds: summary.entries().collect(),
        }
    }

    /// File name for the export, unique per second.
    pub fn file_name(&self) -> String {
        format!("summary_{}.json", self.recorded_at.format("%Y%m%d_%H%M%S"))
    }
}

#[cfg(test)]
mod tests {
    use mafia_engine::{ManualClock, RoundController, SessionConfig, SpecialRoles};

    use super::*;

    #[test]
    fn test_export_shape() {
        let config = SessionConfig {
            player_count: 5,
            mafia_count: 1,
            special_roles: SpecialRoles::NONE,
            round_minutes: Some(2),
        }
        .validate()
        .unwrap();
        let mut rounds = RoundController::new(config.round_duration(), 4, ManualClock::at_epoch())
            .unwrap();
        rounds.start_early().unwrap();
        rounds.end_early().unwrap();
        let summary = SessionSummary::new(rounds.rounds()).unwrap();

        let seed = "0000000000000000000000000000002a".parse().unwrap();
        let recorded = RecordedSummary::new(DateTime::UNIX_EPOCH, seed, config, 4, &summary);
        assert_eq!(recorded.file_name(), "summary_19700101_000000.json");

        let json = serde_json::to_value(&recorded).unwrap();
        assert_eq!(json["seed"], "0000000000000000000000000000002a");
        assert_eq!(json["config"]["players"], 5);
        assert_eq!(json["total_seconds"], 120);
        assert_eq!(json["rounds"][0]["title"], "Final Round");
        assert_eq!(json["rounds"][0]["reason"], "ended");
    }
}
