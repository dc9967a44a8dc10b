use std::fmt;

use serde::Serialize;

use crate::{RoundResult, format_compact};

/// Heading of a row in the session summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RoundTitle {
    Numbered(u32),
    /// The last recorded round.
    Final,
}

impl fmt::Display for RoundTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numbered(id) => write!(f, "Round {id}"),
            Self::Final => f.write_str("Final Round"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRow {
    pub result: RoundResult,
    pub title: RoundTitle,
    /// Duration relative to the longest round, in `0.0..=1.0`.
    pub ratio: f64,
}

impl SummaryRow {
    /// Duration as `m:ss`.
    #[must_use]
    pub fn formatted_duration(&self) -> String {
        format_compact(self.result.duration_seconds())
    }
}

/// Aggregates of a finished session, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    rows: Vec<SummaryRow>,
    total_seconds: u64,
}

impl SessionSummary {
    /// Summarizes the recorded rounds of a session.
    ///
    /// Returns `None` for an empty history; there is nothing to show and the
    /// caller goes back to setup.
    #[must_use]
    pub fn new(rounds: &[RoundResult]) -> Option<Self> {
        let last = rounds.len().checked_sub(1)?;
        let longest = rounds
            .iter()
            .map(RoundResult::duration_seconds)
            .max()
            .unwrap_or(0)
            .max(1);
        let rows = rounds
            .iter()
            .enumerate()
            .map(|(index, result)| SummaryRow {
                result: *result,
                title: if index == last {
                    RoundTitle::Final
                } else {
                    RoundTitle::Numbered(result.id())
                },
                ratio: (f64::from(result.duration_seconds()) / f64::from(longest)).min(1.0),
            })
            .collect();
        let total_seconds = rounds
            .iter()
            .map(|round| u64::from(round.duration_seconds()))
            .sum();
        Some(Self {
            rows,
            total_seconds,
        })
    }

    #[must_use]
    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    #[must_use]
    pub const fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    /// Total as whole minutes and the remaining seconds.
    #[must_use]
    pub const fn total_minutes_seconds(&self) -> (u64, u64) {
        (self.total_seconds / 60, self.total_seconds % 60)
    }

    /// Rows in their exported form.
    pub fn entries(&self) -> impl Iterator<Item = SummaryEntry> + '_ {
        self.rows.iter().map(|row| SummaryEntry {
            title: row.title.to_string(),
            result: row.result,
        })
    }
}

/// Serialized form of one round in a summary export.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryEntry {
    pub title: String,
    #[serde(flatten)]
    pub result: RoundResult,
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::EndReason;

    fn round(id: u32, seconds: u32, reason: EndReason) -> RoundResult {
        RoundResult::new(id, seconds, DateTime::UNIX_EPOCH, reason)
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(SessionSummary::new(&[]), None);
    }

    #[test]
    fn test_totals_and_titles() {
        let rounds = [
            round(1, 300, EndReason::Complete),
            round(2, 300, EndReason::Ended),
            round(3, 300, EndReason::Complete),
        ];
        let summary = SessionSummary::new(&rounds).unwrap();
        assert_eq!(summary.total_seconds(), 900);
        assert_eq!(summary.total_minutes_seconds(), (15, 0));

        let titles: Vec<_> = summary.rows().iter().map(|row| row.title.to_string()).collect();
        assert_eq!(titles, ["Round 1", "Round 2", "Final Round"]);
        assert!(summary.rows().iter().all(|row| (row.ratio - 1.0).abs() < f64::EPSILON));
        assert_eq!(summary.rows()[0].formatted_duration(), "5:00");
    }

    #[test]
    fn test_single_round_is_final() {
        let summary = SessionSummary::new(&[round(1, 65, EndReason::Ended)]).unwrap();
        assert_eq!(summary.rows()[0].title, RoundTitle::Final);
        assert_eq!(summary.total_minutes_seconds(), (1, 5));
    }

    #[test]
    fn test_ratio_against_longest() {
        let rounds = [round(1, 60, EndReason::Complete), round(2, 120, EndReason::Complete)];
        let summary = SessionSummary::new(&rounds).unwrap();
        assert!((summary.rows()[0].ratio - 0.5).abs() < 1e-9);
        assert!((summary.rows()[1].ratio - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_length_rounds_do_not_divide_by_zero() {
        let summary = SessionSummary::new(&[round(1, 0, EndReason::Ended)]).unwrap();
        assert!(summary.rows()[0].ratio.abs() < f64::EPSILON);
    }

    #[test]
    fn test_entries_carry_titles() {
        let rounds = [round(1, 60, EndReason::Complete), round(2, 60, EndReason::Ended)];
        let summary = SessionSummary::new(&rounds).unwrap();
        let json = serde_json::to_value(summary.entries().collect::<Vec<_>>()).unwrap();
        assert_eq!(json[0]["title"], "Round 1");
        assert_eq!(json[1]["title"], "Final Round");
        assert_eq!(json[1]["reason"], "ended");
        assert_eq!(json[1]["id"], 2);
    }
}
