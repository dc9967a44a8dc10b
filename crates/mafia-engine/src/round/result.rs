use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a recorded round came to an end.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    /// The round timer ran out.
    #[display("complete")]
    Complete,
    /// The operator ended the round early.
    #[display("ended")]
    Ended,
}

/// Immutable record of one finished round.
///
/// `duration_seconds` is the configured round length, also for rounds that
/// were ended early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    id: u32,
    duration_seconds: u32,
    ended_at: DateTime<Utc>,
    reason: EndReason,
}

impl RoundResult {
    pub(crate) const fn new(
        id: u32,
        duration_seconds: u32,
        ended_at: DateTime<Utc>,
        reason: EndReason,
    ) -> Self {
        Self {
            id,
            duration_seconds,
            ended_at,
            reason,
        }
    }

    /// 1-based position in the session.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    #[must_use]
    pub const fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    #[must_use]
    pub const fn ended_at(&self) -> DateTime<Utc> {
        self.ended_at
    }

    #[must_use]
    pub const fn reason(&self) -> EndReason {
        self.reason
    }
}
