use serde::Serialize;

use crate::{RoundDuration, RoundError, ValidatedConfig, format_clock};

use super::{
    Clock, Countdown, EndReason, RoundLimit, RoundResult, SystemClock, TimerToken,
    timer::FinishLatch,
};

/// Preparatory countdown before each round, in seconds.
pub const READY_SECONDS: u32 = 10;

/// Lifecycle phase of the current round.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    /// Preparatory countdown; round time is not consumed yet.
    #[display("ready")]
    Ready,
    #[display("running")]
    Running,
    /// Round time exhausted or ended early.
    #[display("finished")]
    Finished,
}

impl RoundPhase {
    /// Short label shown above the clock.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ready => "Get Ready",
            Self::Running => "Current Phase",
            Self::Finished => "Round Complete",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Ready => "Starting soon",
            Self::Running | Self::Finished => "Argument",
        }
    }
}

/// What a timer tick did to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The token did not belong to the armed timer.
    Ignored,
    /// One second was taken off the active countdown.
    Counted,
    /// The ready countdown ran out and the round began.
    RoundStarted,
    /// The round timer ran out. Carries the recorded result, if the round
    /// was still under the limit.
    RoundFinished(Option<RoundResult>),
}

/// State machine for the timed rounds of one session.
///
/// Time only moves through [`RoundController::tick`], fed with the token of
/// the timer armed for the current phase. Every transition arms a fresh
/// token, so ticks from a timer that belonged to an earlier phase are
/// ignored. The clock is only consulted to stamp finished rounds.
#[derive(Debug)]
pub struct RoundController<C = SystemClock> {
    round_duration: RoundDuration,
    ready_seconds: u32,
    max_rounds: u32,
    phase: RoundPhase,
    ready_remaining: u32,
    remaining: u32,
    rounds: Vec<RoundResult>,
    latch: FinishLatch,
    generation: u64,
    clock: C,
}

impl<C> RoundController<C>
where
    C: Clock,
{
    /// Creates a controller in the ready phase of round 1.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::MissingRoundDuration`] if no duration was
    /// configured or it is zero seconds long.
    pub fn new(
        round_duration: Option<RoundDuration>,
        max_rounds: u32,
        clock: C,
    ) -> Result<Self, RoundError> {
        let round_duration = round_duration
            .filter(|duration| duration.as_secs() > 0)
            .ok_or(RoundError::MissingRoundDuration)?;
        let ready_seconds = READY_SECONDS;
        tracing::debug!(
            round_seconds = round_duration.as_secs(),
            max_rounds,
            "round controller created"
        );
        Ok(Self {
            round_duration,
            ready_seconds,
            max_rounds,
            phase: RoundPhase::Ready,
            ready_remaining: ready_seconds,
            remaining: round_duration.as_secs(),
            rounds: vec![],
            latch: FinishLatch::default(),
            generation: 0,
            clock,
        })
    }

    /// Creates a controller for a validated setup, deriving the round limit
    /// from its player and mafia counts.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::MissingRoundDuration`] if the setup carries no
    /// round duration.
    pub fn for_config(
        config: &ValidatedConfig,
        limit: RoundLimit,
        clock: C,
    ) -> Result<Self, RoundError> {
        let max_rounds = limit.max_rounds(config.players(), config.mafia());
        Self::new(config.round_duration(), max_rounds, clock)
    }

    /// Replaces the preparatory countdown length (at least one second).
    ///
    /// Takes effect immediately if the controller is in the ready phase.
    #[must_use]
    pub fn with_ready_seconds(mut self, seconds: u32) -> Self {
        self.ready_seconds = seconds.max(1);
        if self.phase.is_ready() {
            self.ready_remaining = self.ready_seconds;
        }
        self
    }

    #[must_use]
    pub const fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[must_use]
    pub const fn round_duration(&self) -> RoundDuration {
        self.round_duration
    }

    #[must_use]
    pub const fn ready_seconds(&self) -> u32 {
        self.ready_seconds
    }

    #[must_use]
    pub const fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    #[must_use]
    pub const fn ready_remaining(&self) -> u32 {
        self.ready_remaining
    }

    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Recorded rounds, oldest first. Ids are 1, 2, 3, ...
    #[must_use]
    pub fn rounds(&self) -> &[RoundResult] {
        &self.rounds
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Timer the runtime should be running for the current phase.
    ///
    /// `None` while finished: nothing counts down until the operator acts.
    #[must_use]
    pub const fn armed_timer(&self) -> Option<TimerToken> {
        match self.phase {
            RoundPhase::Ready => Some(TimerToken::new(self.generation, Countdown::Ready)),
            RoundPhase::Running => Some(TimerToken::new(self.generation, Countdown::Round)),
            RoundPhase::Finished => None,
        }
    }

    /// Applies one elapsed second from the timer identified by `token`.
    pub fn tick(&mut self, token: TimerToken) -> TickOutcome {
        if self.armed_timer() != Some(token) {
            tracing::trace!(?token, "stale tick ignored");
            return TickOutcome::Ignored;
        }
        match self.phase {
            RoundPhase::Ready => {
                self.ready_remaining = self.ready_remaining.saturating_sub(1);
                if self.ready_remaining > 0 {
                    return TickOutcome::Counted;
                }
                self.enter_running();
                TickOutcome::RoundStarted
            }
            RoundPhase::Running => {
                self.remaining = self.remaining.saturating_sub(1);
                if self.remaining > 0 {
                    return TickOutcome::Counted;
                }
                match self.finish(EndReason::Complete) {
                    Ok(result) => TickOutcome::RoundFinished(result),
                    Err(_) => TickOutcome::Ignored,
                }
            }
            RoundPhase::Finished => TickOutcome::Ignored,
        }
    }

    /// Skips the rest of the ready countdown and starts the round.
    ///
    /// # Errors
    ///
    /// - [`RoundError::WrongPhase`] outside the ready phase.
    /// - [`RoundError::RoundLimitReached`] when every allowed round has been
    ///   recorded.
    pub fn start_early(&mut self) -> Result<(), RoundError> {
        self.expect_phase(RoundPhase::Ready)?;
        self.check_under_limit()?;
        self.ready_remaining = 0;
        self.remaining = self.round_duration.as_secs();
        self.enter_running();
        Ok(())
    }

    /// Ends the running round before its timer runs out.
    ///
    /// Returns the recorded result, or `None` if the round limit was already
    /// reached and the round does not count.
    ///
    /// # Errors
    ///
    /// - [`RoundError::AlreadyFinished`] if this round already finished.
    /// - [`RoundError::WrongPhase`] during the ready countdown.
    pub fn end_early(&mut self) -> Result<Option<RoundResult>, RoundError> {
        match self.phase {
            RoundPhase::Running => self.finish(EndReason::Ended),
            RoundPhase::Finished => Err(RoundError::AlreadyFinished),
            RoundPhase::Ready => Err(RoundError::WrongPhase {
                expected: RoundPhase::Running,
                actual: RoundPhase::Ready,
            }),
        }
    }

    /// Moves from a finished round to the ready countdown of the next one.
    ///
    /// # Errors
    ///
    /// - [`RoundError::WrongPhase`] unless the current round is finished.
    /// - [`RoundError::RoundLimitReached`] when no more rounds are allowed.
    pub fn next_round(&mut self) -> Result<(), RoundError> {
        self.expect_phase(RoundPhase::Finished)?;
        self.check_under_limit()?;
        self.enter_ready();
        Ok(())
    }

    /// Drops the history and goes back to the ready countdown of round 1.
    pub fn restart(&mut self) {
        tracing::debug!(
            from = %self.phase,
            dropped_rounds = self.rounds.len(),
            "session restarted"
        );
        self.rounds.clear();
        self.enter_ready();
    }

    /// Ready countdown as `mm:ss`.
    #[must_use]
    pub fn formatted_ready(&self) -> String {
        format_clock(self.ready_remaining)
    }

    /// Remaining round time as `mm:ss`.
    #[must_use]
    pub fn formatted_remaining(&self) -> String {
        format_clock(self.remaining)
    }

    /// Share of the round time used, from 0.0 to 1.0 (always 0.0 while ready).
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.phase.is_ready() {
            return 0.0;
        }
        let total = f64::from(self.round_duration.as_secs());
        1.0 - f64::from(self.remaining) / total
    }

    /// 1-based number of the round on screen.
    ///
    /// Capped at the round limit when there is one. Without a limit it is
    /// always one past the recorded rounds, whatever the phase.
    #[must_use]
    pub fn current_round(&self) -> u32 {
        let recorded = self.recorded_rounds();
        if self.max_rounds == 0 {
            return recorded.saturating_add(1);
        }
        let base = if self.phase.is_finished() {
            recorded
        } else {
            recorded.saturating_add(1)
        };
        base.min(self.max_rounds)
    }

    /// `true` once a positive round limit has been filled.
    #[must_use]
    pub fn rounds_cap_reached(&self) -> bool {
        self.max_rounds > 0 && self.recorded_rounds() >= self.max_rounds
    }

    #[must_use]
    pub fn can_start_early(&self) -> bool {
        self.phase.is_ready() && self.is_under_limit()
    }

    #[must_use]
    pub fn can_end_early(&self) -> bool {
        self.phase.is_running() && !self.rounds_cap_reached()
    }

    #[must_use]
    pub fn can_start_next_round(&self) -> bool {
        self.phase.is_finished() && self.is_under_limit()
    }

    /// Sum of the recorded round durations, in seconds.
    #[must_use]
    pub fn total_seconds(&self) -> u64 {
        self.rounds
            .iter()
            .map(|round| u64::from(round.duration_seconds()))
            .sum()
    }

    fn recorded_rounds(&self) -> u32 {
        u32::try_from(self.rounds.len()).unwrap_or(u32::MAX)
    }

    fn is_under_limit(&self) -> bool {
        self.recorded_rounds() < self.max_rounds
    }

    fn expect_phase(&self, expected: RoundPhase) -> Result<(), RoundError> {
        if self.phase == expected {
            return Ok(());
        }
        Err(RoundError::WrongPhase {
            expected,
            actual: self.phase,
        })
    }

    fn check_under_limit(&self) -> Result<(), RoundError> {
        if self.is_under_limit() {
            return Ok(());
        }
        Err(RoundError::RoundLimitReached {
            max_rounds: self.max_rounds,
        })
    }

    fn finish(&mut self, reason: EndReason) -> Result<Option<RoundResult>, RoundError> {
        if !self.latch.try_close() {
            return Err(RoundError::AlreadyFinished);
        }
        self.phase = RoundPhase::Finished;
        self.remaining = 0;
        self.generation += 1;

        if !self.is_under_limit() {
            tracing::debug!(%reason, max_rounds = self.max_rounds, "round over limit, not recorded");
            return Ok(None);
        }
        let result = RoundResult::new(
            self.recorded_rounds() + 1,
            self.round_duration.as_secs(),
            self.clock.now(),
            reason,
        );
        self.rounds.push(result);
        tracing::info!(
            round = result.id(),
            %reason,
            duration_seconds = result.duration_seconds(),
            "round recorded"
        );
        Ok(Some(result))
    }

    fn enter_running(&mut self) {
        self.phase = RoundPhase::Running;
        self.generation += 1;
        tracing::debug!(round = self.current_round(), "round running");
    }

    fn enter_ready(&mut self) {
        self.phase = RoundPhase::Ready;
        self.ready_remaining = self.ready_seconds;
        self.remaining = self.round_duration.as_secs();
        self.latch.rearm();
        self.generation += 1;
        tracing::debug!(round = self.current_round(), "round ready");
    }
}
