/// Which countdown a timer drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Countdown {
    /// Preparatory countdown before a round.
    Ready,
    /// The round itself.
    Round,
}

/// Identifies the timer armed for one phase of one round.
///
/// Every phase change arms a new generation, so a tick carrying an older
/// token belongs to a canceled timer and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    generation: u64,
    countdown: Countdown,
}

impl TimerToken {
    pub(super) const fn new(generation: u64, countdown: Countdown) -> Self {
        Self {
            generation,
            countdown,
        }
    }

    #[must_use]
    pub const fn countdown(&self) -> Countdown {
        self.countdown
    }
}

/// Single-use guard letting one finish through per round.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct FinishLatch {
    closed: bool,
}

impl FinishLatch {
    /// Closes the latch; returns `false` if it was already closed.
    pub(super) fn try_close(&mut self) -> bool {
        !std::mem::replace(&mut self.closed, true)
    }

    pub(super) fn rearm(&mut self) {
        self.closed = false;
    }

    pub(super) const fn is_closed(self) -> bool {
        self.closed
    }
}
