use std::time::{Duration, Instant};

/// Handle of an interval timer armed on the [`Runtime`](crate::Runtime).
///
/// Ids are never reused within one runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry {
    id: TimerId,
    interval: Duration,
    next_at: Instant,
}

/// Schedule of armed interval timers.
///
/// A canceled timer is removed from the schedule on the spot, so it can
/// never be returned by [`Timers::pop_due`] afterwards.
#[derive(Debug, Default)]
pub(super) struct Timers {
    last_id: u64,
    entries: Vec<Entry>,
}

impl Timers {
    const MIN_INTERVAL: Duration = Duration::from_millis(1);

    /// Arms a timer firing every `interval`, first at `now + interval`.
    pub(super) fn arm(&mut self, interval: Duration, now: Instant) -> TimerId {
        self.last_id += 1;
        let id = TimerId(self.last_id);
        let interval = interval.max(Self::MIN_INTERVAL);
        self.entries.push(Entry {
            id,
            interval,
            next_at: now + interval,
        });
        id
    }

    /// Removes a timer; returns `false` if it was not armed.
    pub(super) fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub(super) fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub(super) fn is_armed(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(super) fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.next_at).min()
    }

    /// Returns the most overdue timer and schedules its next firing.
    ///
    /// A timer that fell behind by several intervals fires once per call
    /// until it has caught up, so no elapsed interval is lost.
    pub(super) fn pop_due(&mut self, now: Instant) -> Option<TimerId> {
        let entry = self
            .entries
            .iter_mut()
            .filter(|entry| entry.next_at <= now)
            .min_by_key(|entry| entry.next_at)?;
        entry.next_at += entry.interval;
        Some(entry.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_fires_after_interval() {
        let start = Instant::now();
        let mut timers = Timers::default();
        let id = timers.arm(SECOND, start);

        assert_eq!(timers.pop_due(start), None);
        assert_eq!(timers.next_deadline(), Some(start + SECOND));
        assert_eq!(timers.pop_due(start + SECOND), Some(id));
        assert_eq!(timers.pop_due(start + SECOND), None);
        assert_eq!(timers.next_deadline(), Some(start + 2 * SECOND));
    }

    #[test]
    fn test_canceled_timer_never_fires() {
        let start = Instant::now();
        let mut timers = Timers::default();
        let id = timers.arm(SECOND, start);

        assert!(timers.cancel(id));
        assert!(!timers.is_armed(id));
        assert_eq!(timers.pop_due(start + 10 * SECOND), None);
        assert_eq!(timers.next_deadline(), None);
        assert!(!timers.cancel(id));
    }

    #[test]
    fn test_overdue_timer_catches_up() {
        let start = Instant::now();
        let mut timers = Timers::default();
        let id = timers.arm(SECOND, start);

        let late = start + 3 * SECOND;
        let fired: Vec<_> = std::iter::from_fn(|| timers.pop_due(late)).collect();
        assert_eq!(fired, [id, id, id]);
    }

    #[test]
    fn test_most_overdue_fires_first() {
        let start = Instant::now();
        let mut timers = Timers::default();
        let slow = timers.arm(3 * SECOND, start);
        let fast = timers.arm(SECOND, start);

        let now = start + 3 * SECOND;
        assert_eq!(timers.pop_due(now), Some(fast));
        assert_eq!(timers.pop_due(now), Some(fast));
        // Both due at +3s: the earlier armed entry wins the tie.
        assert_eq!(timers.pop_due(now), Some(slow));
        assert_eq!(timers.pop_due(now), Some(fast));
        assert_eq!(timers.pop_due(now), None);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let start = Instant::now();
        let mut timers = Timers::default();
        let first = timers.arm(SECOND, start);
        timers.cancel_all();
        let second = timers.arm(SECOND, start);
        assert_ne!(first, second);
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let start = Instant::now();
        let mut timers = Timers::default();
        timers.arm(Duration::ZERO, start);
        assert_eq!(timers.next_deadline(), Some(start + Timers::MIN_INTERVAL));
    }
}
