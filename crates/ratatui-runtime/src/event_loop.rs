use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::{
    TimerId,
    event::TuiEvent,
    timer::Timers,
};

/// When the screen is redrawn.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Redraw at a fixed interval, changed or not.
    Interval(Duration),
    /// Redraw after every timer or terminal event.
    #[default]
    OnDirty,
    /// Like `OnDirty`, but at most once per interval.
    ///
    /// Events arriving faster than the interval share one redraw.
    Throttled(Duration),
}

impl RenderMode {
    /// `Interval` mode for a frame rate in FPS.
    #[must_use]
    pub fn interval_from_rate(rate: f64) -> Self {
        Self::Interval(Duration::from_secs_f64(1.0 / rate))
    }

    /// `Throttled` mode for a frame rate in FPS.
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Waits for the next due timer, redraw or terminal event.
#[derive(Debug)]
pub(super) struct EventLoop {
    timers: Timers,
    render_mode: RenderMode,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        let long_ago = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            timers: Timers::default(),
            render_mode: RenderMode::default(),
            last_render: long_ago,
            // first frame
            dirty: true,
        }
    }

    pub(super) fn arm_timer(&mut self, interval: Duration) -> TimerId {
        self.timers.arm(interval, Instant::now())
    }

    pub(super) fn cancel_timer(&mut self, id: TimerId) -> bool {
        self.timers.cancel(id)
    }

    pub(super) fn cancel_all_timers(&mut self) {
        self.timers.cancel_all();
    }

    pub(super) fn is_timer_armed(&self, id: TimerId) -> bool {
        self.timers.is_armed(id)
    }

    pub(super) fn armed_timer_count(&self) -> usize {
        self.timers.len()
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Blocks until something happens.
    ///
    /// Due timers come first, then redraws, then terminal input. Without
    /// armed timers or pending redraws this waits for terminal input only.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(id) = self.timers.pop_due(now) {
                self.dirty = true;
                return Ok(TuiEvent::Timer(id));
            }

            let render_due = match self.render_mode {
                RenderMode::Interval(interval) => now.duration_since(self.last_render) >= interval,
                RenderMode::OnDirty => self.dirty,
                RenderMode::Throttled(interval) => {
                    self.dirty && now.duration_since(self.last_render) >= interval
                }
            };
            if render_due {
                self.last_render = now;
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn timeout(&self, now: Instant) -> Option<Duration> {
        let render_at = match self.render_mode {
            RenderMode::Interval(interval) => Some(self.last_render + interval),
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let wake_at = [self.timers.next_deadline(), render_at]
            .into_iter()
            .flatten()
            .min()?;
        Some(wake_at.saturating_duration_since(now))
    }
}
