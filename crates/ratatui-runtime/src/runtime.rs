use std::{io, time::Duration};

use crate::{
    App, TimerId,
    event::TuiEvent,
    event_loop::{EventLoop, RenderMode},
};

/// Terminal runtime driving an [`App`].
///
/// Owns the terminal event loop and the interval timers armed by the app.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a timer firing every `interval` until canceled.
    ///
    /// Each firing is delivered to [`App::on_timer`] with the returned id.
    pub fn arm_timer(&mut self, interval: Duration) -> TimerId {
        let id = self.events.arm_timer(interval);
        tracing::trace!(?id, ?interval, "timer armed");
        id
    }

    /// Cancels a timer. It is dropped from the schedule immediately, so no
    /// firing of it is delivered after this call.
    ///
    /// Returns `false` if the timer was not armed.
    pub fn cancel_timer(&mut self, id: TimerId) -> bool {
        let canceled = self.events.cancel_timer(id);
        tracing::trace!(?id, canceled, "timer canceled");
        canceled
    }

    pub fn cancel_all_timers(&mut self) {
        self.events.cancel_all_timers();
    }

    #[must_use]
    pub fn is_timer_armed(&self, id: TimerId) -> bool {
        self.events.is_timer_armed(id)
    }

    #[must_use]
    pub fn armed_timer_count(&self) -> usize {
        self.events.armed_timer_count()
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Runs `app` until it asks to exit.
    ///
    /// Calls [`App::init`] once, then dispatches every event: timer firings
    /// to [`App::on_timer`], redraws to [`App::draw`] and terminal events to
    /// [`App::handle_event`].
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    TuiEvent::Timer(id) => app.on_timer(&mut self, id),
                    TuiEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    TuiEvent::Crossterm(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
