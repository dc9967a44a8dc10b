use std::fmt;

use crossterm::event::Event;
use ratatui::Frame;

use crate::{App, Runtime, TimerId};

/// One screen of a [`ScreenStack`].
///
/// Only the top screen of the stack receives events and timer firings and
/// is drawn.
///
/// # Lifecycle
///
/// ```text
/// push / replace / start
///   ↓
/// on_active() ←───────────┐
///   ↓                     │ screen above pops
/// (top of stack)          │
///   ↓                     │
/// on_inactive() ──────────┘ screen pushed above
///   ↓
/// on_close()     pop / replace / exit
/// ```
///
/// Timers armed on the [`Runtime`] belong to the runtime, not the screen.
/// A screen that arms timers in [`on_active`] should cancel them in
/// [`on_inactive`], otherwise their firings go to whichever screen is on top.
///
/// ```rust
/// use std::time::Duration;
///
/// use crossterm::event::Event;
/// use ratatui::Frame;
/// use ratatui_runtime::{Runtime, Screen, ScreenTransition, TimerId};
///
/// #[derive(Debug, Default)]
/// struct Stopwatch {
///     timer: Option<TimerId>,
///     seconds: u64,
/// }
///
/// impl Screen for Stopwatch {
///     fn on_active(&mut self, runtime: &mut Runtime) {
///         self.timer = Some(runtime.arm_timer(Duration::from_secs(1)));
///     }
///
///     fn on_inactive(&mut self, runtime: &mut Runtime) {
///         if let Some(timer) = self.timer.take() {
///             runtime.cancel_timer(timer);
///         }
///     }
///
///     fn on_close(&mut self, _runtime: &mut Runtime) {}
///
///     fn handle_event(&mut self, _runtime: &mut Runtime, _event: &Event) -> ScreenTransition {
///         ScreenTransition::Stay
///     }
///
///     fn on_timer(&mut self, _runtime: &mut Runtime, _timer: TimerId) -> ScreenTransition {
///         self.seconds += 1;
///         ScreenTransition::Stay
///     }
///
///     fn draw(&self, _frame: &mut Frame) {}
/// }
/// ```
///
/// [`on_active`]: Self::on_active
/// [`on_inactive`]: Self::on_inactive
pub trait Screen: fmt::Debug {
    /// The screen reached the top of the stack: on start, when pushed or
    /// replacing another, and when the screen above it pops.
    fn on_active(&mut self, runtime: &mut Runtime);

    /// The screen left the top of the stack, either covered by a pushed
    /// screen or on its way out (then [`on_close`](Self::on_close) follows).
    fn on_inactive(&mut self, runtime: &mut Runtime);

    /// The screen is removed from the stack for good.
    fn on_close(&mut self, runtime: &mut Runtime);

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition;

    /// A timer fired while this screen was on top.
    fn on_timer(&mut self, runtime: &mut Runtime, timer: TimerId) -> ScreenTransition;

    fn draw(&self, frame: &mut Frame);
}

/// What the stack does after a screen handled an event or a timer.
#[derive(Debug)]
pub enum ScreenTransition {
    Stay,
    /// Cover the current screen with a new one.
    Push(Box<dyn Screen>),
    /// Close the current screen and reactivate the one below.
    Pop,
    /// Close the current screen and activate a new one in its place.
    Replace(Box<dyn Screen>),
    /// Close every screen and stop the runtime.
    Exit,
}

/// Stack of screens, run as an [`App`].
#[derive(Debug)]
pub struct ScreenStack<'a> {
    screens: Vec<Box<dyn Screen + 'a>>,
    should_exit: bool,
}

impl<'a> ScreenStack<'a> {
    #[must_use]
    pub fn new(initial: Box<dyn Screen + 'a>) -> Self {
        Self {
            screens: vec![initial],
            should_exit: false,
        }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    fn close_top(&mut self, runtime: &mut Runtime) {
        if let Some(mut screen) = self.screens.pop() {
            screen.on_inactive(runtime);
            screen.on_close(runtime);
        }
    }

    fn apply(&mut self, runtime: &mut Runtime, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Push(mut screen) => {
                if let Some(top) = self.screens.last_mut() {
                    top.on_inactive(runtime);
                }
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Pop => {
                self.close_top(runtime);
                if let Some(top) = self.screens.last_mut() {
                    top.on_active(runtime);
                }
            }
            ScreenTransition::Replace(mut screen) => {
                self.close_top(runtime);
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Exit => {
                while !self.screens.is_empty() {
                    self.close_top(runtime);
                }
                self.should_exit = true;
            }
        }
    }
}

impl App for ScreenStack<'_> {
    fn init(&mut self, runtime: &mut Runtime) {
        if let Some(top) = self.screens.last_mut() {
            top.on_active(runtime);
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        if let Some(top) = self.screens.last_mut() {
            let transition = top.handle_event(runtime, &event);
            self.apply(runtime, transition);
        }
    }

    fn on_timer(&mut self, runtime: &mut Runtime, timer: TimerId) {
        if let Some(top) = self.screens.last_mut() {
            let transition = top.on_timer(runtime, timer);
            self.apply(runtime, transition);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(top) = self.screens.last() {
            top.draw(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::VecDeque, rc::Rc, time::Duration};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    /// Shared record of the calls made on probe screens and the timers they armed.
    #[derive(Debug, Clone, Default)]
    struct Journal {
        calls: Rc<RefCell<Vec<String>>>,
        timers: Rc<RefCell<Vec<TimerId>>>,
    }

    impl Journal {
        fn note(&self, name: &str, call: &str) {
            self.calls.borrow_mut().push(format!("{name}.{call}"));
        }

        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.calls.borrow_mut())
        }

        fn timer(&self, index: usize) -> TimerId {
            self.timers.borrow()[index]
        }
    }

    /// Screen that answers with scripted transitions and arms one timer
    /// while it is on top.
    #[derive(Debug)]
    struct Probe {
        name: &'static str,
        journal: Journal,
        script: VecDeque<ScreenTransition>,
        timer: Option<TimerId>,
    }

    impl Probe {
        fn new(name: &'static str, journal: &Journal) -> Self {
            Self {
                name,
                journal: journal.clone(),
                script: VecDeque::new(),
                timer: None,
            }
        }

        fn then(mut self, transition: ScreenTransition) -> Self {
            self.script.push_back(transition);
            self
        }

        fn next_transition(&mut self) -> ScreenTransition {
            self.script.pop_front().unwrap_or(ScreenTransition::Stay)
        }
    }

    impl Screen for Probe {
        fn on_active(&mut self, runtime: &mut Runtime) {
            self.journal.note(self.name, "active");
            let timer = runtime.arm_timer(Duration::from_secs(1));
            self.journal.timers.borrow_mut().push(timer);
            self.timer = Some(timer);
        }

        fn on_inactive(&mut self, runtime: &mut Runtime) {
            self.journal.note(self.name, "inactive");
            if let Some(timer) = self.timer.take() {
                runtime.cancel_timer(timer);
            }
        }

        fn on_close(&mut self, _runtime: &mut Runtime) {
            self.journal.note(self.name, "close");
        }

        fn handle_event(&mut self, _runtime: &mut Runtime, _event: &Event) -> ScreenTransition {
            self.journal.note(self.name, "event");
            self.next_transition()
        }

        fn on_timer(&mut self, _runtime: &mut Runtime, timer: TimerId) -> ScreenTransition {
            let call = if Some(timer) == self.timer {
                "timer"
            } else {
                "foreign timer"
            };
            self.journal.note(self.name, call);
            self.next_transition()
        }

        fn draw(&self, _frame: &mut Frame) {}
    }

    fn key() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    fn started(screen: Probe, journal: &Journal) -> (ScreenStack<'static>, Runtime) {
        let mut stack = ScreenStack::new(Box::new(screen));
        let mut runtime = Runtime::new();
        stack.init(&mut runtime);
        journal.take();
        (stack, runtime)
    }

    #[test]
    fn test_init_activates_initial_screen() {
        let journal = Journal::default();
        let mut stack = ScreenStack::new(Box::new(Probe::new("setup", &journal)));
        let mut runtime = Runtime::new();
        stack.init(&mut runtime);

        assert_eq!(journal.take(), ["setup.active"]);
        assert_eq!(runtime.armed_timer_count(), 1);
    }

    #[test]
    fn test_push_then_pop() {
        let journal = Journal::default();
        let dialog = Probe::new("dialog", &journal).then(ScreenTransition::Pop);
        let reveal =
            Probe::new("reveal", &journal).then(ScreenTransition::Push(Box::new(dialog)));
        let (mut stack, mut runtime) = started(reveal, &journal);

        stack.handle_event(&mut runtime, key());
        assert_eq!(
            journal.take(),
            ["reveal.event", "reveal.inactive", "dialog.active"]
        );
        assert_eq!(stack.depth(), 2);

        stack.handle_event(&mut runtime, key());
        assert_eq!(
            journal.take(),
            [
                "dialog.event",
                "dialog.inactive",
                "dialog.close",
                "reveal.active"
            ]
        );
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_replace_closes_current_screen() {
        let journal = Journal::default();
        let next = Probe::new("round", &journal);
        let reveal = Probe::new("reveal", &journal).then(ScreenTransition::Replace(Box::new(next)));
        let (mut stack, mut runtime) = started(reveal, &journal);

        stack.handle_event(&mut runtime, key());
        assert_eq!(
            journal.take(),
            [
                "reveal.event",
                "reveal.inactive",
                "reveal.close",
                "round.active"
            ]
        );
        assert_eq!(stack.depth(), 1);
        assert_eq!(runtime.armed_timer_count(), 1);
    }

    #[test]
    fn test_exit_closes_top_down() {
        let journal = Journal::default();
        let top = Probe::new("top", &journal).then(ScreenTransition::Exit);
        let bottom = Probe::new("bottom", &journal).then(ScreenTransition::Push(Box::new(top)));
        let (mut stack, mut runtime) = started(bottom, &journal);
        stack.handle_event(&mut runtime, key());
        journal.take();

        stack.handle_event(&mut runtime, key());
        assert_eq!(
            journal.take(),
            [
                "top.event",
                "top.inactive",
                "top.close",
                "bottom.inactive",
                "bottom.close"
            ]
        );
        assert!(stack.should_exit());
        assert_eq!(runtime.armed_timer_count(), 0);
    }

    #[test]
    fn test_popping_last_screen_exits() {
        let journal = Journal::default();
        let only = Probe::new("only", &journal).then(ScreenTransition::Pop);
        let (mut stack, mut runtime) = started(only, &journal);
        assert!(!stack.should_exit());

        stack.handle_event(&mut runtime, key());
        assert!(stack.should_exit());
    }

    #[test]
    fn test_timer_goes_to_top_screen() {
        let journal = Journal::default();
        let top = Probe::new("top", &journal);
        let bottom = Probe::new("bottom", &journal).then(ScreenTransition::Push(Box::new(top)));
        let (mut stack, mut runtime) = started(bottom, &journal);
        stack.handle_event(&mut runtime, key());
        journal.take();

        // Only the top screen's timer is still armed.
        assert_eq!(runtime.armed_timer_count(), 1);
        let bottom_timer = journal.timer(0);
        assert!(!runtime.is_timer_armed(bottom_timer));
        stack.on_timer(&mut runtime, bottom_timer);
        stack.on_timer(&mut runtime, journal.timer(1));
        assert_eq!(journal.take(), ["top.foreign timer", "top.timer"]);
    }

    #[test]
    fn test_timer_can_transition() {
        let journal = Journal::default();
        let summary = Probe::new("summary", &journal);
        let round = Probe::new("round", &journal).then(ScreenTransition::Replace(Box::new(summary)));
        let mut stack = ScreenStack::new(Box::new(round));
        let mut runtime = Runtime::new();
        stack.init(&mut runtime);
        journal.take();

        let armed = journal.timer(0);
        stack.on_timer(&mut runtime, armed);
        assert_eq!(
            journal.take(),
            [
                "round.timer",
                "round.inactive",
                "round.close",
                "summary.active"
            ]
        );
        assert!(!runtime.is_timer_armed(armed));
    }

    #[test]
    fn test_stay_changes_nothing() {
        let journal = Journal::default();
        let (mut stack, mut runtime) = started(Probe::new("setup", &journal), &journal);
        stack.apply(&mut runtime, ScreenTransition::Stay);
        assert!(journal.take().is_empty());
        assert_eq!(stack.depth(), 1);
    }
}
