use crossterm::event::Event;
use ratatui::Frame;

use crate::{Runtime, TimerId};

/// An application run by [`Runtime::run`].
pub trait App {
    /// Called once before the first event. Arm timers and pick a render mode here.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Key input, resize and other terminal events.
    fn handle_event(&mut self, runtime: &mut Runtime, event: Event);

    /// An armed timer elapsed.
    fn on_timer(&mut self, runtime: &mut Runtime, timer: TimerId);

    fn draw(&self, frame: &mut Frame);
}
