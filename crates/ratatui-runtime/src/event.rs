use crossterm::event::Event as CrosstermEvent;

use crate::TimerId;

/// Events delivered by the event loop.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// An armed interval timer elapsed.
    Timer(TimerId),
    /// Time to draw, according to the [`RenderMode`](crate::RenderMode).
    Render,
    /// Key input, resize and other terminal events.
    Crossterm(CrosstermEvent),
}
