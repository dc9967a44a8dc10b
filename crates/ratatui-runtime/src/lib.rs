//! Minimal terminal application runtime on top of `ratatui`.
//!
//! A [`Runtime`] runs an [`App`], usually a [`ScreenStack`] of [`Screen`]s,
//! and owns cancelable interval timers identified by [`TimerId`].

pub use self::{
    app::App,
    event_loop::RenderMode,
    runtime::Runtime,
    screen::{Screen, ScreenStack, ScreenTransition},
    timer::TimerId,
};

mod app;
mod event;
mod event_loop;
mod runtime;
mod screen;
mod timer;
