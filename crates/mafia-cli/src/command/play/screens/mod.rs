use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::Text,
    widgets::{Block, Clear},
};

use crate::view::style;

pub use self::{reveal::RevealScreen, round::RoundScreen, setup::SetupScreen, summary::SummaryScreen};

mod reveal;
mod round;
mod setup;
mod summary;

/// Area every screen draws into, centered in the terminal.
fn viewport(frame: &Frame) -> Rect {
    frame
        .area()
        .centered(Constraint::Max(72), Constraint::Max(28))
}

/// Draws a one-line dialog over `area`.
fn render_popup(frame: &mut Frame, area: Rect, message: &str) {
    let width = u16::try_from(message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(4);
    let area = area.centered(Constraint::Length(width), Constraint::Length(3));
    let block = Block::new().style(style::DIALOG);
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    frame.render_widget(
        Text::styled(message, style::DIALOG).centered(),
        inner.centered_vertically(Constraint::Length(1)),
    );
}
