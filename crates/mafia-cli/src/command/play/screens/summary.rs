use crossterm::event::{Event, KeyCode};
use mafia_engine::{Clock as _, SessionSummary};
use ratatui::{
    Frame,
    layout::{Constraint, HorizontalAlignment, Layout},
    text::{Line, Text},
    widgets::{Block, Padding},
};
use ratatui_runtime::{Runtime, Screen, ScreenTransition, TimerId};

use crate::{
    command::play::{screens::SetupScreen, state::PlayState},
    schema::summary::RecordedSummary,
    view::{
        style,
        widgets::{KeyBindingDisplay, KeyHint, SummaryBars},
    },
};

/// Totals and per-round bars of a finished game.
#[derive(Debug)]
pub struct SummaryScreen {
    state: PlayState,
    summary: SessionSummary,
}

impl SummaryScreen {
    /// Summary of the rounds played so far, or the setup screen when no
    /// round was recorded.
    ///
    /// Opening the summary records it for export.
    pub(crate) fn open(mut state: PlayState) -> Box<dyn Screen> {
        let Some(summary) = Self::summarize(&state) else {
            state.game.reset();
            return Box::new(SetupScreen::new(state));
        };
        if let Some(recorded) = Self::record(&state, &summary) {
            state.record_summary(recorded);
        }
        tracing::info!(
            rounds = summary.rows().len(),
            total_seconds = summary.total_seconds(),
            "session summary shown"
        );
        Box::new(Self { state, summary })
    }

    fn summarize(state: &PlayState) -> Option<SessionSummary> {
        SessionSummary::new(state.game.rounds()?.rounds())
    }

    fn record(state: &PlayState, summary: &SessionSummary) -> Option<RecordedSummary> {
        let deal = state.game.current_deal()?;
        let rounds = state.game.rounds()?;
        Some(RecordedSummary::new(
            rounds.clock().now(),
            deal.seed(),
            *deal.config(),
            rounds.max_rounds(),
            summary,
        ))
    }

    fn total_line(&self) -> Line<'static> {
        let (minutes, seconds) = self.summary.total_minutes_seconds();
        Line::styled(
            format!("Total discussion time: {minutes} min {seconds} sec"),
            style::TITLE,
        )
    }
}

impl Screen for SummaryScreen {
    fn on_active(&mut self, _runtime: &mut Runtime) {}

    fn on_inactive(&mut self, _runtime: &mut Runtime) {}

    fn on_close(&mut self, _runtime: &mut Runtime) {}

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        if let Some(event) = event.as_key_event() {
            match event.code {
                KeyCode::Enter | KeyCode::Char('n') => {
                    self.state.game.reset();
                    return ScreenTransition::Replace(Box::new(SetupScreen::new(
                        self.state.take(),
                    )));
                }
                KeyCode::Char('q') | KeyCode::Esc => return ScreenTransition::Exit,
                _ => {}
            }
        }
        ScreenTransition::Stay
    }

    fn on_timer(&mut self, _runtime: &mut Runtime, _timer: TimerId) -> ScreenTransition {
        ScreenTransition::Stay
    }

    fn draw(&self, frame: &mut Frame) {
        let block = Block::bordered()
            .title("Game Summary")
            .title_alignment(HorizontalAlignment::Center)
            .padding(Padding::symmetric(2, 1));
        let viewport = super::viewport(frame);
        let inner = block.inner(viewport);
        frame.render_widget(block, viewport);

        let [total_area, bars_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .spacing(1)
        .areas(inner);

        frame.render_widget(Text::from(self.total_line()).centered(), total_area);
        frame.render_widget(SummaryBars::new(&self.summary), bars_area);
        frame.render_widget(
            KeyBindingDisplay::new([
                KeyHint::new(&["Enter"], "New game"),
                KeyHint::new(&["q", "Esc"], "Quit"),
            ]),
            help_area,
        );
    }
}
