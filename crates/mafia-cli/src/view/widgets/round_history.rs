use mafia_engine::{EndReason, RoundResult, format_compact};
use ratatui::{
    prelude::{Buffer, Rect},
    text::{Line, Span},
    widgets::{Block, BlockExt, Widget},
};

use crate::view::style;

/// Completed rounds of the current session, newest last.
#[derive(Debug)]
pub struct RoundHistory<'a> {
    rounds: &'a [RoundResult],
    block: Option<Block<'a>>,
}

impl<'a> RoundHistory<'a> {
    pub fn new(rounds: &'a [RoundResult]) -> Self {
        Self {
            rounds,
            block: None,
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }
}

fn history_line(result: &RoundResult) -> Line<'static> {
    let mut spans = vec![
        Span::styled(format!("Round {}", result.id()), style::TEXT),
        Span::styled("  ", style::TEXT),
        Span::styled(format_compact(result.duration_seconds()), style::TITLE),
    ];
    if result.reason() == EndReason::Ended {
        spans.push(Span::styled(" · ended early", style::MUTED));
    }
    Line::from(spans)
}

impl Widget for RoundHistory<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        if self.rounds.is_empty() {
            Line::styled("No rounds yet", style::MUTED).render(area, buf);
            return;
        }
        // Keep the latest rounds visible when the list overflows.
        let visible = usize::from(area.height);
        let skip = self.rounds.len().saturating_sub(visible);
        for (row, result) in area.rows().zip(&self.rounds[skip..]) {
            history_line(result).render(row, buf);
        }
    }
}
