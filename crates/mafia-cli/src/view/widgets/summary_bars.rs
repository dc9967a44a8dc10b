use mafia_engine::{SessionSummary, SummaryRow};
use ratatui::{
    layout::{Constraint, Layout},
    prelude::{Buffer, Rect},
    text::Line,
    widgets::{Block, BlockExt, Widget},
};

use crate::view::style;

const TITLE_WIDTH: u16 = 12;
const DURATION_WIDTH: u16 = 6;
const BAR_SYMBOL: &str = "█";

/// One horizontal bar per recorded round, scaled to the longest round.
#[derive(Debug)]
pub struct SummaryBars<'a> {
    summary: &'a SessionSummary,
    block: Option<Block<'a>>,
}

impl<'a> SummaryBars<'a> {
    pub fn new(summary: &'a SessionSummary) -> Self {
        Self {
            summary,
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

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_width(ratio: f64, width: u16) -> u16 {
    let cells = (ratio.clamp(0.0, 1.0) * f64::from(width)).round() as u16;
    // A recorded round is always at least one cell wide.
    cells.clamp(1.min(width), width)
}

fn render_row(row: &SummaryRow, area: Rect, buf: &mut Buffer) {
    let [title_area, bar_area, duration_area] = Layout::horizontal([
        Constraint::Length(TITLE_WIDTH),
        Constraint::Fill(1),
        Constraint::Length(DURATION_WIDTH),
    ])
    .spacing(1)
    .areas(area);

    Line::styled(row.title.to_string(), style::TEXT).render(title_area, buf);
    let bar = BAR_SYMBOL.repeat(usize::from(bar_width(row.ratio, bar_area.width)));
    Line::styled(bar, style::BAR).render(bar_area, buf);
    Line::styled(row.formatted_duration(), style::TITLE)
        .right_aligned()
        .render(duration_area, buf);
}

impl Widget for SummaryBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        for (row_area, row) in area.rows().zip(self.summary.rows()) {
            render_row(row, row_area, buf);
        }
    }
}
