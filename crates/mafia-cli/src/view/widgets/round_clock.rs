use mafia_engine::{Clock, RoundController, RoundPhase};
use ratatui::{
    layout::{Constraint, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, BlockExt, Gauge, Widget},
};

use crate::view::style;

/// Round heading as shown above the clock.
pub fn round_title(current: u32, max_rounds: u32) -> String {
    if max_rounds > 0 {
        format!("Round {current} of {max_rounds}")
    } else {
        format!("Round {current}")
    }
}

/// Phase, countdown and progress of the current round.
#[derive(Debug)]
pub struct RoundClock<'a, C> {
    rounds: &'a RoundController<C>,
    block: Option<Block<'a>>,
}

impl<'a, C> RoundClock<'a, C>
where
    C: Clock,
{
    pub fn new(rounds: &'a RoundController<C>) -> Self {
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

    fn countdown(&self) -> (String, &'static str) {
        match self.rounds.phase() {
            RoundPhase::Ready => (self.rounds.formatted_ready(), "Starting in"),
            RoundPhase::Running | RoundPhase::Finished => {
                (self.rounds.formatted_remaining(), "Remaining")
            }
        }
    }
}

impl<C> Widget for RoundClock<'_, C>
where
    C: Clock,
{
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let phase = self.rounds.phase();
        let accent = style::phase(phase);
        let (time, caption) = self.countdown();

        let heading = Text::from(vec![
            Line::styled(
                round_title(self.rounds.current_round(), self.rounds.max_rounds()),
                style::TITLE,
            ),
            Line::styled(phase.label().to_uppercase(), Style::new().fg(accent)),
            Line::styled(phase.title(), style::TEXT),
        ])
        .centered();
        let clock = Text::from(vec![
            Line::styled(time, style::TITLE.fg(accent)),
            Line::styled(caption, style::MUTED),
        ])
        .centered();
        let gauge = Gauge::default()
            .gauge_style(Style::new().fg(accent))
            .ratio(self.rounds.progress().clamp(0.0, 1.0))
            .label("");

        let [heading_area, clock_area, gauge_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .spacing(1)
        .areas(area);

        heading.render(heading_area, buf);
        clock.render(clock_area, buf);
        gauge.render(gauge_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use mafia_engine::{ManualClock, RoundDuration};

    use super::*;

    fn rendered(rounds: &RoundController<ManualClock>) -> String {
        let area = Rect::new(0, 0, 30, 8);
        let mut buf = Buffer::empty(area);
        RoundClock::new(rounds).render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_round_title() {
        assert_eq!(round_title(2, 6), "Round 2 of 6");
        assert_eq!(round_title(1, 0), "Round 1");
    }

    #[test]
    fn test_shows_ready_countdown_then_round_time() {
        let mut rounds = RoundController::new(
            Some(RoundDuration::from_secs_unchecked(300)),
            6,
            ManualClock::at_epoch(),
        )
        .unwrap();
        let text = rendered(&rounds);
        assert!(text.contains("Round 1 of 6"));
        assert!(text.contains("GET READY"));
        assert!(text.contains("00:10"));
        assert!(text.contains("Starting in"));

        rounds.start_early().unwrap();
        let text = rendered(&rounds);
        assert!(text.contains("CURRENT PHASE"));
        assert!(text.contains("05:00"));
        assert!(text.contains("Remaining"));
    }
}
