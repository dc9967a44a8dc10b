use mafia_engine::Role;
use ratatui::{
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, BlockExt, Paragraph, Widget, Wrap},
};

use crate::view::style;

/// Card for the player currently holding the device.
///
/// Shows only the player number and how many remain until revealed.
#[derive(Debug)]
pub struct RoleCard<'a> {
    player: usize,
    remaining: usize,
    role: Option<Role>,
    block: Option<Block<'a>>,
}

impl<'a> RoleCard<'a> {
    /// `player` is 1-based. `role` is `None` while the card is face down.
    pub fn new(player: usize, remaining: usize, role: Option<Role>) -> Self {
        Self {
            player,
            remaining,
            role,
            block: None,
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn text(&self) -> Text<'static> {
        let mut lines = vec![
            Line::styled(format!("Player {}", self.player), style::TITLE),
            Line::styled(format!("{} left", self.remaining), style::MUTED),
            Line::default(),
        ];
        match self.role {
            Some(role) => {
                lines.push(Line::styled(role.reveal_title(), style::role(role)));
                lines.push(Line::default());
                lines.push(Line::styled(role.brief(), style::TEXT));
            }
            None => {
                lines.push(Line::styled("Pass the device to this player.", style::TEXT));
                lines.push(Line::styled("Press Space to reveal your role.", style::MUTED));
            }
        }
        Text::from(lines).centered()
    }
}

impl Widget for RoleCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        Paragraph::new(self.text())
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
