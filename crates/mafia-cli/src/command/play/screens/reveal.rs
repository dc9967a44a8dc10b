use crossterm::event::{Event, KeyCode, KeyEvent};
use mafia_engine::{Role, SystemClock};
use ratatui::{
    Frame,
    layout::{Constraint, HorizontalAlignment, Layout},
    widgets::{Block, Padding},
};
use ratatui_runtime::{Runtime, Screen, ScreenTransition, TimerId};

use crate::{
    command::play::{
        screens::{RoundScreen, SetupScreen},
        state::PlayState,
    },
    view::widgets::{KeyBindingDisplay, KeyHint, RoleCard},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Flip,
    Leave,
    Confirm,
    Cancel,
}

impl Action {
    fn from_key_event(event: &KeyEvent, confirming: bool) -> Option<Self> {
        match (event.code, confirming) {
            (KeyCode::Char(' ') | KeyCode::Enter, false) => Some(Self::Flip),
            (KeyCode::Char('q') | KeyCode::Esc, false) => Some(Self::Leave),
            (KeyCode::Char('y'), true) => Some(Self::Confirm),
            (KeyCode::Char('n') | KeyCode::Esc, true) => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// Passes the device around so each player sees only their own role.
#[derive(Debug)]
pub struct RevealScreen {
    state: PlayState,
    cursor: usize,
    revealed: bool,
    confirming_exit: bool,
}

impl RevealScreen {
    pub(crate) fn new(state: PlayState) -> Self {
        Self {
            state,
            cursor: 0,
            revealed: false,
            confirming_exit: false,
        }
    }

    fn player_count(&self) -> usize {
        self.state
            .game
            .current_deal()
            .map_or(0, |deal| deal.assignment().len())
    }

    /// Players still waiting for their card, counting the current one
    /// until it is turned.
    fn remaining(&self) -> usize {
        let current = usize::from(!self.revealed);
        self.player_count()
            .saturating_sub(self.cursor)
            .saturating_sub(current)
    }

    fn current_role(&self) -> Option<Role> {
        let deal = self.state.game.current_deal()?;
        deal.assignment().get(self.cursor)
    }

    fn flip(&mut self) -> ScreenTransition {
        if !self.revealed {
            self.revealed = true;
            return ScreenTransition::Stay;
        }
        self.revealed = false;
        self.cursor += 1;
        if self.cursor < self.player_count() {
            return ScreenTransition::Stay;
        }
        self.start_rounds()
    }

    fn start_rounds(&mut self) -> ScreenTransition {
        match self.state.game.start_rounds(SystemClock).map(|_| ()) {
            Ok(()) => ScreenTransition::Replace(Box::new(RoundScreen::new(self.state.take()))),
            Err(err) => {
                tracing::warn!(%err, "cannot start rounds, back to setup");
                self.back_to_setup()
            }
        }
    }

    fn back_to_setup(&mut self) -> ScreenTransition {
        self.state.game.reset();
        ScreenTransition::Replace(Box::new(SetupScreen::new(self.state.take())))
    }
}

impl Screen for RevealScreen {
    fn on_active(&mut self, _runtime: &mut Runtime) {}

    fn on_inactive(&mut self, _runtime: &mut Runtime) {}

    fn on_close(&mut self, _runtime: &mut Runtime) {}

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        if let Some(event) = event.as_key_event()
            && let Some(action) = Action::from_key_event(&event, self.confirming_exit)
        {
            match action {
                Action::Flip => return self.flip(),
                Action::Leave => self.confirming_exit = true,
                Action::Confirm => return self.back_to_setup(),
                Action::Cancel => self.confirming_exit = false,
            }
        }
        ScreenTransition::Stay
    }

    fn on_timer(&mut self, _runtime: &mut Runtime, _timer: TimerId) -> ScreenTransition {
        ScreenTransition::Stay
    }

    fn draw(&self, frame: &mut Frame) {
        let block = Block::bordered()
            .title("Role Reveal")
            .title_alignment(HorizontalAlignment::Center)
            .padding(Padding::symmetric(2, 1));
        let viewport = super::viewport(frame);
        let inner = block.inner(viewport);
        frame.render_widget(block, viewport);

        let [card_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

        let role = self.revealed.then(|| self.current_role()).flatten();
        let card = RoleCard::new(self.cursor + 1, self.remaining(), role)
            .block(Block::bordered().padding(Padding::uniform(1)));
        frame.render_widget(card, card_area.centered_horizontally(Constraint::Max(48)));

        let flip_label = if self.revealed { "Hide & pass" } else { "Reveal" };
        let help = KeyBindingDisplay::new([
            KeyHint::new(&["Space"], flip_label),
            KeyHint::new(&["q", "Esc"], "Leave"),
        ]);
        frame.render_widget(help, help_area);

        if self.confirming_exit {
            super::render_popup(frame, inner, "Leave and reset this game? (y/n)");
        }
    }
}

#[cfg(test)]
mod tests {
    use mafia_engine::RoundLimit;

    use super::*;
    use crate::command::play::screens::test_util::{char_key, dealt_state, key};

    fn screen() -> RevealScreen {
        RevealScreen::new(dealt_state(RoundLimit::default()))
    }

    fn press(screen: &mut RevealScreen, event: &Event) -> ScreenTransition {
        screen.handle_event(&mut Runtime::new(), event)
    }

    #[test]
    fn test_remaining_counts_down_per_card() {
        let mut screen = screen();
        assert_eq!(screen.remaining(), 2);
        let first = screen.state.game.current_deal().unwrap().assignment().get(0);
        assert_eq!(screen.current_role(), first);

        press(&mut screen, &char_key(' '));
        assert!(screen.revealed);
        assert_eq!(screen.remaining(), 3);

        press(&mut screen, &char_key(' '));
        assert!(!screen.revealed);
        assert_eq!(screen.cursor, 1);
        assert_eq!(screen.remaining(), 1);
    }

    #[test]
    fn test_last_card_starts_rounds() {
        let mut screen = screen();
        for _ in 0..5 {
            assert!(matches!(
                press(&mut screen, &char_key(' ')),
                ScreenTransition::Stay
            ));
        }
        assert_eq!(screen.cursor, 2);
        assert!(screen.revealed);
        assert_eq!(screen.remaining(), 1);
        let transition = press(&mut screen, &char_key(' '));
        assert!(matches!(transition, ScreenTransition::Replace(_)));
        assert_eq!(screen.cursor, 3);
        assert!(!screen.revealed);
        assert!(screen.state.game.current_deal().is_none());
        assert_eq!(screen.remaining(), 0);
    }

    #[test]
    fn test_leaving_asks_first() {
        let mut screen = screen();
        press(&mut screen, &key(KeyCode::Esc));
        assert!(screen.confirming_exit);
        press(&mut screen, &char_key(' '));
        assert!(!screen.revealed);

        press(&mut screen, &char_key('n'));
        assert!(!screen.confirming_exit);

        press(&mut screen, &char_key('q'));
        let transition = press(&mut screen, &char_key('y'));
        assert!(matches!(transition, ScreenTransition::Replace(_)));
    }
}
