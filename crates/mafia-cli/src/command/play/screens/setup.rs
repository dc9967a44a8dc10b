use crossterm::event::{Event, KeyCode, KeyEvent};
use mafia_engine::SetupForm;
use ratatui::{
    Frame,
    layout::{Constraint, HorizontalAlignment, Layout},
    text::{Line, Span, Text},
    widgets::{Block, Padding},
};
use ratatui_runtime::{Runtime, Screen, ScreenTransition, TimerId};

use crate::{
    command::play::{screens::RevealScreen, state::PlayState},
    view::{
        style,
        widgets::{KeyBindingDisplay, KeyHint},
    },
};

/// Longest text accepted in a numeric field.
const MAX_INPUT_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Players,
    Mafia,
    Minutes,
    Doctor,
    Seer,
}

impl Field {
    const ALL: [Self; 5] = [
        Self::Players,
        Self::Mafia,
        Self::Minutes,
        Self::Doctor,
        Self::Seer,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn label(self) -> &'static str {
        match self {
            Self::Players => "Players",
            Self::Mafia => "Mafia",
            Self::Minutes => "Round minutes",
            Self::Doctor => "Doctor",
            Self::Seer => "Seer",
        }
    }

    fn text_mut(self, form: &mut SetupForm) -> Option<&mut String> {
        match self {
            Self::Players => Some(&mut form.players),
            Self::Mafia => Some(&mut form.mafia),
            Self::Minutes => Some(&mut form.minutes),
            Self::Doctor | Self::Seer => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    FocusPrev,
    FocusNext,
    Step(i32),
    Toggle,
    Digit(char),
    Erase,
    Submit,
    Quit,
}

impl Action {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        match event.code {
            KeyCode::Up | KeyCode::BackTab => Some(Self::FocusPrev),
            KeyCode::Down | KeyCode::Tab => Some(Self::FocusNext),
            KeyCode::Left | KeyCode::Char('-') => Some(Self::Step(-1)),
            KeyCode::Right | KeyCode::Char('+') => Some(Self::Step(1)),
            KeyCode::Char(' ') => Some(Self::Toggle),
            KeyCode::Char(c) if c.is_ascii_digit() => Some(Self::Digit(c)),
            KeyCode::Backspace => Some(Self::Erase),
            KeyCode::Enter => Some(Self::Submit),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }

    fn hints() -> [KeyHint<'static>; 5] {
        [
            KeyHint::new(&["↑", "↓"], "Field"),
            KeyHint::new(&["←", "→"], "Adjust"),
            KeyHint::new(&["Space"], "Toggle"),
            KeyHint::new(&["Enter"], "Deal roles"),
            KeyHint::new(&["q", "Esc"], "Quit"),
        ]
    }
}

/// Game setup: table size, special roles and round length.
#[derive(Debug)]
pub struct SetupScreen {
    state: PlayState,
    focus: Field,
}

impl SetupScreen {
    pub(crate) fn new(state: PlayState) -> Self {
        Self {
            state,
            focus: Field::Players,
        }
    }

    fn step(&mut self, delta: i32) {
        let form = &mut self.state.form;
        match self.focus {
            Field::Players => form.step_players(delta),
            Field::Mafia => form.step_mafia(delta),
            Field::Minutes => form.step_minutes(delta),
            Field::Doctor => form.toggle_doctor(),
            Field::Seer => form.toggle_seer(),
        }
    }

    fn toggle(&mut self) {
        match self.focus {
            Field::Doctor => self.state.form.toggle_doctor(),
            Field::Seer => self.state.form.toggle_seer(),
            Field::Players | Field::Mafia | Field::Minutes => {}
        }
    }

    fn submit(&mut self) -> ScreenTransition {
        match self.state.game.deal(&self.state.form).map(|_| ()) {
            Ok(()) => ScreenTransition::Replace(Box::new(RevealScreen::new(self.state.take()))),
            Err(err) => {
                tracing::debug!(%err, "setup rejected");
                ScreenTransition::Stay
            }
        }
    }

    fn field_line(&self, field: Field) -> Line<'static> {
        let form = &self.state.form;
        let value = match field {
            Field::Players => format!("< {} >", form.players),
            Field::Mafia => format!("< {} >  max {}", form.mafia, form.max_mafia()),
            Field::Minutes => format!("< {} >", form.minutes),
            Field::Doctor => checkbox(form.special_roles.doctor),
            Field::Seer => checkbox(form.special_roles.seer),
        };
        let (marker, label_style) = if field == self.focus {
            ("> ", style::FOCUSED)
        } else {
            ("  ", style::TEXT)
        };
        Line::from(vec![
            Span::styled(marker, style::FOCUSED),
            Span::styled(format!("{:<15}", field.label()), label_style),
            Span::styled(value, style::TITLE),
        ])
    }

    fn summary_lines(&self) -> Vec<Line<'static>> {
        let form = &self.state.form;
        let balance = form.balance();
        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!("Villagers: {}   ", form.villagers()), style::TEXT),
                Span::styled(balance.to_string(), style::balance(balance)),
            ]),
            Line::default(),
        ];
        if let Some(err) = self.state.game.last_error() {
            lines.push(Line::styled(err.to_string(), style::ERROR));
        }
        lines
    }
}

fn checkbox(checked: bool) -> String {
    if checked { "[x]" } else { "[ ]" }.to_owned()
}

impl Screen for SetupScreen {
    fn on_active(&mut self, _runtime: &mut Runtime) {}

    fn on_inactive(&mut self, _runtime: &mut Runtime) {}

    fn on_close(&mut self, _runtime: &mut Runtime) {}

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        if let Some(event) = event.as_key_event()
            && let Some(action) = Action::from_key_event(&event)
        {
            match action {
                Action::FocusPrev => self.focus = self.focus.prev(),
                Action::FocusNext => self.focus = self.focus.next(),
                Action::Step(delta) => self.step(delta),
                Action::Toggle => self.toggle(),
                Action::Digit(c) => {
                    if let Some(text) = self.focus.text_mut(&mut self.state.form)
                        && text.len() < MAX_INPUT_LEN
                    {
                        text.push(c);
                    }
                }
                Action::Erase => {
                    if let Some(text) = self.focus.text_mut(&mut self.state.form) {
                        text.pop();
                    }
                }
                Action::Submit => return self.submit(),
                Action::Quit => return ScreenTransition::Exit,
            }
        }
        ScreenTransition::Stay
    }

    fn on_timer(&mut self, _runtime: &mut Runtime, _timer: TimerId) -> ScreenTransition {
        ScreenTransition::Stay
    }

    fn draw(&self, frame: &mut Frame) {
        let block = Block::bordered()
            .title("Mafia Setup")
            .title_alignment(HorizontalAlignment::Center)
            .padding(Padding::symmetric(2, 1));
        let viewport = super::viewport(frame);
        let inner = block.inner(viewport);
        frame.render_widget(block, viewport);

        let [fields_area, summary_area, help_area] = Layout::vertical([
            Constraint::Length(u16::try_from(Field::ALL.len()).unwrap_or(u16::MAX)),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .spacing(1)
        .areas(inner);

        let fields: Vec<_> = Field::ALL.iter().map(|f| self.field_line(*f)).collect();
        frame.render_widget(Text::from(fields), fields_area);
        frame.render_widget(Text::from(self.summary_lines()), summary_area);
        frame.render_widget(KeyBindingDisplay::new(Action::hints()), help_area);
    }
}
