use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent};
use mafia_engine::{RoundController, TickOutcome, TimerToken};
use ratatui::{
    Frame,
    layout::{Constraint, HorizontalAlignment, Layout},
    widgets::{Block, Padding},
};
use ratatui_runtime::{Runtime, Screen, ScreenTransition, TimerId};

use crate::{
    command::play::{
        screens::{SetupScreen, SummaryScreen},
        state::PlayState,
    },
    view::widgets::{KeyBindingDisplay, KeyHint, RoundClock, RoundHistory},
};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    StartEarly,
    EndEarly,
    NextRound,
    Restart,
    Finish,
    Leave,
    Confirm,
    Cancel,
}

impl Action {
    fn from_key_event(event: &KeyEvent, confirming: bool) -> Option<Self> {
        match (event.code, confirming) {
            (KeyCode::Char('s') | KeyCode::Enter, false) => Some(Self::StartEarly),
            (KeyCode::Char('e'), false) => Some(Self::EndEarly),
            (KeyCode::Char('n'), false) => Some(Self::NextRound),
            (KeyCode::Char('r'), false) => Some(Self::Restart),
            (KeyCode::Char('f'), false) => Some(Self::Finish),
            (KeyCode::Char('q') | KeyCode::Esc, false) => Some(Self::Leave),
            (KeyCode::Char('y'), true) => Some(Self::Confirm),
            (KeyCode::Char('n') | KeyCode::Esc, true) => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// Ready countdown, round timer and history of the current game.
///
/// The runtime timer follows [`RoundController::armed_timer`]: whenever the
/// controller changes phase the old timer is canceled and a new one armed.
#[derive(Debug)]
pub struct RoundScreen {
    state: PlayState,
    timer: Option<(TimerId, TimerToken)>,
    confirming_exit: bool,
}

impl RoundScreen {
    pub(crate) fn new(state: PlayState) -> Self {
        Self {
            state,
            timer: None,
            confirming_exit: false,
        }
    }

    fn rounds(&self) -> Option<&RoundController> {
        self.state.game.rounds()
    }

    fn sync_timer(&mut self, runtime: &mut Runtime) {
        let wanted = self.rounds().and_then(RoundController::armed_timer);
        if self.timer.map(|(_, token)| token) == wanted {
            return;
        }
        self.cancel_timer(runtime);
        self.timer = wanted.map(|token| (runtime.arm_timer(TICK_INTERVAL), token));
    }

    fn cancel_timer(&mut self, runtime: &mut Runtime) {
        if let Some((id, _)) = self.timer.take() {
            runtime.cancel_timer(id);
        }
    }

    fn apply(&mut self, runtime: &mut Runtime, action: Action) -> ScreenTransition {
        let Some(rounds) = self.state.game.rounds_mut() else {
            return self.back_to_setup(runtime);
        };
        let result = match action {
            Action::StartEarly => rounds.start_early(),
            Action::EndEarly => rounds.end_early().map(|_| ()),
            Action::NextRound => rounds.next_round(),
            Action::Restart => {
                if !rounds.phase().is_ready() {
                    rounds.restart();
                }
                Ok(())
            }
            Action::Finish => {
                self.cancel_timer(runtime);
                let next = SummaryScreen::open(self.state.take());
                return ScreenTransition::Replace(next);
            }
            Action::Leave => {
                self.confirming_exit = true;
                Ok(())
            }
            Action::Confirm => return self.back_to_setup(runtime),
            Action::Cancel => {
                self.confirming_exit = false;
                Ok(())
            }
        };
        if let Err(err) = result {
            tracing::debug!(?action, %err, "round action rejected");
        }
        self.sync_timer(runtime);
        ScreenTransition::Stay
    }

    fn back_to_setup(&mut self, runtime: &mut Runtime) -> ScreenTransition {
        self.cancel_timer(runtime);
        self.state.game.reset();
        ScreenTransition::Replace(Box::new(SetupScreen::new(self.state.take())))
    }

    fn hints(rounds: &RoundController) -> [KeyHint<'static>; 6] {
        [
            KeyHint::new(&["s"], "Start now").enabled(rounds.can_start_early()),
            KeyHint::new(&["e"], "End round").enabled(rounds.can_end_early()),
            KeyHint::new(&["n"], "Next round").enabled(rounds.can_start_next_round()),
            KeyHint::new(&["r"], "Restart").enabled(!rounds.phase().is_ready()),
            KeyHint::new(&["f"], "Finish"),
            KeyHint::new(&["q"], "Leave"),
        ]
    }
}

impl Screen for RoundScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        self.sync_timer(runtime);
    }

    fn on_inactive(&mut self, runtime: &mut Runtime) {
        self.cancel_timer(runtime);
    }

    fn on_close(&mut self, runtime: &mut Runtime) {
        self.cancel_timer(runtime);
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        if let Some(event) = event.as_key_event()
            && let Some(action) = Action::from_key_event(&event, self.confirming_exit)
        {
            return self.apply(runtime, action);
        }
        ScreenTransition::Stay
    }

    fn on_timer(&mut self, runtime: &mut Runtime, timer: TimerId) -> ScreenTransition {
        let Some((id, token)) = self.timer else {
            return ScreenTransition::Stay;
        };
        if id != timer {
            return ScreenTransition::Stay;
        }
        if let Some(rounds) = self.state.game.rounds_mut() {
            match rounds.tick(token) {
                TickOutcome::RoundStarted => tracing::debug!("round timer running"),
                TickOutcome::RoundFinished(result) => {
                    tracing::debug!(recorded = result.is_some(), "round timer ran out");
                }
                TickOutcome::Ignored | TickOutcome::Counted => {}
            }
        }
        self.sync_timer(runtime);
        ScreenTransition::Stay
    }

    fn draw(&self, frame: &mut Frame) {
        let block = Block::bordered()
            .title("Mafia Rounds")
            .title_alignment(HorizontalAlignment::Center)
            .padding(Padding::symmetric(2, 1));
        let viewport = super::viewport(frame);
        let inner = block.inner(viewport);
        frame.render_widget(block, viewport);

        let Some(rounds) = self.rounds() else {
            return;
        };

        let [clock_area, history_area, help_area] = Layout::vertical([
            Constraint::Length(10),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .spacing(1)
        .areas(inner);

        frame.render_widget(RoundClock::new(rounds), clock_area);
        frame.render_widget(
            RoundHistory::new(rounds.rounds()).block(Block::bordered().title("History")),
            history_area,
        );
        frame.render_widget(KeyBindingDisplay::new(Self::hints(rounds)), help_area);

        if self.confirming_exit {
            super::render_popup(frame, inner, "Leave and reset this game? (y/n)");
        }
    }
}
