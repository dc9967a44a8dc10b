use std::{cell::RefCell, rc::Rc};

use mafia_engine::{Game, SetupForm};

use crate::schema::summary::RecordedSummary;

/// Everything a play session carries from one screen to the next.
///
/// Screens own it while active and hand it over on transitions.
#[derive(Debug, Default)]
pub(crate) struct PlayState {
    pub(crate) game: Game,
    /// Last setup entered, shown again after a reset.
    pub(crate) form: SetupForm,
    summaries: Rc<RefCell<Vec<RecordedSummary>>>,
}

impl PlayState {
    pub(crate) fn new(game: Game, form: SetupForm) -> Self {
        Self {
            game,
            form,
            summaries: Rc::default(),
        }
    }

    /// Handle to the summaries recorded so far, readable after the run.
    pub(crate) fn summaries(&self) -> Rc<RefCell<Vec<RecordedSummary>>> {
        Rc::clone(&self.summaries)
    }

    pub(crate) fn record_summary(&self, summary: RecordedSummary) {
        self.summaries.borrow_mut().push(summary);
    }

    /// Moves the state out, leaving an empty one behind.
    pub(crate) fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}
