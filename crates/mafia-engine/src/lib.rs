//! Core of the Mafia round facilitator.
//!
//! The crate covers everything that has rules, and nothing that draws:
//!
//! - [`setup`] - roles, the setup form and configuration validation
//! - [`deal`] - shuffling roles onto player slots
//! - [`round`] - the timed round state machine and its history
//! - [`Game`] - ties one deal to one round controller
//! - [`SessionSummary`] - aggregates shown after the last round
//!
//! Data only flows forward: a [`ValidatedConfig`] yields a [`RoleAssignment`],
//! whose counts bound the [`RoundController`], whose [`RoundResult`]s feed
//! the summary.
//!
//! # Example
//!
//! ```
//! use mafia_engine::{Game, ManualClock, RoundLimit, SetupForm};
//!
//! let mut game = Game::new(RoundLimit::NonMafiaPlayers);
//! let deal = game.deal(&SetupForm::default()).unwrap();
//! assert_eq!(deal.assignment().counts().mafia, 2);
//!
//! let rounds = game.start_rounds(ManualClock::at_epoch()).unwrap();
//! assert_eq!(rounds.max_rounds(), 6);
//! ```

pub use self::{deal::*, game::*, round::*, setup::*, summary::*};

pub mod deal;
mod game;
pub mod round;
pub mod setup;
mod summary;

/// Rejected round controller operations.
///
/// A rejected operation leaves the controller untouched.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::IsVariant,
)]
pub enum RoundError {
    /// Rounds were requested before a round duration was configured.
    #[display("no round duration configured")]
    MissingRoundDuration,
    #[display("operation needs the {expected} phase, but the round is {actual}")]
    WrongPhase {
        expected: RoundPhase,
        actual: RoundPhase,
    },
    #[display("all {max_rounds} rounds have been played")]
    RoundLimitReached { max_rounds: u32 },
    #[display("round already finished")]
    AlreadyFinished,
}
