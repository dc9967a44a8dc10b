//! Round lifecycle.
//!
//! A session is a sequence of timed rounds run by a [`RoundController`]:
//!
//! 1. `ready`: a short preparatory countdown ([`READY_SECONDS`] by default)
//! 2. `running`: the round timer counts down
//! 3. `finished`: the timer ran out or the operator ended the round early
//!
//! Finishing a round records a [`RoundResult`] unless the session already
//! holds as many rounds as its [`RoundLimit`] allows. From `finished` the
//! operator moves on to the next round while under the limit, and may
//! restart the session from any phase.
//!
//! The controller owns no timers. The runtime asks for
//! [`RoundController::armed_timer`], delivers one tick per second with that
//! token and re-reads the armed timer after every call.
//!
//! # Example
//!
//! ```
//! use mafia_engine::{ManualClock, RoundController, RoundDuration, RoundPhase};
//!
//! let mut rounds = RoundController::new(
//!     Some(RoundDuration::from_secs_unchecked(90)),
//!     3,
//!     ManualClock::at_epoch(),
//! )
//! .unwrap();
//!
//! rounds.start_early().unwrap();
//! let token = rounds.armed_timer().unwrap();
//! rounds.tick(token);
//! assert_eq!(rounds.formatted_remaining(), "01:29");
//!
//! let result = rounds.end_early().unwrap().unwrap();
//! assert_eq!(result.duration_seconds(), 90);
//! assert_eq!(rounds.phase(), RoundPhase::Finished);
//! ```

pub use self::{
    clock::*,
    controller::*,
    display::*,
    limit::*,
    result::*,
    timer::{Countdown, TimerToken},
};

mod clock;
mod controller;
mod display;
mod limit;
mod result;
mod timer;
