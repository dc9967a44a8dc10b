//! Game setup: roles, the operator's form and configuration validation.
//!
//! - [`Role`] / [`SpecialRoles`] / [`RoleCounts`] - what can be dealt
//! - [`SetupForm`] - raw text fields with stepper semantics
//! - [`SessionConfig`] - parsed but unchecked values
//! - [`ValidatedConfig`] - the only input accepted by the dealer
//!
//! Validation checks the player count, then the mafia count, then whether
//! mafia and special roles fit the table, then the round length, and stops at
//! the first failure. It never touches any state.

pub use self::{config::*, form::*, role::*};

mod config;
mod form;
mod role;
