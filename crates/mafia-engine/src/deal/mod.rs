//! Role allocation.
//!
//! A [`RoleAssignment`] is dealt from a [`ValidatedConfig`](crate::ValidatedConfig)
//! with either a fresh random seed or a [`DealSeed`] for reproducible deals.

pub use self::{assignment::*, seed::*};

mod assignment;
mod seed;
