use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{RoleCounts, SpecialRoles};

/// Length of one discussion round.
///
/// Always within [`RoundDuration::MIN_MINUTES`]..=[`RoundDuration::MAX_MINUTES`]
/// when produced by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundDuration {
    seconds: u32,
}

impl RoundDuration {
    pub const MIN_MINUTES: u32 = 1;
    pub const MAX_MINUTES: u32 = 30;
    pub const MAX_SECONDS: u32 = Self::MAX_MINUTES * 60;

    /// Creates a duration from whole minutes, checking the allowed range.
    pub fn from_minutes(minutes: i64) -> Result<Self, ConfigError> {
        check_round_minutes(minutes)
    }

    /// Creates a duration from seconds without range checks.
    ///
    /// Used by callers that manage their own timing policy (tests, presets).
    /// The round controller still rejects a zero duration.
    #[must_use]
    pub const fn from_secs_unchecked(seconds: u32) -> Self {
        Self { seconds }
    }

    #[must_use]
    pub const fn as_secs(self) -> u32 {
        self.seconds
    }

    #[must_use]
    pub const fn whole_minutes(self) -> u32 {
        self.seconds / 60
    }

    #[must_use]
    pub fn to_std(self) -> Duration {
        Duration::from_secs(u64::from(self.seconds))
    }
}

/// Largest table the dealer accepts.
pub const MAX_PLAYERS: u32 = 100;

/// Setup failures, in the order they are checked.
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
pub enum ConfigError {
    #[display("Enter a valid player count (1 to {}).", MAX_PLAYERS)]
    InvalidPlayerCount,
    #[display("Enter a valid mafia count (>=0).")]
    InvalidMafiaCount,
    #[display(
        "Mafia count must be at most {max_mafia} for {players} players and {specials} special roles."
    )]
    RoleCountExceedsPlayers {
        players: u32,
        specials: u32,
        max_mafia: u32,
    },
    #[display("Enter a round length between 1 and 30 minutes.")]
    InvalidRoundDuration,
}

/// Unvalidated setup values, already parsed into integers.
///
/// Signed so that out-of-range input coming from a form is representable and
/// rejected by [`SessionConfig::validate`] instead of at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub player_count: i64,
    pub mafia_count: i64,
    #[serde(default)]
    pub special_roles: SpecialRoles,
    #[serde(default)]
    pub round_minutes: Option<i64>,
}

impl SessionConfig {
    /// Checks every constraint and returns the first failure.
    ///
    /// Pure: the result only depends on `self`.
    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        let players = check_player_count(self.player_count)?;
        let mafia = check_mafia_count(self.mafia_count)?;
        let mafia = check_role_fit(players, mafia, self.special_roles)?;
        let round_duration = self.round_minutes.map(check_round_minutes).transpose()?;
        Ok(ValidatedConfig {
            players,
            mafia,
            special_roles: self.special_roles,
            round_duration,
        })
    }
}

pub(super) fn check_player_count(players: i64) -> Result<u32, ConfigError> {
    u32::try_from(players)
        .ok()
        .filter(|players| (1..=MAX_PLAYERS).contains(players))
        .ok_or(ConfigError::InvalidPlayerCount)
}

pub(super) fn check_mafia_count(mafia: i64) -> Result<i64, ConfigError> {
    if mafia < 0 {
        return Err(ConfigError::InvalidMafiaCount);
    }
    Ok(mafia)
}

pub(super) fn check_role_fit(
    players: u32,
    mafia: i64,
    special_roles: SpecialRoles,
) -> Result<u32, ConfigError> {
    let specials = special_roles.count();
    match u32::try_from(mafia) {
        Ok(mafia) if u64::from(mafia) + u64::from(specials) < u64::from(players) => Ok(mafia),
        _ => Err(ConfigError::RoleCountExceedsPlayers {
            players,
            specials,
            max_mafia: max_mafia(players, special_roles),
        }),
    }
}

pub(super) fn check_round_minutes(minutes: i64) -> Result<RoundDuration, ConfigError> {
    const RANGE: std::ops::RangeInclusive<u32> =
        RoundDuration::MIN_MINUTES..=RoundDuration::MAX_MINUTES;
    u32::try_from(minutes)
        .ok()
        .filter(|minutes| RANGE.contains(minutes))
        .map(|minutes| RoundDuration {
            seconds: minutes * 60,
        })
        .ok_or(ConfigError::InvalidRoundDuration)
}

/// Largest mafia count that still leaves one non-special, non-mafia slot.
#[must_use]
pub fn max_mafia(players: u32, special_roles: SpecialRoles) -> u32 {
    players.saturating_sub(1 + special_roles.count())
}

/// A configuration that passed every check.
///
/// Only obtainable through [`SessionConfig::validate`] (or the text form),
/// so holders can rely on `mafia + specials < players`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidatedConfig {
    players: u32,
    mafia: u32,
    special_roles: SpecialRoles,
    round_duration: Option<RoundDuration>,
}

impl ValidatedConfig {
    #[must_use]
    pub const fn players(&self) -> u32 {
        self.players
    }

    #[must_use]
    pub const fn mafia(&self) -> u32 {
        self.mafia
    }

    #[must_use]
    pub const fn special_roles(&self) -> SpecialRoles {
        self.special_roles
    }

    #[must_use]
    pub const fn round_duration(&self) -> Option<RoundDuration> {
        self.round_duration
    }

    /// Composition every deal of this configuration must have.
    #[must_use]
    pub fn expected_counts(&self) -> RoleCounts {
        let doctor = u32::from(self.special_roles.doctor);
        let seer = u32::from(self.special_roles.seer);
        RoleCounts {
            mafia: self.mafia,
            civilian: self.players - self.mafia - doctor - seer,
            doctor,
            seer,
        }
    }
}
