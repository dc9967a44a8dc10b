use serde::{Deserialize, Serialize};

use super::{
    ConfigError, MAX_PLAYERS, RoundDuration, SpecialRoles, ValidatedConfig,
    config::{check_mafia_count, check_player_count, check_role_fit, check_round_minutes},
    max_mafia,
};

/// Mafia share of the table, as shown next to the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Balance {
    #[display("Add mafia")]
    NoMafia,
    #[display("Villager heavy")]
    VillagerHeavy,
    #[display("Balanced")]
    Balanced,
    #[display("Mafia heavy")]
    MafiaHeavy,
}

impl Balance {
    const VILLAGER_HEAVY_BELOW: f64 = 0.2;
    const MAFIA_HEAVY_ABOVE: f64 = 0.32;

    #[must_use]
    pub fn of(players: u32, mafia: u32) -> Self {
        if mafia == 0 || players == 0 {
            return Self::NoMafia;
        }
        let ratio = f64::from(mafia) / f64::from(players);
        if ratio < Self::VILLAGER_HEAVY_BELOW {
            Self::VillagerHeavy
        } else if ratio > Self::MAFIA_HEAVY_ABOVE {
            Self::MafiaHeavy
        } else {
            Self::Balanced
        }
    }
}

/// Editable setup fields, kept as the text the operator typed.
///
/// The steppers read the current text leniently (garbage counts as the
/// field's minimum) while [`SetupForm::validate`] is strict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupForm {
    pub players: String,
    pub mafia: String,
    pub minutes: String,
    pub special_roles: SpecialRoles,
}

impl Default for SetupForm {
    fn default() -> Self {
        Self {
            players: "8".to_owned(),
            mafia: "2".to_owned(),
            minutes: "5".to_owned(),
            special_roles: SpecialRoles::NONE,
        }
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

impl SetupForm {
    /// Player count as displayed by the counter (never below 1).
    ///
    /// Not capped: oversized text is kept so that validation reports it.
    #[must_use]
    pub fn shown_players(&self) -> u32 {
        parse_integer(&self.players)
            .and_then(|players| u32::try_from(players).ok())
            .map_or(1, |players| players.max(1))
    }

    /// Mafia count as displayed by the counter (never below 0).
    #[must_use]
    pub fn shown_mafia(&self) -> u32 {
        parse_integer(&self.mafia)
            .and_then(|mafia| u32::try_from(mafia).ok())
            .unwrap_or(0)
    }

    /// Round length in minutes as displayed by the counter.
    #[must_use]
    pub fn shown_minutes(&self) -> u32 {
        parse_integer(&self.minutes)
            .and_then(|minutes| u32::try_from(minutes).ok())
            .map_or(RoundDuration::MIN_MINUTES, |minutes| {
                minutes.max(RoundDuration::MIN_MINUTES)
            })
    }

    #[must_use]
    pub fn max_mafia(&self) -> u32 {
        max_mafia(self.shown_players(), self.special_roles)
    }

    #[must_use]
    pub fn villagers(&self) -> u32 {
        self.shown_players().saturating_sub(self.shown_mafia())
    }

    #[must_use]
    pub fn balance(&self) -> Balance {
        Balance::of(self.shown_players(), self.shown_mafia())
    }

    pub fn step_players(&mut self, delta: i32) {
        let players = self
            .shown_players()
            .saturating_add_signed(delta)
            .clamp(1, MAX_PLAYERS);
        self.players = players.to_string();
        self.clamp_mafia();
    }

    pub fn step_mafia(&mut self, delta: i32) {
        let mafia = self
            .shown_mafia()
            .saturating_add_signed(delta)
            .min(self.max_mafia());
        self.mafia = mafia.to_string();
    }

    pub fn step_minutes(&mut self, delta: i32) {
        let minutes = self
            .shown_minutes()
            .saturating_add_signed(delta)
            .clamp(RoundDuration::MIN_MINUTES, RoundDuration::MAX_MINUTES);
        self.minutes = minutes.to_string();
    }

    pub fn toggle_doctor(&mut self) {
        self.special_roles.doctor = !self.special_roles.doctor;
        self.clamp_mafia();
    }

    pub fn toggle_seer(&mut self) {
        self.special_roles.seer = !self.special_roles.seer;
        self.clamp_mafia();
    }

    fn clamp_mafia(&mut self) {
        let mafia = self.shown_mafia().min(self.max_mafia());
        self.mafia = mafia.to_string();
    }

    /// Parses and validates the form with the same check order as
    /// [`SessionConfig::validate`](super::SessionConfig::validate).
    ///
    /// Unparsable text fails the check of its own field.
    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        let players = parse_integer(&self.players)
            .ok_or(ConfigError::InvalidPlayerCount)
            .and_then(check_player_count)?;
        let mafia = parse_integer(&self.mafia)
            .ok_or(ConfigError::InvalidMafiaCount)
            .and_then(check_mafia_count)?;
        check_role_fit(players, mafia, self.special_roles)?;
        let minutes = parse_integer(&self.minutes)
            .ok_or(ConfigError::InvalidRoundDuration)
            .and_then(check_round_minutes)?;
        super::SessionConfig {
            player_count: i64::from(players),
            mafia_count: mafia,
            special_roles: self.special_roles,
            round_minutes: Some(i64::from(minutes.whole_minutes())),
        }
        .validate()
    }
}
