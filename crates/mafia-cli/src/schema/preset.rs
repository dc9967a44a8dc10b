use mafia_engine::SetupForm;
use serde::{Deserialize, Serialize};

/// Setup values to prefill, from a preset file or the command line.
///
/// Missing fields keep the form's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SetupPreset {
    pub players: Option<u32>,
    pub mafia: Option<u32>,
    pub minutes: Option<u32>,
    pub doctor: Option<bool>,
    pub seer: Option<bool>,
}

impl SetupPreset {
    /// Fields set in `self` win over those of `base`.
    #[must_use]
    pub fn or(self, base: Self) -> Self {
        Self {
            players: self.players.or(base.players),
            mafia: self.mafia.or(base.mafia),
            minutes: self.minutes.or(base.minutes),
            doctor: self.doctor.or(base.doctor),
            seer: self.seer.or(base.seer),
        }
    }

    /// Writes the preset into the form text as typed values.
    ///
    /// Values are not clamped; out-of-range values surface as validation
    /// errors when the form is submitted.
    pub fn apply(&self, form: &mut SetupForm) {
        if let Some(players) = self.players {
            form.players = players.to_string();
        }
        if let Some(mafia) = self.mafia {
            form.mafia = mafia.to_string();
        }
        if let Some(minutes) = self.minutes {
            form.minutes = minutes.to_string();
        }
        if let Some(doctor) = self.doctor {
            form.special_roles.doctor = doctor;
        }
        if let Some(seer) = self.seer {
            form.special_roles.seer = seer;
        }
    }

    #[must_use]
    pub fn to_form(&self) -> SetupForm {
        let mut form = SetupForm::default();
        self.apply(&mut form);
        form
    }
}

#[cfg(test)]
mod tests {
    use mafia_engine::SpecialRoles;

    use super::*;

    #[test]
    fn test_partial_preset_keeps_defaults() {
        let preset: SetupPreset = serde_json::from_str(r#"{"players": 10, "seer": true}"#).unwrap();
        let form = preset.to_form();
        assert_eq!(form.players, "10");
        assert_eq!(form.mafia, "2");
        assert_eq!(form.minutes, "5");
        assert_eq!(
            form.special_roles,
            SpecialRoles {
                doctor: false,
                seer: true
            }
        );
    }

    #[test]
    fn test_flags_win_over_preset() {
        let file = SetupPreset {
            players: Some(6),
            mafia: Some(1),
            ..SetupPreset::default()
        };
        let flags = SetupPreset {
            mafia: Some(2),
            ..SetupPreset::default()
        };
        let merged = flags.or(file);
        assert_eq!(merged.players, Some(6));
        assert_eq!(merged.mafia, Some(2));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: Result<SetupPreset, _> = serde_json::from_str(r#"{"player": 10}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_out_of_range_values_fail_validation() {
        let preset = SetupPreset {
            minutes: Some(45),
            ..SetupPreset::default()
        };
        assert!(preset.to_form().validate().unwrap_err().is_invalid_round_duration());
    }
}
