use serde::{Deserialize, Serialize};

/// Secret identity dealt to a single player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum Role {
    Mafia,
    Civilian,
    Doctor,
    Seer,
}

impl Role {
    pub const LEN: usize = 4;

    pub const ALL: [Self; Self::LEN] = [Self::Mafia, Self::Civilian, Self::Doctor, Self::Seer];

    /// Heading shown when the role is revealed to its owner.
    #[must_use]
    pub const fn reveal_title(self) -> &'static str {
        match self {
            Self::Mafia => "You are Mafia",
            Self::Civilian => "You are Civilian",
            Self::Doctor => "You are Doctor",
            Self::Seer => "You are Seer",
        }
    }

    #[must_use]
    pub const fn brief(self) -> &'static str {
        match self {
            Self::Mafia => "Stay hidden. Coordinate silently. Strike at night.",
            Self::Civilian => "Trust your gut. Watch the votes. Protect your town.",
            Self::Doctor => "Choose wisely. Save one player when danger strikes.",
            Self::Seer => "Read the table. Reveal a player's true role each night.",
        }
    }

    /// Whether the role is one of the optional, unique roles.
    #[must_use]
    pub const fn is_special(self) -> bool {
        matches!(self, Self::Doctor | Self::Seer)
    }
}

/// Optional unique roles enabled for a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialRoles {
    pub doctor: bool,
    pub seer: bool,
}

impl SpecialRoles {
    pub const NONE: Self = Self {
        doctor: false,
        seer: false,
    };

    pub const ALL: Self = Self {
        doctor: true,
        seer: true,
    };

    /// Number of enabled special roles (0, 1 or 2).
    #[must_use]
    pub fn count(self) -> u32 {
        u32::from(self.doctor) + u32::from(self.seer)
    }

    /// Enabled special roles in deal order.
    pub fn roles(self) -> impl Iterator<Item = Role> {
        [
            self.doctor.then_some(Role::Doctor),
            self.seer.then_some(Role::Seer),
        ]
        .into_iter()
        .flatten()
    }
}

/// Per-role head count of a deal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCounts {
    pub mafia: u32,
    pub civilian: u32,
    pub doctor: u32,
    pub seer: u32,
}

impl RoleCounts {
    #[must_use]
    pub fn tally<'a>(roles: impl IntoIterator<Item = &'a Role>) -> Self {
        let mut counts = Self::default();
        for role in roles {
            *counts.get_mut(*role) += 1;
        }
        counts
    }

    #[must_use]
    pub const fn get(&self, role: Role) -> u32 {
        match role {
            Role::Mafia => self.mafia,
            Role::Civilian => self.civilian,
            Role::Doctor => self.doctor,
            Role::Seer => self.seer,
        }
    }

    fn get_mut(&mut self, role: Role) -> &mut u32 {
        match role {
            Role::Mafia => &mut self.mafia,
            Role::Civilian => &mut self.civilian,
            Role::Doctor => &mut self.doctor,
            Role::Seer => &mut self.seer,
        }
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.mafia + self.civilian + self.doctor + self.seer
    }

    /// Players that are not on the mafia side.
    #[must_use]
    pub const fn town(&self) -> u32 {
        self.total() - self.mafia
    }
}
