use serde::{Deserialize, Serialize};

/// Policy deciding how many rounds of a session are recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundLimit {
    /// One round per player outside the mafia.
    ///
    /// Once that many rounds have been played, eliminations would have
    /// decided the game.
    #[default]
    NonMafiaPlayers,
    /// A fixed number of rounds, regardless of the table.
    Fixed(u32),
}

impl RoundLimit {
    #[must_use]
    pub const fn max_rounds(self, players: u32, mafia: u32) -> u32 {
        match self {
            Self::NonMafiaPlayers => players.saturating_sub(mafia),
            Self::Fixed(rounds) => rounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_mafia_players() {
        assert_eq!(RoundLimit::NonMafiaPlayers.max_rounds(8, 2), 6);
        assert_eq!(RoundLimit::NonMafiaPlayers.max_rounds(3, 0), 3);
        assert_eq!(RoundLimit::NonMafiaPlayers.max_rounds(2, 5), 0);
    }

    #[test]
    fn test_fixed_ignores_table() {
        assert_eq!(RoundLimit::Fixed(2).max_rounds(8, 2), 2);
        assert_eq!(RoundLimit::Fixed(0).max_rounds(8, 2), 0);
    }
}
