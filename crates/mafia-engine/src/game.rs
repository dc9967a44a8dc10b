use rand::Rng as _;

use crate::{
    Clock, ConfigError, DealSeed, READY_SECONDS, RoleAssignment, RoundController, RoundError,
    RoundLimit, SessionConfig, SetupForm, SystemClock, ValidatedConfig,
};

/// Anything the operator can hand in as a setup.
pub trait ConfigSource {
    /// Checks the setup.
    ///
    /// # Errors
    ///
    /// Returns the first failed check.
    fn validate(&self) -> Result<ValidatedConfig, ConfigError>;
}

impl ConfigSource for SessionConfig {
    fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        SessionConfig::validate(self)
    }
}

impl ConfigSource for SetupForm {
    fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        SetupForm::validate(self)
    }
}

impl ConfigSource for ValidatedConfig {
    fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        Ok(*self)
    }
}

/// A validated setup together with the roles dealt from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    config: ValidatedConfig,
    assignment: RoleAssignment,
    seed: DealSeed,
}

impl Deal {
    #[must_use]
    pub const fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    #[must_use]
    pub const fn assignment(&self) -> &RoleAssignment {
        &self.assignment
    }

    /// Seed that reproduces this assignment.
    #[must_use]
    pub const fn seed(&self) -> DealSeed {
        self.seed
    }
}

/// One game on one device: the current deal and its rounds.
///
/// A failed [`Game::deal`] leaves the previous deal and rounds in place and
/// only records the error. [`Game::reset`] clears everything at once.
#[derive(Debug)]
pub struct Game<C = SystemClock> {
    limit: RoundLimit,
    ready_seconds: u32,
    fixed_seed: Option<DealSeed>,
    deal: Option<Deal>,
    last_error: Option<ConfigError>,
    rounds: Option<RoundController<C>>,
}

impl<C> Default for Game<C>
where
    C: Clock,
{
    fn default() -> Self {
        Self::new(RoundLimit::default())
    }
}

impl<C> Game<C>
where
    C: Clock,
{
    #[must_use]
    pub const fn new(limit: RoundLimit) -> Self {
        Self {
            limit,
            ready_seconds: READY_SECONDS,
            fixed_seed: None,
            deal: None,
            last_error: None,
            rounds: None,
        }
    }

    /// Deals every game with `seed` instead of a fresh random one.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<DealSeed>) -> Self {
        self.fixed_seed = seed;
        self
    }

    /// Overrides the preparatory countdown of every round.
    #[must_use]
    pub fn with_ready_seconds(mut self, seconds: u32) -> Self {
        self.ready_seconds = seconds;
        self
    }

    #[must_use]
    pub const fn limit(&self) -> RoundLimit {
        self.limit
    }

    #[must_use]
    pub const fn current_deal(&self) -> Option<&Deal> {
        self.deal.as_ref()
    }

    /// Error of the last rejected setup, cleared by the next accepted one.
    #[must_use]
    pub const fn last_error(&self) -> Option<ConfigError> {
        self.last_error
    }

    #[must_use]
    pub const fn rounds(&self) -> Option<&RoundController<C>> {
        self.rounds.as_ref()
    }

    pub fn rounds_mut(&mut self) -> Option<&mut RoundController<C>> {
        self.rounds.as_mut()
    }

    /// Validates `source` and deals a new assignment from it.
    ///
    /// The new deal replaces the previous one and discards its rounds.
    ///
    /// # Errors
    ///
    /// Returns the validation error; the previous deal is kept.
    pub fn deal<S>(&mut self, source: &S) -> Result<&Deal, ConfigError>
    where
        S: ConfigSource + ?Sized,
    {
        let config = match source.validate() {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!(%err, "setup rejected");
                self.last_error = Some(err);
                return Err(err);
            }
        };
        let seed = self.fixed_seed.unwrap_or_else(|| rand::rng().random());
        let assignment = RoleAssignment::deal_with_seed(&config, seed);
        self.last_error = None;
        self.rounds = None;
        Ok(self.deal.insert(Deal {
            config,
            assignment,
            seed,
        }))
    }

    /// Drops the current deal and its rounds, keeping the game settings.
    pub fn clear_deal(&mut self) {
        self.deal = None;
        self.rounds = None;
    }

    /// Hands the current deal to a fresh round controller.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::MissingRoundDuration`] when nothing was dealt or
    /// the deal has no round duration.
    pub fn start_rounds(&mut self, clock: C) -> Result<&mut RoundController<C>, RoundError> {
        let deal = self.deal.as_ref().ok_or(RoundError::MissingRoundDuration)?;
        let controller = RoundController::for_config(&deal.config, self.limit, clock)?
            .with_ready_seconds(self.ready_seconds);
        Ok(self.rounds.insert(controller))
    }

    /// Returns to the state before setup.
    pub fn reset(&mut self) {
        tracing::debug!("game reset");
        self.deal = None;
        self.last_error = None;
        self.rounds = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ManualClock, Role, RoundPhase, SpecialRoles};

    fn setup(players: i64, mafia: i64, minutes: Option<i64>) -> SessionConfig {
        SessionConfig {
            player_count: players,
            mafia_count: mafia,
            special_roles: SpecialRoles::NONE,
            round_minutes: minutes,
        }
    }

    fn game() -> Game<ManualClock> {
        Game::new(RoundLimit::NonMafiaPlayers)
    }

    #[test]
    fn test_failed_deal_keeps_previous_deal() {
        let mut game = game();
        let first = game.deal(&setup(8, 2, Some(5))).unwrap().clone();

        let err = game.deal(&setup(5, 5, Some(5))).unwrap_err();
        assert!(err.is_role_count_exceeds_players());
        assert_eq!(game.last_error(), Some(err));
        assert_eq!(game.current_deal(), Some(&first));
    }

    #[test]
    fn test_accepted_deal_clears_error() {
        let mut game = game();
        game.deal(&setup(0, 0, Some(5))).unwrap_err();
        assert!(game.last_error().is_some());
        game.deal(&setup(3, 1, Some(5))).unwrap();
        assert_eq!(game.last_error(), None);
    }

    #[test]
    fn test_form_source() {
        let mut game = game();
        let deal = game.deal(&SetupForm::default()).unwrap();
        assert_eq!(deal.assignment().len(), 8);
        assert_eq!(deal.config().round_duration().unwrap().as_secs(), 300);
    }

    #[test]
    fn test_fixed_seed_reproduces_deal() {
        let seed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
        let mut game = game().with_seed(Some(seed));
        let first = game.deal(&setup(10, 3, Some(5))).unwrap().clone();
        let second = game.deal(&setup(10, 3, Some(5))).unwrap();
        assert_eq!(&first, second);
        assert_eq!(second.seed(), seed);
    }

    #[test]
    fn test_start_rounds() {
        let mut game = game().with_ready_seconds(4);
        game.deal(&setup(8, 2, Some(5))).unwrap();
        let rounds = game.start_rounds(ManualClock::at_epoch()).unwrap();
        assert_eq!(rounds.max_rounds(), 6);
        assert_eq!(rounds.ready_remaining(), 4);
        assert_eq!(rounds.phase(), RoundPhase::Ready);
    }

    #[test]
    fn test_start_rounds_without_setup() {
        let mut game = game();
        assert_eq!(
            game.start_rounds(ManualClock::at_epoch()).unwrap_err(),
            RoundError::MissingRoundDuration
        );

        game.deal(&setup(8, 2, None)).unwrap();
        assert_eq!(
            game.start_rounds(ManualClock::at_epoch()).unwrap_err(),
            RoundError::MissingRoundDuration
        );
        assert!(game.rounds().is_none());
    }

    #[test]
    fn test_new_deal_discards_rounds() {
        let mut game = game();
        game.deal(&setup(4, 1, Some(1))).unwrap();
        game.start_rounds(ManualClock::at_epoch()).unwrap();
        game.deal(&setup(4, 1, Some(1))).unwrap();
        assert!(game.rounds().is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut game = game();
        game.deal(&setup(4, 0, Some(1))).unwrap();
        let rounds = game.start_rounds(ManualClock::at_epoch()).unwrap();
        rounds.start_early().unwrap();
        rounds.end_early().unwrap();
        game.deal(&setup(0, 0, None)).unwrap_err();

        game.reset();
        assert!(game.current_deal().is_none());
        assert!(game.rounds().is_none());
        assert!(game.last_error().is_none());
    }

    #[test]
    fn test_clear_deal_keeps_settings() {
        let mut game = game().with_ready_seconds(3);
        game.deal(&setup(3, 0, Some(2))).unwrap();
        game.clear_deal();
        assert!(game.current_deal().is_none());

        let deal = game.deal(&setup(3, 0, Some(2))).unwrap();
        assert!(deal.assignment().iter().all(|role| role == Role::Civilian));
        assert_eq!(game.start_rounds(ManualClock::at_epoch()).unwrap().ready_remaining(), 3);
    }
}
