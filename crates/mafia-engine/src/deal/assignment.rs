use std::{iter, ops::Index};

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::{Role, RoleCounts, ValidatedConfig};

use super::DealSeed;

/// One role per player slot, in draw order.
///
/// The order is a uniformly random permutation of the configured role
/// multiset and carries no other meaning. An assignment never changes once
/// dealt; a new deal replaces it.
///
/// # Example
///
/// ```
/// use mafia_engine::{RoleAssignment, SessionConfig, SpecialRoles};
///
/// let config = SessionConfig {
///     player_count: 8,
///     mafia_count: 2,
///     special_roles: SpecialRoles::NONE,
///     round_minutes: Some(5),
/// }
/// .validate()
/// .unwrap();
///
/// let assignment = RoleAssignment::deal(&config);
/// assert_eq!(assignment.len(), 8);
/// assert_eq!(assignment.counts().mafia, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleAssignment {
    roles: Vec<Role>,
}

impl RoleAssignment {
    /// Deals with a fresh random seed.
    #[must_use]
    pub fn deal(config: &ValidatedConfig) -> Self {
        Self::deal_with_seed(config, rand::rng().random())
    }

    /// Like [`Self::deal`], but reproducible from `seed`.
    #[must_use]
    pub fn deal_with_seed(config: &ValidatedConfig, seed: DealSeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.0);
        Self::deal_with_rng(config, &mut rng)
    }

    /// Deals using the caller's random source.
    ///
    /// Builds the role multiset (mafia, then enabled special roles, then
    /// civilians up to the player count) and shuffles it with Fisher-Yates.
    pub fn deal_with_rng<R>(config: &ValidatedConfig, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut roles = role_pool(config);
        fisher_yates(&mut roles, rng);

        let assignment = Self { roles };
        let counts = assignment.counts();
        tracing::info!(
            players = assignment.len(),
            mafia = counts.mafia,
            doctor = counts.doctor,
            seer = counts.seer,
            "roles dealt"
        );
        assignment
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<Role> {
        self.roles.get(slot).copied()
    }

    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }

    #[must_use]
    pub fn counts(&self) -> RoleCounts {
        RoleCounts::tally(&self.roles)
    }
}

impl Index<usize> for RoleAssignment {
    type Output = Role;

    fn index(&self, slot: usize) -> &Role {
        &self.roles[slot]
    }
}

impl<'a> IntoIterator for &'a RoleAssignment {
    type Item = Role;
    type IntoIter = iter::Copied<std::slice::Iter<'a, Role>>;

    fn into_iter(self) -> Self::IntoIter {
        self.roles.iter().copied()
    }
}

fn role_pool(config: &ValidatedConfig) -> Vec<Role> {
    let players = config.players() as usize;
    let mut pool = Vec::with_capacity(players);
    pool.extend(iter::repeat_n(Role::Mafia, config.mafia() as usize));
    pool.extend(config.special_roles().roles());
    let civilians = players - pool.len();
    pool.extend(iter::repeat_n(Role::Civilian, civilians));
    pool
}

/// Walks `i` from the last index down to 1 and swaps with a uniform `j` in `0..=i`.
fn fisher_yates<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;
    use crate::{SessionConfig, SpecialRoles};

    fn validated(players: i64, mafia: i64, special_roles: SpecialRoles) -> ValidatedConfig {
        SessionConfig {
            player_count: players,
            mafia_count: mafia,
            special_roles,
            round_minutes: None,
        }
        .validate()
        .unwrap()
    }

    fn seed(byte: u8) -> DealSeed {
        DealSeed([byte; 16])
    }

    #[test]
    fn test_eight_players_two_mafia() {
        let config = validated(8, 2, SpecialRoles::NONE);
        let counts = RoleAssignment::deal(&config).counts();
        assert_eq!(
            counts,
            RoleCounts {
                mafia: 2,
                civilian: 6,
                doctor: 0,
                seer: 0
            }
        );
    }

    #[test]
    fn test_special_roles_are_dealt_once() {
        let config = validated(8, 2, SpecialRoles::ALL);
        let counts = RoleAssignment::deal(&config).counts();
        assert_eq!(
            counts,
            RoleCounts {
                mafia: 2,
                civilian: 4,
                doctor: 1,
                seer: 1
            }
        );
    }

    #[test]
    fn test_no_mafia_game() {
        let config = validated(4, 0, SpecialRoles::NONE);
        let assignment = RoleAssignment::deal(&config);
        assert!(assignment.iter().all(|role| role.is_civilian()));
    }

    #[test]
    fn test_single_player() {
        let config = validated(1, 0, SpecialRoles::NONE);
        let assignment = RoleAssignment::deal(&config);
        assert_eq!(assignment.roles(), &[Role::Civilian]);
        assert_eq!(assignment[0], Role::Civilian);
        assert_eq!(assignment.get(1), None);
    }

    #[test]
    fn test_same_seed_same_order() {
        let config = validated(12, 3, SpecialRoles::ALL);
        assert_eq!(
            RoleAssignment::deal_with_seed(&config, seed(7)),
            RoleAssignment::deal_with_seed(&config, seed(7))
        );
    }

    #[test]
    fn test_fisher_yates_reaches_every_permutation_evenly() {
        // 3 distinct items -> 6 permutations, each expected ~1/6 of the draws.
        const DRAWS: usize = 60_000;
        let mut rng = Pcg32::from_seed([42; 16]);
        let mut seen: HashMap<[u8; 3], usize> = HashMap::new();
        for _ in 0..DRAWS {
            let mut items = [0u8, 1, 2];
            fisher_yates(&mut items, &mut rng);
            *seen.entry(items).or_default() += 1;
        }
        assert_eq!(seen.len(), 6);
        let expected = DRAWS / 6;
        for count in seen.values() {
            assert!(count.abs_diff(expected) < expected / 10, "{seen:?}");
        }
    }

    #[test]
    fn test_every_slot_can_hold_the_mafia() {
        let config = validated(5, 1, SpecialRoles::NONE);
        let mut rng = Pcg32::from_seed([3; 16]);
        let mut slots = [0usize; 5];
        for _ in 0..2_000 {
            let assignment = RoleAssignment::deal_with_rng(&config, &mut rng);
            let slot = assignment.iter().position(|role| role.is_mafia()).unwrap();
            slots[slot] += 1;
        }
        assert!(slots.iter().all(|&count| count > 0), "{slots:?}");
    }

    #[test]
    fn test_serializes_as_role_list() {
        let config = validated(2, 1, SpecialRoles::NONE);
        let assignment = RoleAssignment::deal_with_seed(&config, seed(1));
        let json = serde_json::to_value(&assignment).unwrap();
        let names: Vec<_> = assignment.iter().map(|role| role.to_string()).collect();
        assert_eq!(json, serde_json::json!(names));
    }

    proptest! {
        #[test]
        fn prop_deal_matches_configured_multiset(
            players in 1i64..40,
            mafia_pick in any::<u32>(),
            doctor in any::<bool>(),
            seer in any::<bool>(),
            seed_bytes in any::<[u8; 16]>(),
        ) {
            let special_roles = SpecialRoles { doctor, seer };
            let room = players - 1 - i64::from(special_roles.count());
            prop_assume!(room >= 0);
            let mafia = i64::from(mafia_pick) % (room + 1);
            let config = validated(players, mafia, special_roles);

            let assignment = RoleAssignment::deal_with_seed(&config, DealSeed(seed_bytes));
            prop_assert_eq!(i64::try_from(assignment.len()).unwrap(), players);
            prop_assert_eq!(assignment.counts(), config.expected_counts());
        }
    }
}
