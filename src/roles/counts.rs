//! Requested role counts for a table.
//!
//! `RoleCounts` maps each role to how many seats should receive it.
//! Iteration is in canonical role order so that the same configuration
//! always expands to the same role list before shuffling.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::definition::{Faction, Role};

/// Number of seats requested per role.
///
/// ## Example
///
/// ```
/// use werewolf_engine::roles::{Faction, Role, RoleCounts};
///
/// let counts = RoleCounts::new()
///     .with(Role::Wolf, 2)
///     .with(Role::Seer, 1)
///     .with(Role::Villager, 5);
///
/// assert_eq!(counts.total(), 8);
/// assert_eq!(counts.faction_total(Faction::Aggressor), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCounts(BTreeMap<Role, u32>);

impl RoleCounts {
    /// Create an empty count table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the count for a role (builder pattern).
    #[must_use]
    pub fn with(mut self, role: Role, count: u32) -> Self {
        self.set(role, count);
        self
    }

    /// Set the count for a role. A count of zero removes the entry.
    pub fn set(&mut self, role: Role, count: u32) {
        if count == 0 {
            self.0.remove(&role);
        } else {
            self.0.insert(role, count);
        }
    }

    /// Get the count for a role.
    #[must_use]
    pub fn get(&self, role: Role) -> u32 {
        self.0.get(&role).copied().unwrap_or(0)
    }

    /// Total number of seats requested.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().map(|&c| u64::from(c)).sum()
    }

    /// Number of seats requested for one faction.
    #[must_use]
    pub fn faction_total(&self, faction: Faction) -> u64 {
        self.0
            .iter()
            .filter(|(role, _)| role.faction() == faction)
            .map(|(_, &c)| u64::from(c))
            .sum()
    }

    /// Iterate over (role, count) pairs with a non-zero count.
    pub fn iter(&self) -> impl Iterator<Item = (Role, u32)> + '_ {
        self.0.iter().map(|(&role, &count)| (role, count))
    }

    /// Expand into one role per seat, in canonical order.
    #[must_use]
    pub fn expand(&self) -> Vec<Role> {
        self.iter()
            .flat_map(|(role, count)| std::iter::repeat(role).take(count as usize))
            .collect()
    }
}

impl FromIterator<(Role, u32)> for RoleCounts {
    fn from_iter<I: IntoIterator<Item = (Role, u32)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (role, count) in iter {
            counts.set(role, counts.get(role) + count);
        }
        counts
    }
}
