//! Role definitions - static role data.
//!
//! `RoleDefinition` holds the immutable properties of a role: its faction,
//! its nightly ability and the constraint on how that ability may be used.
//! The set of roles is closed; the resolver dispatches on `AbilityKind`.
//!
//! Per-seat state that changes during a game (protection history, revealed
//! roles) lives on the `Seat`, not here.

use serde::{Deserialize, Serialize};

/// The two sides of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Faction {
    /// The minority faction. Wins when no town seat remains alive.
    Aggressor,
    /// The majority faction. Wins when no aggressor seat remains alive.
    Town,
}

impl Faction {
    /// The opposing faction.
    #[must_use]
    pub const fn opponent(self) -> Faction {
        match self {
            Faction::Aggressor => Faction::Town,
            Faction::Town => Faction::Aggressor,
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Faction::Aggressor => write!(f, "aggressors"),
            Faction::Town => write!(f, "town"),
        }
    }
}

/// What a role's nightly ability does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Vote with the other aggressors on a seat to eliminate.
    Eliminate,
    /// Learn the role of one seat.
    Reveal,
    /// Shield one seat from elimination for the night.
    Protect,
    /// No nightly ability.
    None,
}

/// Restriction on how an ability may target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsageConstraint {
    /// Any alive seat.
    Unconstrained,
    /// The target must not belong to the acting seat's faction.
    NoFriendlyFire,
    /// The acting seat may not target itself.
    NotSelf,
    /// The target must differ from the one chosen on the previous use.
    NoConsecutiveTarget,
}

/// Closed set of roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Wolf,
    Seer,
    Protector,
    Villager,
}

/// Static role definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleDefinition {
    pub role: Role,
    /// Canonical lowercase name.
    pub name: &'static str,
    pub faction: Faction,
    pub ability: AbilityKind,
    pub constraint: UsageConstraint,
    /// One-line description handed to agents.
    pub description: &'static str,
}

const DEFINITIONS: [RoleDefinition; 4] = [
    RoleDefinition {
        role: Role::Wolf,
        name: "wolf",
        faction: Faction::Aggressor,
        ability: AbilityKind::Eliminate,
        constraint: UsageConstraint::NoFriendlyFire,
        description: "You are a wolf. Eliminate the town without being discovered.",
    },
    RoleDefinition {
        role: Role::Seer,
        name: "seer",
        faction: Faction::Town,
        ability: AbilityKind::Reveal,
        constraint: UsageConstraint::NotSelf,
        description: "You are the seer. Each night you learn the role of one player.",
    },
    RoleDefinition {
        role: Role::Protector,
        name: "protector",
        faction: Faction::Town,
        ability: AbilityKind::Protect,
        constraint: UsageConstraint::NoConsecutiveTarget,
        description: "You are the protector. Each night you shield one player, never the same one twice in a row.",
    },
    RoleDefinition {
        role: Role::Villager,
        name: "villager",
        faction: Faction::Town,
        ability: AbilityKind::None,
        constraint: UsageConstraint::Unconstrained,
        description: "You are a villager. Watch closely and vote the wolves out.",
    },
];

impl Role {
    /// All roles in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Role] {
        &[Role::Wolf, Role::Seer, Role::Protector, Role::Villager]
    }

    /// The static definition for this role.
    #[must_use]
    pub const fn definition(self) -> &'static RoleDefinition {
        match self {
            Role::Wolf => &DEFINITIONS[0],
            Role::Seer => &DEFINITIONS[1],
            Role::Protector => &DEFINITIONS[2],
            Role::Villager => &DEFINITIONS[3],
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        self.definition().name
    }

    #[must_use]
    pub const fn faction(self) -> Faction {
        self.definition().faction
    }

    #[must_use]
    pub const fn ability(self) -> AbilityKind {
        self.definition().ability
    }

    #[must_use]
    pub const fn constraint(self) -> UsageConstraint {
        self.definition().constraint
    }

    /// Check if this role belongs to the aggressor faction.
    #[must_use]
    pub const fn is_aggressor(self) -> bool {
        matches!(self.faction(), Faction::Aggressor)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown role name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown role {0:?}")]
pub struct UnknownRole(pub String);

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    /// Accepts canonical names plus the common aliases used by table hosts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wolf" | "werewolf" | "aggressor" => Ok(Role::Wolf),
            "seer" | "oracle" => Ok(Role::Seer),
            "protector" | "doctor" | "bodyguard" => Ok(Role::Protector),
            "villager" | "town" | "townsfolk" => Ok(Role::Villager),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitions_match_roles() {
        for &role in Role::all() {
            assert_eq!(role.definition().role, role);
        }
    }

    #[test]
    fn test_factions() {
        assert_eq!(Role::Wolf.faction(), Faction::Aggressor);
        assert!(Role::Wolf.is_aggressor());
        for role in [Role::Seer, Role::Protector, Role::Villager] {
            assert_eq!(role.faction(), Faction::Town);
            assert!(!role.is_aggressor());
        }
        assert_eq!(Faction::Town.opponent(), Faction::Aggressor);
    }

    #[test]
    fn test_abilities_and_constraints() {
        assert_eq!(Role::Wolf.ability(), AbilityKind::Eliminate);
        assert_eq!(Role::Wolf.constraint(), UsageConstraint::NoFriendlyFire);
        assert_eq!(Role::Seer.ability(), AbilityKind::Reveal);
        assert_eq!(Role::Seer.constraint(), UsageConstraint::NotSelf);
        assert_eq!(Role::Protector.ability(), AbilityKind::Protect);
        assert_eq!(Role::Protector.constraint(), UsageConstraint::NoConsecutiveTarget);
        assert_eq!(Role::Villager.ability(), AbilityKind::None);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Werewolf".parse::<Role>(), Ok(Role::Wolf));
        assert_eq!(" doctor ".parse::<Role>(), Ok(Role::Protector));
        assert_eq!("seer".parse::<Role>(), Ok(Role::Seer));
        assert_eq!("town".parse::<Role>(), Ok(Role::Villager));
        assert!("jester".parse::<Role>().is_err());
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(format!("{}", Role::Protector), "protector");
        let json = serde_json::to_string(&Role::Wolf).unwrap();
        assert_eq!(json, "\"wolf\"");
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Role::Wolf);
    }
}
