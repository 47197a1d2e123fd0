//! Seat identification and per-seat state.
//!
//! ## SeatId
//!
//! Type-safe seat identifier supporting up to 255 seats.
//!
//! ## Seat
//!
//! One participant: display name, immutable role, alive status and the
//! role's private memory. Private memory is typed per role
//! (`AbilityMemory`) and only mutated from inside the crate while that
//! seat's own action resolves.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::roles::{Faction, Role};

/// Seat identifier. Seat indices are 0-based: the first seat is `SeatId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatId(pub u8);

impl SeatId {
    /// Create a new seat ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seat IDs for a table with `seat_count` seats.
    ///
    /// ```
    /// use werewolf_engine::core::SeatId;
    ///
    /// let seats: Vec<_> = SeatId::all(4).collect();
    /// assert_eq!(seats.len(), 4);
    /// assert_eq!(seats[3], SeatId::new(3));
    /// ```
    pub fn all(seat_count: usize) -> impl Iterator<Item = SeatId> {
        (0..seat_count.min(255) as u8).map(SeatId)
    }
}

impl std::fmt::Display for SeatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Why a seat left the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EliminationCause {
    /// Voted out during the day.
    Vote,
    /// Killed by the aggressors at night.
    NightKill,
}

/// Alive or eliminated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatStatus {
    Alive,
    Eliminated { day: u32, cause: EliminationCause },
}

/// Roles a seer has uncovered, one entry per successful reveal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    entries: OrdMap<SeatId, Role>,
}

impl KnowledgeRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a revealed role. Returns the previous entry, if any.
    pub fn insert(&mut self, seat: SeatId, role: Role) -> Option<Role> {
        self.entries.insert(seat, role)
    }

    #[must_use]
    pub fn get(&self, seat: SeatId) -> Option<Role> {
        self.entries.get(&seat).copied()
    }

    #[must_use]
    pub fn contains(&self, seat: SeatId) -> bool {
        self.entries.contains_key(&seat)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (seat, role) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (SeatId, Role)> + '_ {
        self.entries.iter().map(|(&seat, &role)| (seat, role))
    }
}

/// Private, role-specific memory carried by a seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityMemory {
    /// Roles without memory.
    Empty,
    /// The single most recent seat this protector shielded.
    Protector { last_protected: Option<SeatId> },
    /// Everything this seer has uncovered.
    Seer { knowledge: KnowledgeRecord },
}

impl AbilityMemory {
    /// Fresh memory for a role.
    #[must_use]
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Protector => AbilityMemory::Protector { last_protected: None },
            Role::Seer => AbilityMemory::Seer {
                knowledge: KnowledgeRecord::new(),
            },
            Role::Wolf | Role::Villager => AbilityMemory::Empty,
        }
    }
}

/// One participant at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    id: SeatId,
    name: String,
    role: Role,
    status: SeatStatus,
    memory: AbilityMemory,
}

impl Seat {
    /// Create an alive seat with fresh memory for its role.
    pub fn new(id: SeatId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            status: SeatStatus::Alive,
            memory: AbilityMemory::for_role(role),
        }
    }

    #[must_use]
    pub fn id(&self) -> SeatId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn faction(&self) -> Faction {
        self.role.faction()
    }

    #[must_use]
    pub fn status(&self) -> SeatStatus {
        self.status
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        matches!(self.status, SeatStatus::Alive)
    }

    /// The seat this protector shielded most recently. `None` for other roles.
    #[must_use]
    pub fn last_protected(&self) -> Option<SeatId> {
        match &self.memory {
            AbilityMemory::Protector { last_protected } => *last_protected,
            _ => None,
        }
    }

    /// This seer's knowledge record. `None` for other roles.
    #[must_use]
    pub fn knowledge(&self) -> Option<&KnowledgeRecord> {
        match &self.memory {
            AbilityMemory::Seer { knowledge } => Some(knowledge),
            _ => None,
        }
    }

    /// Flip to eliminated. Returns false if the seat was already out.
    pub(crate) fn eliminate(&mut self, day: u32, cause: EliminationCause) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.status = SeatStatus::Eliminated { day, cause };
        true
    }

    /// Overwrite protection memory. No-op for non-protectors.
    pub(crate) fn remember_protection(&mut self, target: SeatId) {
        if let AbilityMemory::Protector { last_protected } = &mut self.memory {
            *last_protected = Some(target);
        }
    }

    /// Add a revealed role to this seer's record. No-op for non-seers.
    pub(crate) fn learn(&mut self, target: SeatId, role: Role) {
        if let AbilityMemory::Seer { knowledge } = &mut self.memory {
            knowledge.insert(target, role);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_id_basics() {
        let s0 = SeatId::new(0);
        let s1 = SeatId::new(1);

        assert_eq!(s0.index(), 0);
        assert_eq!(s1.index(), 1);
        assert!(s0 < s1);
        assert_eq!(format!("{}", s1), "Seat 1");
    }

    #[test]
    fn test_seat_id_all() {
        let seats: Vec<_> = SeatId::all(3).collect();
        assert_eq!(seats, vec![SeatId::new(0), SeatId::new(1), SeatId::new(2)]);
    }

    #[test]
    fn test_memory_matches_role() {
        assert_eq!(
            AbilityMemory::for_role(Role::Protector),
            AbilityMemory::Protector { last_protected: None }
        );
        assert!(matches!(AbilityMemory::for_role(Role::Seer), AbilityMemory::Seer { .. }));
        assert_eq!(AbilityMemory::for_role(Role::Wolf), AbilityMemory::Empty);
        assert_eq!(AbilityMemory::for_role(Role::Villager), AbilityMemory::Empty);
    }

    #[test]
    fn test_eliminate_once() {
        let mut seat = Seat::new(SeatId::new(2), "Sofia", Role::Villager);
        assert!(seat.is_alive());

        assert!(seat.eliminate(1, EliminationCause::Vote));
        assert!(!seat.is_alive());
        assert_eq!(
            seat.status(),
            SeatStatus::Eliminated { day: 1, cause: EliminationCause::Vote }
        );

        assert!(!seat.eliminate(2, EliminationCause::NightKill));
        assert_eq!(
            seat.status(),
            SeatStatus::Eliminated { day: 1, cause: EliminationCause::Vote }
        );
    }

    #[test]
    fn test_protection_memory() {
        let mut protector = Seat::new(SeatId::new(0), "Luca", Role::Protector);
        assert_eq!(protector.last_protected(), None);

        protector.remember_protection(SeatId::new(3));
        assert_eq!(protector.last_protected(), Some(SeatId::new(3)));

        protector.remember_protection(SeatId::new(4));
        assert_eq!(protector.last_protected(), Some(SeatId::new(4)));
    }

    #[test]
    fn test_memory_ignored_for_other_roles() {
        let mut villager = Seat::new(SeatId::new(1), "Marco", Role::Villager);
        villager.remember_protection(SeatId::new(3));
        villager.learn(SeatId::new(3), Role::Wolf);

        assert_eq!(villager.last_protected(), None);
        assert!(villager.knowledge().is_none());
    }

    #[test]
    fn test_seer_learns() {
        let mut seer = Seat::new(SeatId::new(5), "Giulia", Role::Seer);
        seer.learn(SeatId::new(1), Role::Wolf);
        seer.learn(SeatId::new(0), Role::Villager);

        let knowledge = seer.knowledge().unwrap();
        assert_eq!(knowledge.len(), 2);
        assert_eq!(knowledge.get(SeatId::new(1)), Some(Role::Wolf));
        let order: Vec<_> = knowledge.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec![SeatId::new(0), SeatId::new(1)]);
    }

    #[test]
    fn test_seat_serialization() {
        let mut seat = Seat::new(SeatId::new(1), "Elena", Role::Protector);
        seat.remember_protection(SeatId::new(0));

        let json = serde_json::to_string(&seat).unwrap();
        let back: Seat = serde_json::from_str(&json).unwrap();
        assert_eq!(seat, back);
    }
}
