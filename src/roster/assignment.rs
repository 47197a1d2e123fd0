//! Role-count validation and seeded role assignment.
//!
//! Assignment expands the requested counts into a role list in canonical
//! order, then shuffles it with Fisher-Yates on a dedicated RNG stream.
//! The same seed always deals the same table.

use tracing::debug;

use crate::core::{GameConfig, GameRng, Seat, SeatId};
use crate::error::ConfigurationError;
use crate::roles::{Faction, Role, RoleCounts};

/// Smallest playable table.
pub const MIN_SEATS: usize = 3;

/// Largest table a `SeatId` can address.
pub const MAX_SEATS: usize = u8::MAX as usize;

/// Check that `counts` describes a legal table of `seat_count` seats.
///
/// Rules, checked in order:
/// - between `MIN_SEATS` and `MAX_SEATS` seats
/// - counts add up to exactly `seat_count`
/// - at least one aggressor and one town seat
/// - aggressors are strictly fewer than half the table
pub fn validate_counts(seat_count: usize, counts: &RoleCounts) -> Result<(), ConfigurationError> {
    if seat_count < MIN_SEATS {
        return Err(ConfigurationError::TooFewSeats {
            min: MIN_SEATS,
            got: seat_count,
        });
    }
    if seat_count > MAX_SEATS {
        return Err(ConfigurationError::TooManySeats(seat_count));
    }

    let assigned = counts.total();
    if assigned != seat_count as u64 {
        return Err(ConfigurationError::CountMismatch {
            assigned,
            seats: seat_count,
        });
    }

    let aggressors = counts.faction_total(Faction::Aggressor);
    if aggressors == 0 {
        return Err(ConfigurationError::NoAggressors);
    }
    if counts.faction_total(Faction::Town) == 0 {
        return Err(ConfigurationError::NoTown);
    }
    if aggressors * 2 >= seat_count as u64 {
        return Err(ConfigurationError::AggressorMajority {
            aggressors,
            seats: seat_count,
        });
    }
    Ok(())
}

/// Deal roles for a validated table. `result[i]` is the role of `SeatId(i)`.
pub fn assign_roles(
    seat_count: usize,
    counts: &RoleCounts,
    rng: &GameRng,
) -> Result<Vec<Role>, ConfigurationError> {
    validate_counts(seat_count, counts)?;

    let mut roles = counts.expand();
    let mut stream = rng.for_context("roster");
    stream.shuffle(&mut roles);
    Ok(roles)
}

/// Build the seats for a configuration, names included.
pub fn build_seats(config: &GameConfig, rng: &GameRng) -> Result<Vec<Seat>, ConfigurationError> {
    config.validate()?;

    let roles = assign_roles(config.seat_count, &config.role_counts, rng)?;
    let seats: Vec<Seat> = SeatId::all(config.seat_count)
        .zip(roles)
        .map(|(id, role)| Seat::new(id, config.seat_name(id.index()), role))
        .collect();

    debug!(seats = seats.len(), seed = rng.seed(), "roles assigned");
    Ok(seats)
}

/// Aggressor seats other than `seat`. Empty for town seats.
#[must_use]
pub fn teammates(seats: &[Seat], seat: SeatId) -> Vec<SeatId> {
    let Some(me) = seats.get(seat.index()) else {
        return Vec::new();
    };
    if me.faction() != Faction::Aggressor {
        return Vec::new();
    }
    seats
        .iter()
        .filter(|s| s.faction() == Faction::Aggressor && s.id() != seat)
        .map(Seat::id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(wolves: u32, seers: u32, protectors: u32, villagers: u32) -> RoleCounts {
        RoleCounts::new()
            .with(Role::Wolf, wolves)
            .with(Role::Seer, seers)
            .with(Role::Protector, protectors)
            .with(Role::Villager, villagers)
    }

    #[test]
    fn test_validate_accepts_standard_tables() {
        assert!(validate_counts(8, &counts(2, 1, 0, 5)).is_ok());
        assert!(validate_counts(10, &counts(3, 1, 1, 5)).is_ok());
        assert!(validate_counts(3, &counts(1, 0, 0, 2)).is_ok());
    }

    #[test]
    fn test_validate_rejections() {
        assert_eq!(
            validate_counts(2, &counts(1, 0, 0, 1)),
            Err(ConfigurationError::TooFewSeats { min: 3, got: 2 })
        );
        assert_eq!(
            validate_counts(0, &RoleCounts::new()),
            Err(ConfigurationError::TooFewSeats { min: 3, got: 0 })
        );
        assert_eq!(
            validate_counts(300, &counts(1, 0, 0, 299)),
            Err(ConfigurationError::TooManySeats(300))
        );
        assert_eq!(
            validate_counts(8, &counts(2, 1, 0, 4)),
            Err(ConfigurationError::CountMismatch { assigned: 7, seats: 8 })
        );
        assert_eq!(
            validate_counts(5, &counts(0, 1, 0, 4)),
            Err(ConfigurationError::NoAggressors)
        );
        assert_eq!(
            validate_counts(8, &counts(4, 1, 0, 3)),
            Err(ConfigurationError::AggressorMajority { aggressors: 4, seats: 8 })
        );
    }

    #[test]
    fn test_assignment_matches_counts() {
        let requested = counts(3, 1, 1, 5);
        let roles = assign_roles(10, &requested, &GameRng::new(42)).unwrap();

        assert_eq!(roles.len(), 10);
        for &role in Role::all() {
            let dealt = roles.iter().filter(|&&r| r == role).count() as u32;
            assert_eq!(dealt, requested.get(role), "{role}");
        }
    }

    #[test]
    fn test_assignment_is_seeded() {
        let requested = counts(3, 1, 1, 5);
        let a = assign_roles(10, &requested, &GameRng::new(7)).unwrap();
        let b = assign_roles(10, &requested, &GameRng::new(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_seats_uses_names() {
        let config = GameConfig::new(4)
            .with_role(Role::Wolf, 1)
            .with_role(Role::Villager, 3)
            .with_seat_names(["Anna", "Bruno", "Carla", "Dario"]);

        let seats = build_seats(&config, &GameRng::new(3)).unwrap();
        let names: Vec<_> = seats.iter().map(Seat::name).collect();
        assert_eq!(names, vec!["Anna", "Bruno", "Carla", "Dario"]);
        assert!(seats.iter().all(Seat::is_alive));
        assert_eq!(seats.iter().filter(|s| s.role() == Role::Wolf).count(), 1);
    }

    #[test]
    fn test_teammates() {
        let seats = vec![
            Seat::new(SeatId::new(0), "A", Role::Wolf),
            Seat::new(SeatId::new(1), "B", Role::Villager),
            Seat::new(SeatId::new(2), "C", Role::Wolf),
            Seat::new(SeatId::new(3), "D", Role::Seer),
            Seat::new(SeatId::new(4), "E", Role::Villager),
        ];

        assert_eq!(teammates(&seats, SeatId::new(0)), vec![SeatId::new(2)]);
        assert_eq!(teammates(&seats, SeatId::new(2)), vec![SeatId::new(0)]);
        assert!(teammates(&seats, SeatId::new(1)).is_empty());
        assert!(teammates(&seats, SeatId::new(9)).is_empty());
    }
}
