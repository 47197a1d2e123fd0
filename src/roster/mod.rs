//! Roster: count validation and role assignment.
//!
//! The roster is consulted read-only by every other component once the
//! game starts. Seats change only through the elimination transition on
//! `GameState`.

pub mod assignment;

pub use assignment::{assign_roles, build_seats, teammates, validate_counts, MAX_SEATS, MIN_SEATS};
