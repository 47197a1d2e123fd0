//! Role registry: the closed set of roles and per-table role counts.
//!
//! ## Key Types
//!
//! - `Role`: One of the fixed role variants
//! - `Faction`: Aggressor or town
//! - `AbilityKind`: What a role does at night (eliminate, reveal, protect, none)
//! - `UsageConstraint`: How that ability may target
//! - `RoleCounts`: How many seats receive each role

pub mod counts;
pub mod definition;

pub use counts::RoleCounts;
pub use definition::{AbilityKind, Faction, Role, RoleDefinition, UnknownRole, UsageConstraint};
