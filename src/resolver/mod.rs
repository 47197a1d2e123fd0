//! Action resolver: fetch decisions, judge them, apply night actions.
//!
//! ## Flow
//!
//! 1. `gather_actions` builds one request per actor and fans them out
//! 2. `collect_decisions` waits for all of them (timeouts become passes)
//! 3. `judge` validates each target against the live state
//! 4. `resolve_night` applies protections, then the kill, then reveals

pub mod collect;
pub mod gather;
pub mod night;
pub mod validate;

pub use collect::{collect_decisions, Collected};
pub use gather::gather_actions;
pub use night::{resolve_night, NightPlan, NightReport, Reveal};
pub use validate::{eligible_targets, judge, usage_constraint, validate_target};
