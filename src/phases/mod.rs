//! Phase state machine, discussion rounds and the final report.

pub mod discussion;
pub mod machine;
pub mod report;

pub use discussion::{discuss, Channel};
pub use machine::Game;
pub use report::{GameReport, GameStats};
