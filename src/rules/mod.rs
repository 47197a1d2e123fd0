//! Win condition evaluation.
//!
//! Consulted by the phase machine after every phase that can eliminate a
//! seat. Never declares a winner while both factions have a seat alive.

pub mod win;

pub use win::{evaluate, GameResult, WinState};
