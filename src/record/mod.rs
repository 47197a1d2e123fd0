//! Audience-scoped game events and the sinks that receive them.

pub mod event;
pub mod sink;

pub use event::{Audience, Envelope, FinalSeat, GameEvent};
pub use sink::{MemorySink, NullSink, RecordSink, TracingSink};
