//! Record sinks.
//!
//! The engine emits envelopes in order and never reads them back. A sink
//! decides what to do with them: keep them, log them or drop them.

use tracing::debug;

use crate::core::SeatId;
use crate::roles::Faction;

use super::event::{Envelope, GameEvent};

/// Receives every envelope the engine emits, in sequence order.
pub trait RecordSink: Send {
    fn record(&mut self, envelope: &Envelope);
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn record(&mut self, envelope: &Envelope) {
        (**self).record(envelope);
    }
}

/// Keeps every envelope in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    envelopes: Vec<Envelope>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All envelopes, in order.
    #[must_use]
    pub fn envelopes(&self) -> &[Envelope] {
        &self.envelopes
    }

    /// All events, in order, ignoring audiences.
    pub fn events(&self) -> impl Iterator<Item = &GameEvent> {
        self.envelopes.iter().map(|e| &e.event)
    }

    /// Envelopes one seat may see.
    pub fn visible_to(&self, seat: SeatId, faction: Faction) -> impl Iterator<Item = &Envelope> {
        self.envelopes
            .iter()
            .filter(move |e| e.visible_to(seat, faction))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.envelopes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.envelopes.is_empty()
    }
}

impl RecordSink for MemorySink {
    fn record(&mut self, envelope: &Envelope) {
        self.envelopes.push(envelope.clone());
    }
}

/// Forwards envelopes to `tracing` at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl RecordSink for TracingSink {
    fn record(&mut self, envelope: &Envelope) {
        debug!(
            sequence = envelope.sequence,
            day = envelope.day,
            audience = ?envelope.audience,
            event = ?envelope.event,
            "game event"
        );
    }
}

/// Drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl RecordSink for NullSink {
    fn record(&mut self, _envelope: &Envelope) {}
}
