//! Append-only notification log
//!
//! This module provides the EventLog component that keeps the ordered record
//! of committed deposits and withdrawals for external auditors. The ledger
//! never reads it back for its own decisions.
//!
//! # Ordering
//!
//! Events are kept in commit order. A withdrawal's event is appended after its
//! payout returns, so events of calls nested inside that payout come first.

use crate::types::LedgerEvent;

/// Ordered log of ledger notifications
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<LedgerEvent>,
}

impl EventLog {
    /// Create an empty event log
    pub fn new() -> Self {
        EventLog { events: Vec::new() }
    }

    /// Append an event
    pub(crate) fn append(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    /// Drop the newest event
    ///
    /// Only the journal calls this, when the call that emitted the event is
    /// reverted.
    pub(crate) fn retract_last(&mut self) -> Option<LedgerEvent> {
        self.events.pop()
    }

    /// All events in commit order
    pub fn as_slice(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Most recent event, if any
    pub fn last(&self) -> Option<&LedgerEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LedgerEvent> {
        self.events.iter()
    }
}
