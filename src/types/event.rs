//! Notifications emitted by the ledger
//!
//! One event is appended per committed deposit or withdrawal. Events belong to
//! the call that produced them: when a call is reverted its events are
//! discarded together with its state changes.

use super::call::{Amount, Identity};
use serde::Serialize;

/// An entry in the ledger's append-only notification log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEvent {
    /// Value was credited to `identity`
    Deposited {
        identity: Identity,
        amount: Amount,
        new_held_balance: Amount,
    },

    /// Value was debited from `identity` and paid out
    Withdrawn {
        identity: Identity,
        amount: Amount,
        new_held_balance: Amount,
    },
}

impl LedgerEvent {
    /// Event name as exported to auditors
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::Deposited { .. } => "deposited",
            LedgerEvent::Withdrawn { .. } => "withdrawn",
        }
    }

    /// Identity the event concerns
    pub fn identity(&self) -> Identity {
        match *self {
            LedgerEvent::Deposited { identity, .. } | LedgerEvent::Withdrawn { identity, .. } => {
                identity
            }
        }
    }

    /// Amount moved by the operation
    pub fn amount(&self) -> Amount {
        match *self {
            LedgerEvent::Deposited { amount, .. } | LedgerEvent::Withdrawn { amount, .. } => amount,
        }
    }

    /// Held balance right after the operation committed
    pub fn new_held_balance(&self) -> Amount {
        match *self {
            LedgerEvent::Deposited {
                new_held_balance, ..
            }
            | LedgerEvent::Withdrawn {
                new_held_balance, ..
            } => new_held_balance,
        }
    }
}

/// Flat row used when exporting events to CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRow {
    pub event: &'static str,
    pub identity: Identity,
    pub amount: Amount,
    pub held_balance: Amount,
}

impl From<&LedgerEvent> for EventRow {
    fn from(event: &LedgerEvent) -> Self {
        EventRow {
            event: event.name(),
            identity: event.identity(),
            amount: event.amount(),
            held_balance: event.new_held_balance(),
        }
    }
}
