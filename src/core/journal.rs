//! Undo journal backing the all-or-nothing execution context
//!
//! Every ledger mutation made while a frame is open records how to undo
//! itself. A frame is opened with [`Journal::checkpoint`] and closed either by
//! [`Journal::commit`], which keeps its entries for any enclosing frame, or by
//! [`Journal::unwind`], which hands back the entries recorded since the
//! checkpoint in reverse order so the ledger can restore them.
//!
//! Frames nest: a call made from inside a payout opens its own frame, and a
//! failure there only unwinds that frame. Entries are dropped once the
//! outermost frame commits, so the journal never outlives a top-level call.

use crate::types::{Amount, Count, Identity};

/// A single undo record
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum JournalEntry {
    /// A balance was written; `previous` is `None` if the key was absent
    Balance {
        identity: Identity,
        previous: Option<Amount>,
    },
    DepositCount {
        identity: Identity,
        previous: Option<Count>,
    },
    WithdrawalCount {
        identity: Identity,
        previous: Option<Count>,
    },
    /// A payout was recorded for `identity`
    PaidOut {
        identity: Identity,
        previous: Option<Amount>,
    },
    TotalDeposits(Amount),
    TotalWithdrawals(Amount),
    TotalPaidOut(Amount),
    HeldBalance(Amount),
    /// An event was appended to the log
    EventAppended,
}

/// Position in the journal a frame can be committed or unwound to
///
/// Deliberately not `Clone`: each checkpoint closes exactly one frame.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a checkpoint must be committed or reverted"]
pub struct Checkpoint {
    len: usize,
}

/// Stack of undo records for the currently open frames
#[derive(Debug, Clone, Default)]
pub(crate) struct Journal {
    entries: Vec<JournalEntry>,
    depth: usize,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an undo entry if any frame is open
    ///
    /// Mutations made outside a frame (direct library use of the ledger)
    /// are not journaled and cannot be reverted.
    pub fn record(&mut self, entry: JournalEntry) {
        if self.depth > 0 {
            self.entries.push(entry);
        }
    }

    /// Open a frame
    pub fn checkpoint(&mut self) -> Checkpoint {
        self.depth += 1;
        Checkpoint {
            len: self.entries.len(),
        }
    }

    /// Close a frame keeping its effects
    pub fn commit(&mut self, checkpoint: Checkpoint) {
        debug_assert!(checkpoint.len <= self.entries.len());
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.entries.clear();
        }
    }

    /// Close a frame discarding its effects
    ///
    /// Returns the frame's entries newest first.
    pub fn unwind(&mut self, checkpoint: Checkpoint) -> Vec<JournalEntry> {
        self.depth = self.depth.saturating_sub(1);
        let mut undone = self.entries.split_off(checkpoint.len.min(self.entries.len()));
        undone.reverse();
        if self.depth == 0 {
            self.entries.clear();
        }
        undone
    }

    #[cfg(test)]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
