//! Account-related types for the vault ledger
//!
//! This module defines the per-identity view the ledger hands out for
//! reporting. The ledger itself keeps balances and counters in separate maps;
//! an [`AccountSnapshot`] joins them for a single identity.

use super::call::{Amount, Count, Identity};

/// Point-in-time view of one identity's slice of the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    /// The identity this snapshot belongs to
    pub identity: Identity,

    /// Current balance held on behalf of the identity
    pub balance: Amount,

    /// Number of successful deposits made by the identity
    pub deposits: Count,

    /// Number of successful withdrawals made by the identity
    pub withdrawals: Count,
}
