//! Initialization parameters for a ledger

use super::call::Amount;

/// Parameters supplied once when a ledger is created
///
/// `bank_cap` and `withdrawal_limit` are fixed for the ledger's lifetime.
/// `reentrancy_guard` turns on a second line of defense that rejects
/// state-mutating calls made while a withdrawal's payout is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Ceiling on the total value the ledger may hold at once
    pub bank_cap: Amount,

    /// Ceiling on the value moved by a single withdrawal
    pub withdrawal_limit: Amount,

    /// Reject nested deposit/withdraw calls during a payout
    pub reentrancy_guard: bool,
}

impl LedgerConfig {
    /// Create a configuration with the reentrancy guard disabled
    pub fn new(bank_cap: Amount, withdrawal_limit: Amount) -> Self {
        LedgerConfig {
            bank_cap,
            withdrawal_limit,
            reentrancy_guard: false,
        }
    }

    /// Enable or disable the reentrancy guard
    pub fn with_reentrancy_guard(mut self, enabled: bool) -> Self {
        self.reentrancy_guard = enabled;
        self
    }
}
