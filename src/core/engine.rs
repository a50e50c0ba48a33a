//! Call execution engine
//!
//! This module provides the all-or-nothing execution context around the
//! [`Ledger`]. Every call runs inside a journaled frame: if the call fails for
//! any reason, every mutation it made (balances, counters, totals, payouts, held
//! balance and events) is reverted before the error is returned.
//!
//! The engine also owns the dispatch table: a call whose selector names no
//! ledger operation falls through to the fallback and fails with
//! `InvalidCall` without touching state.

use crate::core::ledger::Ledger;
use crate::core::traits::ValueTransfer;
use crate::types::{
    AccountSnapshot, CallKind, CallOutcome, LedgerCall, LedgerConfig, VaultError,
};
use tracing::debug;

/// Run `call` against `ledger` as one atomic frame
///
/// This is also the entry point for calls made from inside a payout: a
/// nested call opens its own frame, so its failure reverts only its own
/// effects and leaves the enclosing withdrawal to decide what to do.
///
/// # Errors
///
/// Any `VaultError` raised by the dispatched operation. State is unchanged
/// when an error is returned.
pub fn execute(
    ledger: &mut Ledger,
    call: &LedgerCall,
    transfer: &mut dyn ValueTransfer,
) -> Result<CallOutcome, VaultError> {
    let checkpoint = ledger.checkpoint();

    match dispatch(ledger, call, transfer) {
        Ok(outcome) => {
            ledger.commit(checkpoint);
            debug!(op = call.kind.selector(), caller = call.caller, ?outcome, "call committed");
            Ok(outcome)
        }
        Err(e) => {
            ledger.revert(checkpoint);
            debug!(op = call.kind.selector(), caller = call.caller, error = %e, "call reverted");
            Err(e)
        }
    }
}

/// Route a call to the matching ledger operation
///
/// A missing amount on a deposit or withdrawal is treated as zero and
/// rejected by the operation itself.
fn dispatch(
    ledger: &mut Ledger,
    call: &LedgerCall,
    transfer: &mut dyn ValueTransfer,
) -> Result<CallOutcome, VaultError> {
    let amount = call.amount.unwrap_or(0);

    match &call.kind {
        CallKind::Deposit => ledger
            .deposit(call.caller, amount)
            .map(|new_held_balance| CallOutcome::Deposited { new_held_balance }),
        CallKind::Withdraw => ledger
            .withdraw(call.caller, amount, transfer)
            .map(|new_held_balance| CallOutcome::Withdrawn { new_held_balance }),
        CallKind::Balance => Ok(CallOutcome::Balance(ledger.balance_of(call.caller))),
        CallKind::Held => Ok(CallOutcome::HeldBalance(ledger.held_balance())),
        CallKind::Unrecognized(selector) => Err(VaultError::invalid_call(selector)),
    }
}

/// Vault engine
///
/// Pairs a ledger with the host's value-transfer primitive and runs every
/// call through [`execute`].
#[derive(Debug)]
pub struct VaultEngine<T: ValueTransfer> {
    ledger: Ledger,
    transfer: T,
}

impl<T: ValueTransfer> VaultEngine<T> {
    /// Create an engine with a fresh ledger
    ///
    /// # Errors
    ///
    /// `InvalidBankCap` or `InvalidWithdrawalLimit` if the configuration is
    /// rejected by [`Ledger::new`].
    pub fn new(config: LedgerConfig, transfer: T) -> Result<Self, VaultError> {
        Ok(VaultEngine {
            ledger: Ledger::new(config)?,
            transfer,
        })
    }

    /// Process a single call atomically
    pub fn process(&mut self, call: &LedgerCall) -> Result<CallOutcome, VaultError> {
        execute(&mut self.ledger, call, &mut self.transfer)
    }

    /// Read access to the ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Read access to the transfer primitive
    pub fn transfer(&self) -> &T {
        &self.transfer
    }

    /// Get final account states for output
    pub fn accounts(&self) -> Vec<AccountSnapshot> {
        self.ledger.accounts()
    }

    /// Split the engine back into its parts
    pub fn into_parts(self) -> (Ledger, T) {
        (self.ledger, self.transfer)
    }
}
