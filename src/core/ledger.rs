//! Ledger core
//!
//! This module provides the `Ledger` struct which owns every balance, counter
//! and total of the vault, together with its two immutable limits.
//!
//! The Ledger is responsible for:
//! - Enforcing the bank cap on deposits and the withdrawal limit on withdrawals
//! - Applying a withdrawal's effects before pushing value out
//! - Tracking per-identity deposit and withdrawal counts
//! - Tracking cumulative deposit and withdrawal totals
//! - Emitting a notification for each committed operation
//!
//! # Withdrawal ordering
//!
//! A withdrawal decrements the caller's balance, bumps its counters and
//! lowers the held balance *before* invoking the value-transfer primitive.
//! The primitive may call back into the ledger; any such nested call sees the
//! already-decremented balance, so the same funds cannot be withdrawn twice.
//! The ledger does not undo those effects when the transfer fails: that is
//! the job of the execution context in [`crate::core::engine`].
//!
//! # Payouts
//!
//! Value that leaves custody is recorded here, per recipient, once the
//! transfer returns successfully. The record is journaled like every other
//! field, so a payout made by a nested withdrawal is taken back when an
//! enclosing frame reverts. Within a frame,
//! `held_balance + total_paid_out == total_deposits`.
//!
//! # Held balance
//!
//! The value in custody is kept as an explicit running total updated next to
//! the balance map, so the pre-call baseline a deposit checks against is a
//! plain read.

use crate::core::event_log::EventLog;
use crate::core::journal::{Checkpoint, Journal, JournalEntry};
use crate::core::traits::ValueTransfer;
use crate::types::{
    AccountSnapshot, Amount, Count, Identity, LedgerConfig, LedgerEvent, VaultError,
};
use std::collections::HashMap;
use tracing::{debug, warn};

/// The vault's entire mutable and immutable state
#[derive(Debug, Clone)]
pub struct Ledger {
    /// Ceiling on the held balance, fixed at creation
    bank_cap: Amount,

    /// Ceiling on a single withdrawal, fixed at creation
    withdrawal_limit: Amount,

    /// Reject nested mutating calls while a payout is in flight
    reentrancy_guard: bool,

    /// Map of identities to current balances
    balances: HashMap<Identity, Amount>,

    deposit_count: HashMap<Identity, Count>,
    withdrawal_count: HashMap<Identity, Count>,

    total_deposits: Amount,
    total_withdrawals: Amount,

    /// Value delivered to each recipient by successful transfers
    paid_out: HashMap<Identity, Amount>,
    total_paid_out: Amount,

    /// Value currently in custody
    held_balance: Amount,

    events: EventLog,
    journal: Journal,

    /// Number of withdrawals currently inside their transfer
    payouts_in_flight: usize,
}

impl Ledger {
    /// Create a ledger with the given limits
    ///
    /// # Errors
    ///
    /// - `InvalidBankCap` if `bank_cap` is zero
    /// - `InvalidWithdrawalLimit` if `withdrawal_limit` is zero
    pub fn new(config: LedgerConfig) -> Result<Self, VaultError> {
        if config.bank_cap == 0 {
            return Err(VaultError::InvalidBankCap);
        }
        if config.withdrawal_limit == 0 {
            return Err(VaultError::InvalidWithdrawalLimit);
        }

        Ok(Ledger {
            bank_cap: config.bank_cap,
            withdrawal_limit: config.withdrawal_limit,
            reentrancy_guard: config.reentrancy_guard,
            balances: HashMap::new(),
            deposit_count: HashMap::new(),
            withdrawal_count: HashMap::new(),
            total_deposits: 0,
            total_withdrawals: 0,
            paid_out: HashMap::new(),
            total_paid_out: 0,
            held_balance: 0,
            events: EventLog::new(),
            journal: Journal::new(),
            payouts_in_flight: 0,
        })
    }

    pub fn bank_cap(&self) -> Amount {
        self.bank_cap
    }

    pub fn withdrawal_limit(&self) -> Amount {
        self.withdrawal_limit
    }

    pub fn reentrancy_guard(&self) -> bool {
        self.reentrancy_guard
    }

    /// Current balance of `identity`; zero if it has never deposited
    pub fn balance_of(&self, identity: Identity) -> Amount {
        self.balances.get(&identity).copied().unwrap_or(0)
    }

    /// Total value currently in the ledger's custody
    pub fn held_balance(&self) -> Amount {
        self.held_balance
    }

    /// Room left under the bank cap
    pub fn available_capacity(&self) -> Amount {
        self.bank_cap.saturating_sub(self.held_balance)
    }

    pub fn deposit_count(&self, identity: Identity) -> Count {
        self.deposit_count.get(&identity).copied().unwrap_or(0)
    }

    pub fn withdrawal_count(&self, identity: Identity) -> Count {
        self.withdrawal_count.get(&identity).copied().unwrap_or(0)
    }

    /// Sum of every committed deposit, ever
    pub fn total_deposits(&self) -> Amount {
        self.total_deposits
    }

    /// Sum of every committed withdrawal, ever
    pub fn total_withdrawals(&self) -> Amount {
        self.total_withdrawals
    }

    /// Value delivered to `identity` by successful payouts
    pub fn paid_out(&self, identity: Identity) -> Amount {
        self.paid_out.get(&identity).copied().unwrap_or(0)
    }

    /// Value delivered to all recipients
    pub fn total_paid_out(&self) -> Amount {
        self.total_paid_out
    }

    /// Notifications emitted by committed operations, in order
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Snapshot of every identity the ledger has seen, sorted by identity
    pub fn accounts(&self) -> Vec<AccountSnapshot> {
        let mut accounts: Vec<AccountSnapshot> = self
            .balances
            .iter()
            .map(|(&identity, &balance)| AccountSnapshot {
                identity,
                balance,
                deposits: self.deposit_count(identity),
                withdrawals: self.withdrawal_count(identity),
            })
            .collect();
        accounts.sort_by_key(|account| account.identity);
        accounts
    }

    /// Credit `amount` to `caller`
    ///
    /// All checks run before any state is touched, so a rejected deposit
    /// leaves the ledger exactly as it was.
    ///
    /// # Returns
    ///
    /// The held balance after the deposit.
    ///
    /// # Errors
    ///
    /// - `ZeroAmount` if `amount` is zero
    /// - `ReentrantCall` if the guard is on and a payout is in flight
    /// - `ExceedsBankCap` if `amount` is more than the room left under the cap
    pub fn deposit(&mut self, caller: Identity, amount: Amount) -> Result<Amount, VaultError> {
        if amount == 0 {
            return Err(VaultError::ZeroAmount);
        }

        self.ensure_not_reentrant(caller)?;

        let available = self.available_capacity();
        if amount > available {
            return Err(VaultError::exceeds_bank_cap(amount, available));
        }

        let new_balance = self
            .balance_of(caller)
            .checked_add(amount)
            .ok_or_else(|| VaultError::arithmetic_overflow("deposit balance"))?;
        let new_count = self
            .deposit_count(caller)
            .checked_add(1)
            .ok_or_else(|| VaultError::arithmetic_overflow("deposit count"))?;
        let new_total = self
            .total_deposits
            .checked_add(amount)
            .ok_or_else(|| VaultError::arithmetic_overflow("total deposits"))?;
        let new_held = self
            .held_balance
            .checked_add(amount)
            .ok_or_else(|| VaultError::arithmetic_overflow("held balance"))?;

        self.set_balance(caller, new_balance);
        self.set_deposit_count(caller, new_count);
        self.set_total_deposits(new_total);
        self.set_held_balance(new_held);
        self.emit(LedgerEvent::Deposited {
            identity: caller,
            amount,
            new_held_balance: new_held,
        });

        debug!(caller, %amount, held = %new_held, "deposit applied");
        Ok(new_held)
    }

    /// Debit `amount` from `caller` and pay it out through `transfer`
    ///
    /// Effects are applied before the transfer is invoked. If the transfer
    /// fails the effects stay in place and `TransferFailed` is returned; the
    /// enclosing execution frame is expected to revert them.
    ///
    /// # Returns
    ///
    /// The held balance after the withdrawal, read once the transfer returns.
    ///
    /// # Errors
    ///
    /// - `ZeroAmount` if `amount` is zero
    /// - `ReentrantCall` if the guard is on and a payout is in flight
    /// - `InsufficientBalance` if `amount` exceeds the caller's balance
    /// - `ExceedsWithdrawalLimit` if `amount` exceeds the withdrawal limit
    /// - `TransferFailed` if the value could not be moved
    pub fn withdraw(
        &mut self,
        caller: Identity,
        amount: Amount,
        transfer: &mut dyn ValueTransfer,
    ) -> Result<Amount, VaultError> {
        if amount == 0 {
            return Err(VaultError::ZeroAmount);
        }

        self.ensure_not_reentrant(caller)?;

        // Balance sufficiency is checked before the limit
        let balance = self.balance_of(caller);
        if amount > balance {
            return Err(VaultError::insufficient_balance(amount, balance));
        }

        if amount > self.withdrawal_limit {
            return Err(VaultError::exceeds_withdrawal_limit(
                amount,
                self.withdrawal_limit,
            ));
        }

        let new_balance = balance - amount;
        let new_count = self
            .withdrawal_count(caller)
            .checked_add(1)
            .ok_or_else(|| VaultError::arithmetic_overflow("withdrawal count"))?;
        let new_total = self
            .total_withdrawals
            .checked_add(amount)
            .ok_or_else(|| VaultError::arithmetic_overflow("total withdrawals"))?;
        let new_held = self
            .held_balance
            .checked_sub(amount)
            .ok_or_else(|| VaultError::arithmetic_overflow("held balance"))?;

        // Effects
        self.set_balance(caller, new_balance);
        self.set_withdrawal_count(caller, new_count);
        self.set_total_withdrawals(new_total);
        self.set_held_balance(new_held);

        // Interaction
        self.payouts_in_flight += 1;
        let outcome = transfer.transfer(self, caller, amount);
        self.payouts_in_flight -= 1;

        if let Err(e) = outcome {
            warn!(caller, %amount, reason = %e, "payout failed");
            return Err(VaultError::transfer_failed(caller, amount));
        }

        // Nested payouts may have moved these since the effects were applied
        let paid = self
            .paid_out(caller)
            .checked_add(amount)
            .ok_or_else(|| VaultError::arithmetic_overflow("paid out"))?;
        let total_paid = self
            .total_paid_out
            .checked_add(amount)
            .ok_or_else(|| VaultError::arithmetic_overflow("total paid out"))?;
        self.set_paid_out(caller, paid);
        self.set_total_paid_out(total_paid);

        let held = self.held_balance;
        self.emit(LedgerEvent::Withdrawn {
            identity: caller,
            amount,
            new_held_balance: held,
        });

        debug!(caller, %amount, held = %held, "withdrawal paid out");
        Ok(held)
    }

    /// Open an execution frame
    pub fn checkpoint(&mut self) -> Checkpoint {
        self.journal.checkpoint()
    }

    /// Close a frame keeping everything it changed
    pub fn commit(&mut self, checkpoint: Checkpoint) {
        self.journal.commit(checkpoint);
    }

    /// Close a frame restoring the state it was opened in
    pub fn revert(&mut self, checkpoint: Checkpoint) {
        for entry in self.journal.unwind(checkpoint) {
            match entry {
                JournalEntry::Balance { identity, previous } => {
                    restore(&mut self.balances, identity, previous);
                }
                JournalEntry::DepositCount { identity, previous } => {
                    restore(&mut self.deposit_count, identity, previous);
                }
                JournalEntry::WithdrawalCount { identity, previous } => {
                    restore(&mut self.withdrawal_count, identity, previous);
                }
                JournalEntry::PaidOut { identity, previous } => {
                    restore(&mut self.paid_out, identity, previous);
                }
                JournalEntry::TotalDeposits(previous) => self.total_deposits = previous,
                JournalEntry::TotalWithdrawals(previous) => self.total_withdrawals = previous,
                JournalEntry::TotalPaidOut(previous) => self.total_paid_out = previous,
                JournalEntry::HeldBalance(previous) => self.held_balance = previous,
                JournalEntry::EventAppended => {
                    self.events.retract_last();
                }
            }
        }
    }

    fn ensure_not_reentrant(&self, caller: Identity) -> Result<(), VaultError> {
        if self.reentrancy_guard && self.payouts_in_flight > 0 {
            return Err(VaultError::ReentrantCall { caller });
        }
        Ok(())
    }

    fn set_balance(&mut self, identity: Identity, balance: Amount) {
        let previous = self.balances.insert(identity, balance);
        self.journal
            .record(JournalEntry::Balance { identity, previous });
    }

    fn set_deposit_count(&mut self, identity: Identity, count: Count) {
        let previous = self.deposit_count.insert(identity, count);
        self.journal
            .record(JournalEntry::DepositCount { identity, previous });
    }

    fn set_withdrawal_count(&mut self, identity: Identity, count: Count) {
        let previous = self.withdrawal_count.insert(identity, count);
        self.journal
            .record(JournalEntry::WithdrawalCount { identity, previous });
    }

    fn set_total_deposits(&mut self, total: Amount) {
        let previous = std::mem::replace(&mut self.total_deposits, total);
        self.journal.record(JournalEntry::TotalDeposits(previous));
    }

    fn set_total_withdrawals(&mut self, total: Amount) {
        let previous = std::mem::replace(&mut self.total_withdrawals, total);
        self.journal.record(JournalEntry::TotalWithdrawals(previous));
    }

    fn set_paid_out(&mut self, identity: Identity, paid: Amount) {
        let previous = self.paid_out.insert(identity, paid);
        self.journal
            .record(JournalEntry::PaidOut { identity, previous });
    }

    fn set_total_paid_out(&mut self, total: Amount) {
        let previous = std::mem::replace(&mut self.total_paid_out, total);
        self.journal.record(JournalEntry::TotalPaidOut(previous));
    }

    fn set_held_balance(&mut self, held: Amount) {
        let previous = std::mem::replace(&mut self.held_balance, held);
        self.journal.record(JournalEntry::HeldBalance(previous));
    }

    fn emit(&mut self, event: LedgerEvent) {
        self.events.append(event);
        self.journal.record(JournalEntry::EventAppended);
    }
}

fn restore<V>(map: &mut HashMap<Identity, V>, identity: Identity, previous: Option<V>) {
    match previous {
        Some(value) => {
            map.insert(identity, value);
        }
        None => {
            map.remove(&identity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transfer::HostWallet;
    use crate::types::TransferError;
    use rstest::rstest;

    fn ledger(bank_cap: Amount, withdrawal_limit: Amount) -> Ledger {
        Ledger::new(LedgerConfig::new(bank_cap, withdrawal_limit)).unwrap()
    }

    #[rstest]
    #[case::zero_cap(0, 1, VaultError::InvalidBankCap)]
    #[case::zero_limit(1, 0, VaultError::InvalidWithdrawalLimit)]
    #[case::both_zero(0, 0, VaultError::InvalidBankCap)]
    fn test_new_rejects_zero_limits(
        #[case] bank_cap: Amount,
        #[case] withdrawal_limit: Amount,
        #[case] expected: VaultError,
    ) {
        let result = Ledger::new(LedgerConfig::new(bank_cap, withdrawal_limit));
        assert_eq!(result.unwrap_err(), expected);
    }

    #[test]
    fn test_new_creates_empty_ledger() {
        let ledger = ledger(10, 1);

        assert_eq!(ledger.bank_cap(), 10);
        assert_eq!(ledger.withdrawal_limit(), 1);
        assert_eq!(ledger.held_balance(), 0);
        assert_eq!(ledger.total_deposits(), 0);
        assert_eq!(ledger.total_withdrawals(), 0);
        assert_eq!(ledger.available_capacity(), 10);
        assert!(ledger.accounts().is_empty());
        assert!(ledger.events().is_empty());
    }

    #[test]
    fn test_absent_identity_reads_as_zero() {
        let ledger = ledger(10, 1);

        assert_eq!(ledger.balance_of(42), 0);
        assert_eq!(ledger.deposit_count(42), 0);
        assert_eq!(ledger.withdrawal_count(42), 0);
    }

    #[test]
    fn test_deposit_credits_balance_and_counters() {
        let mut ledger = ledger(100, 10);

        let held = ledger.deposit(1, 30).unwrap();

        assert_eq!(held, 30);
        assert_eq!(ledger.balance_of(1), 30);
        assert_eq!(ledger.deposit_count(1), 1);
        assert_eq!(ledger.total_deposits(), 30);
        assert_eq!(ledger.held_balance(), 30);
        assert_eq!(
            ledger.events().last(),
            Some(&LedgerEvent::Deposited {
                identity: 1,
                amount: 30,
                new_held_balance: 30,
            })
        );
    }

    #[test]
    fn test_deposit_multiple_times_accumulates() {
        let mut ledger = ledger(100, 10);

        ledger.deposit(1, 10).unwrap();
        ledger.deposit(1, 25).unwrap();
        ledger.deposit(1, 5).unwrap();

        assert_eq!(ledger.balance_of(1), 40);
        assert_eq!(ledger.deposit_count(1), 3);
        assert_eq!(ledger.total_deposits(), 40);
    }

    #[test]
    fn test_deposit_for_multiple_identities_shares_cap() {
        let mut ledger = ledger(50, 10);

        ledger.deposit(1, 20).unwrap();
        ledger.deposit(2, 20).unwrap();

        let result = ledger.deposit(3, 11);
        assert_eq!(result.unwrap_err(), VaultError::exceeds_bank_cap(11, 10));

        assert_eq!(ledger.held_balance(), 40);
        assert_eq!(ledger.balance_of(3), 0);
        assert_eq!(ledger.deposit_count(3), 0);
    }

    #[test]
    fn test_deposit_up_to_exact_cap_succeeds() {
        let mut ledger = ledger(10, 1);

        ledger.deposit(1, 10).unwrap();

        assert_eq!(ledger.held_balance(), 10);
        assert_eq!(ledger.available_capacity(), 0);
    }

    #[test]
    fn test_deposit_zero_fails() {
        let mut ledger = ledger(10, 1);

        assert_eq!(ledger.deposit(1, 0).unwrap_err(), VaultError::ZeroAmount);
        assert!(ledger.accounts().is_empty());
    }

    #[test]
    fn test_rejected_deposit_leaves_state_unchanged() {
        let mut ledger = ledger(10, 1);
        ledger.deposit(1, 10).unwrap();

        let result = ledger.deposit(1, 1);

        assert_eq!(result.unwrap_err(), VaultError::exceeds_bank_cap(1, 0));
        assert_eq!(ledger.balance_of(1), 10);
        assert_eq!(ledger.deposit_count(1), 1);
        assert_eq!(ledger.total_deposits(), 10);
        assert_eq!(ledger.events().len(), 1);
    }

    #[test]
    fn test_withdraw_debits_and_pays_out() {
        let mut ledger = ledger(100, 10);
        let mut wallet = HostWallet::new();
        ledger.deposit(1, 30).unwrap();

        let held = ledger.withdraw(1, 10, &mut wallet).unwrap();

        assert_eq!(held, 20);
        assert_eq!(ledger.balance_of(1), 20);
        assert_eq!(ledger.withdrawal_count(1), 1);
        assert_eq!(ledger.total_withdrawals(), 10);
        assert_eq!(ledger.total_deposits(), 30);
        assert_eq!(ledger.paid_out(1), 10);
        assert_eq!(ledger.total_paid_out(), 10);
        assert_eq!(
            ledger.events().last(),
            Some(&LedgerEvent::Withdrawn {
                identity: 1,
                amount: 10,
                new_held_balance: 20,
            })
        );
    }

    #[test]
    fn test_withdraw_entire_balance_keeps_identity() {
        let mut ledger = ledger(100, 10);
        let mut wallet = HostWallet::new();
        ledger.deposit(1, 5).unwrap();

        ledger.withdraw(1, 5, &mut wallet).unwrap();

        assert_eq!(ledger.balance_of(1), 0);
        assert_eq!(ledger.accounts(), vec![AccountSnapshot {
            identity: 1,
            balance: 0,
            deposits: 1,
            withdrawals: 1,
        }]);
    }

    #[rstest]
    #[case::zero(0, VaultError::ZeroAmount)]
    #[case::over_balance(6, VaultError::insufficient_balance(6, 5))]
    #[case::over_limit(4, VaultError::exceeds_withdrawal_limit(4, 3))]
    fn test_withdraw_rejections(#[case] amount: Amount, #[case] expected: VaultError) {
        let mut ledger = ledger(100, 3);
        let mut wallet = HostWallet::new();
        ledger.deposit(1, 5).unwrap();

        let result = ledger.withdraw(1, amount, &mut wallet);

        assert_eq!(result.unwrap_err(), expected);
        assert_eq!(ledger.balance_of(1), 5);
        assert_eq!(ledger.withdrawal_count(1), 0);
        assert_eq!(ledger.total_paid_out(), 0);
    }

    #[test]
    fn test_balance_check_precedes_limit_check() {
        let mut ledger = ledger(100, 1);
        let mut wallet = HostWallet::new();
        ledger.deposit(1, 1).unwrap();

        // Over both the balance and the limit
        let result = ledger.withdraw(1, 5, &mut wallet);

        assert_eq!(result.unwrap_err(), VaultError::insufficient_balance(5, 1));
    }

    #[test]
    fn test_failed_transfer_leaves_effects_for_caller_to_revert() {
        let mut ledger = ledger(100, 10);
        let mut wallet = HostWallet::rejecting([1]);
        ledger.deposit(1, 8).unwrap();

        let result = ledger.withdraw(1, 5, &mut wallet);

        assert_eq!(result.unwrap_err(), VaultError::transfer_failed(1, 5));
        // No frame was open, so nothing is rolled back here
        assert_eq!(ledger.balance_of(1), 3);
        assert_eq!(ledger.held_balance(), 3);
        assert_eq!(ledger.paid_out(1), 0);
    }

    #[test]
    fn test_transfer_observes_effects_already_applied() {
        let mut ledger = ledger(100, 10);
        ledger.deposit(1, 8).unwrap();

        let mut seen = None;
        let mut observe = |ledger: &mut Ledger, to: Identity, _amount: Amount| {
            seen = Some((ledger.balance_of(to), ledger.held_balance()));
            Ok::<(), TransferError>(())
        };

        ledger.withdraw(1, 5, &mut observe).unwrap();

        assert_eq!(seen, Some((3, 3)));
    }

    #[test]
    fn test_revert_restores_frame_state() {
        let mut ledger = ledger(100, 10);
        let mut wallet = HostWallet::new();
        ledger.deposit(1, 10).unwrap();

        let checkpoint = ledger.checkpoint();
        ledger.deposit(2, 7).unwrap();
        ledger.withdraw(1, 4, &mut wallet).unwrap();
        ledger.revert(checkpoint);

        assert_eq!(ledger.balance_of(1), 10);
        assert_eq!(ledger.balance_of(2), 0);
        assert_eq!(ledger.deposit_count(2), 0);
        assert_eq!(ledger.withdrawal_count(1), 0);
        assert_eq!(ledger.total_deposits(), 10);
        assert_eq!(ledger.total_withdrawals(), 0);
        assert_eq!(ledger.held_balance(), 10);
        assert_eq!(ledger.paid_out(1), 0);
        assert_eq!(ledger.total_paid_out(), 0);
        assert_eq!(ledger.events().len(), 1);
        assert_eq!(ledger.accounts().len(), 1);
    }

    #[test]
    fn test_commit_keeps_frame_state() {
        let mut ledger = ledger(100, 10);

        let checkpoint = ledger.checkpoint();
        ledger.deposit(2, 7).unwrap();
        ledger.commit(checkpoint);

        assert_eq!(ledger.balance_of(2), 7);
        assert_eq!(ledger.events().len(), 1);
    }

    #[test]
    fn test_guard_rejects_nested_mutation() {
        let config = LedgerConfig::new(100, 10).with_reentrancy_guard(true);
        let mut ledger = Ledger::new(config).unwrap();
        ledger.deposit(1, 8).unwrap();

        let mut nested = None;
        let mut reenter = |ledger: &mut Ledger, to: Identity, _amount: Amount| {
            nested = Some(ledger.deposit(to, 1));
            Ok::<(), TransferError>(())
        };

        ledger.withdraw(1, 2, &mut reenter).unwrap();

        assert_eq!(nested, Some(Err(VaultError::ReentrantCall { caller: 1 })));
        assert_eq!(ledger.balance_of(1), 6);
    }

    #[rstest]
    #[case::deposit(true)]
    #[case::withdraw(false)]
    fn test_zero_amount_wins_over_guard(#[case] deposit: bool) {
        let config = LedgerConfig::new(100, 10).with_reentrancy_guard(true);
        let mut ledger = Ledger::new(config).unwrap();
        ledger.deposit(1, 8).unwrap();

        let mut nested = None;
        let mut reenter = |ledger: &mut Ledger, to: Identity, _amount: Amount| {
            let mut wallet = HostWallet::new();
            nested = Some(if deposit {
                ledger.deposit(to, 0)
            } else {
                ledger.withdraw(to, 0, &mut wallet)
            });
            Ok::<(), TransferError>(())
        };

        ledger.withdraw(1, 2, &mut reenter).unwrap();

        assert_eq!(nested, Some(Err(VaultError::ZeroAmount)));
    }

    #[test]
    fn test_guard_does_not_block_sequential_calls() {
        let config = LedgerConfig::new(100, 10).with_reentrancy_guard(true);
        let mut ledger = Ledger::new(config).unwrap();
        let mut wallet = HostWallet::new();

        ledger.deposit(1, 8).unwrap();
        ledger.withdraw(1, 2, &mut wallet).unwrap();
        ledger.deposit(1, 1).unwrap();

        assert_eq!(ledger.balance_of(1), 7);
    }

    #[test]
    fn test_accounts_sorted_by_identity() {
        let mut ledger = ledger(100, 10);

        ledger.deposit(3, 1).unwrap();
        ledger.deposit(1, 2).unwrap();
        ledger.deposit(2, 3).unwrap();

        let identities: Vec<Identity> = ledger.accounts().iter().map(|a| a.identity).collect();
        assert_eq!(identities, vec![1, 2, 3]);
    }
}
