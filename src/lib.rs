//! Vault Ledger Library
//! # Overview
//!
//! A custodial ledger that accepts deposits, pays out withdrawals through a
//! host value-transfer primitive and keeps per-identity audit counters. Call
//! files are processed by either a sync or an async strategy.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (calls, events, errors, configuration)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Balances, bank cap, withdrawal limit, counters
//!   - [`core::engine`] - All-or-nothing execution and call dispatch
//!   - [`core::journal`] - Undo journal behind checkpoint/commit/revert
//!   - [`core::event_log`] - Ordered `Deposited`/`Withdrawn` notifications
//!   - [`core::transfer`] - Host wallet behind the value-transfer seam
//! - [`io`] - CSV input and output
//! - [`strategy`] - Sync and async processing pipelines
//! - [`logging`] - tracing subscriber setup for the binary
//!
//! # Operations
//!
//! - **Deposit**: Credit the caller; fails when the total held would pass the
//!   bank cap
//! - **Withdraw**: Debit the caller and pay out; fails on insufficient
//!   balance, above the withdrawal limit, or when the payout fails
//! - **Balance**: Read one identity's balance
//! - **Held**: Read the total value held
//!
//! Any other call is rejected without effect.
//!
//! # Invariants
//!
//! - The held balance never exceeds the bank cap
//! - A failed call leaves no trace: balances, counters, totals and events
//!   are exactly as before
//! - A withdrawal's effects are recorded before its payout runs, so a payout
//!   that re-enters the ledger sees the reduced balance

pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use core::{execute, HostWallet, Ledger, ValueTransfer, VaultEngine};
pub use io::{write_accounts_csv, write_events_csv};
pub use types::{
    AccountSnapshot, Amount, CallKind, CallOutcome, Identity, LedgerCall, LedgerConfig,
    LedgerEvent, PipelineError, TransferError, VaultError,
};
