//! Core business logic module
//!
//! This module contains the ledger and the collaborators it runs with:
//! - `ledger` - Balances, limits, counters and the withdrawal ordering
//! - `engine` - All-or-nothing execution context and call dispatch
//! - `journal` - Undo records backing checkpoint/commit/revert
//! - `event_log` - Append-only notification log
//! - `traits` - The value-transfer seam to the host environment
//! - `transfer` - Host wallet implementation of the value-transfer seam

pub mod engine;
pub mod event_log;
pub mod journal;
pub mod ledger;
pub mod traits;
pub mod transfer;

pub use engine::{execute, VaultEngine};
pub use event_log::EventLog;
pub use journal::Checkpoint;
pub use ledger::Ledger;
pub use traits::ValueTransfer;
pub use transfer::HostWallet;
