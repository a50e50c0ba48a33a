//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Per-identity snapshots for reporting
//! - `call`: Identifiers, amounts and ledger calls
//! - `config`: Ledger initialization parameters
//! - `error`: Error types for the ledger and the processing pipeline
//! - `event`: Notifications emitted by committed operations

pub mod account;
pub mod call;
pub mod config;
pub mod error;
pub mod event;

pub use account::AccountSnapshot;
pub use call::{Amount, CallKind, CallOutcome, Count, Identity, LedgerCall};
pub use config::LedgerConfig;
pub use error::{PipelineError, TransferError, VaultError};
pub use event::{EventRow, LedgerEvent};
