//! Error types for the vault ledger
//!
//! This module defines all error types that can occur while operating the
//! ledger and while feeding it from a call file.
//!
//! # Error Categories
//!
//! - **Initialization Errors**: Zero bank cap or zero withdrawal limit
//! - **Call Errors**: Zero amounts, cap and limit violations, insufficient
//!   balance, failed payouts, unrecognized calls, reentrant calls
//! - **Pipeline Errors**: File not found, I/O failures, malformed CSV

use super::call::{Amount, Identity};
use thiserror::Error;

/// Main error type for the ledger
///
/// Every rejected call surfaces exactly one of these variants. Variants carry
/// the offending values rather than free text so callers can act on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    /// Bank cap of zero supplied at initialization
    ///
    /// Fatal to construction: no ledger is produced.
    #[error("Bank cap must be greater than zero")]
    InvalidBankCap,

    /// Withdrawal limit of zero supplied at initialization
    ///
    /// Fatal to construction: no ledger is produced.
    #[error("Withdrawal limit must be greater than zero")]
    InvalidWithdrawalLimit,

    /// An operation received zero where a positive value was required
    #[error("Amount must be greater than zero")]
    ZeroAmount,

    /// Deposit would push the held balance past the bank cap
    #[error("Deposit of {attempted} exceeds bank cap: {available} available")]
    ExceedsBankCap {
        /// Amount the caller tried to deposit
        attempted: Amount,
        /// Remaining capacity before the call
        available: Amount,
    },

    /// Withdrawal exceeds the caller's own balance
    #[error("Insufficient balance: requested {requested}, balance {balance}")]
    InsufficientBalance {
        /// Amount the caller tried to withdraw
        requested: Amount,
        /// Caller's balance at the time of the call
        balance: Amount,
    },

    /// Withdrawal exceeds the fixed per-call ceiling
    #[error("Withdrawal of {requested} exceeds limit of {limit}")]
    ExceedsWithdrawalLimit {
        /// Amount the caller tried to withdraw
        requested: Amount,
        /// Configured withdrawal limit
        limit: Amount,
    },

    /// The outbound value movement did not succeed
    #[error("Transfer of {amount} to {to} failed")]
    TransferFailed {
        /// Intended recipient
        to: Identity,
        /// Amount that could not be moved
        amount: Amount,
    },

    /// The call did not name a known operation
    #[error("Invalid call '{selector}'")]
    InvalidCall {
        /// Selector as received
        selector: String,
    },

    /// A state-mutating call arrived while a payout was in flight
    ///
    /// Only raised when the reentrancy guard is enabled.
    #[error("Reentrant call from {caller} rejected")]
    ReentrantCall {
        /// Identity that attempted the nested call
        caller: Identity,
    },

    /// Checked arithmetic on a counter or total failed
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },
}

impl VaultError {
    /// Create an ExceedsBankCap error
    pub fn exceeds_bank_cap(attempted: Amount, available: Amount) -> Self {
        VaultError::ExceedsBankCap {
            attempted,
            available,
        }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(requested: Amount, balance: Amount) -> Self {
        VaultError::InsufficientBalance { requested, balance }
    }

    /// Create an ExceedsWithdrawalLimit error
    pub fn exceeds_withdrawal_limit(requested: Amount, limit: Amount) -> Self {
        VaultError::ExceedsWithdrawalLimit { requested, limit }
    }

    /// Create a TransferFailed error
    pub fn transfer_failed(to: Identity, amount: Amount) -> Self {
        VaultError::TransferFailed { to, amount }
    }

    /// Create an InvalidCall error
    pub fn invalid_call(selector: &str) -> Self {
        VaultError::InvalidCall {
            selector: selector.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        VaultError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }
}

/// Failure reported by a value-transfer primitive
///
/// The ledger does not inspect the reason; it maps any transfer failure to
/// [`VaultError::TransferFailed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct TransferError {
    pub reason: String,
}

impl TransferError {
    pub fn new(reason: impl Into<String>) -> Self {
        TransferError {
            reason: reason.into(),
        }
    }
}

/// Errors raised by the call-file pipeline around the ledger
///
/// These never come from the ledger itself: a rejected call is logged and
/// processing continues, while a pipeline error stops the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input file not found at the specified path
    #[error("Failed to open file '{path}': not found")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while reading input or writing output
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// CSV record could not be parsed
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Parse {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Output could not be written
    #[error("Failed to write {what}: {message}")]
    Output {
        /// What was being written
        what: &'static str,
        /// Underlying error
        message: String,
    },

    /// The async runtime could not be started or a task failed
    #[error("Runtime error: {message}")]
    Runtime {
        /// Description of the runtime failure
        message: String,
    },

    /// The ledger rejected its initialization parameters
    #[error("Invalid ledger configuration: {0}")]
    Config(#[from] VaultError),
}

impl From<std::io::Error> for PipelineError {
    fn from(error: std::io::Error) -> Self {
        PipelineError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for PipelineError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        PipelineError::Parse {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for PipelineError {
    fn from(error: csv_async::Error) -> Self {
        PipelineError::Parse {
            line: None,
            message: error.to_string(),
        }
    }
}

impl PipelineError {
    /// Map an error from opening the input file
    pub fn open(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            PipelineError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            PipelineError::Io {
                message: format!("Failed to open file '{}': {}", path.display(), error),
            }
        }
    }

    /// Create an Output error
    pub fn output(what: &'static str, error: impl std::fmt::Display) -> Self {
        PipelineError::Output {
            what,
            message: error.to_string(),
        }
    }
}
