use crate::logging::LogFormat;
use crate::strategy::{BatchConfig, LedgerSettings};
use crate::types::{Amount, Identity, LedgerConfig};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Apply deposit and withdrawal calls to a capped custodial ledger
#[derive(Parser, Debug)]
#[command(name = "vault-ledger")]
#[command(about = "Apply deposit and withdrawal calls to a capped custodial ledger", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing call records
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Maximum total value the ledger may hold
    #[arg(long = "bank-cap", value_name = "AMOUNT")]
    pub bank_cap: Amount,

    /// Maximum value of a single withdrawal
    #[arg(long = "withdrawal-limit", value_name = "AMOUNT")]
    pub withdrawal_limit: Amount,

    /// Processing strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of calls per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of calls per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Maximum number of batches read ahead of the ledger (async mode only)
    #[arg(
        long = "max-pending",
        value_name = "COUNT",
        help = "Maximum number of batches read ahead of the ledger (default: CPU cores)"
    )]
    pub max_pending_batches: Option<usize>,

    /// Reject deposits and withdrawals made while a payout is in flight
    #[arg(long = "reentrancy-guard")]
    pub reentrancy_guard: bool,

    /// Identity whose payouts the host wallet refuses (repeatable)
    #[arg(long = "reject-recipient", value_name = "ID")]
    pub reject_recipients: Vec<Identity>,

    /// Write the event log as CSV to this path
    #[arg(long = "events", value_name = "PATH")]
    pub events_file: Option<PathBuf>,

    /// Default log level when RUST_LOG is not set
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,
}

/// Available processing strategies for call files
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Ledger parameters from the command line
    pub fn to_ledger_settings(&self) -> LedgerSettings {
        let config = LedgerConfig::new(self.bank_cap, self.withdrawal_limit)
            .with_reentrancy_guard(self.reentrancy_guard);
        LedgerSettings::new(config).with_rejected_recipients(self.reject_recipients.clone())
    }

    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values use the defaults; zero values fall back to the defaults
    /// with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_pending_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_pending_batches
                    .unwrap_or(default.max_pending_batches),
            )
        } else {
            BatchConfig::default()
        }
    }
}
