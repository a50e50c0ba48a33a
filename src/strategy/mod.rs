//! Processing strategy module for call files
//!
//! This module defines the Strategy pattern for complete processing pipelines,
//! covering both CSV parsing and ledger execution. This allows different
//! processing implementations (synchronous, asynchronous batch) to be selected
//! at runtime. Every strategy applies calls to a single ledger strictly in
//! input order, so all strategies produce identical results.

use crate::cli::StrategyType;
use crate::core::{HostWallet, Ledger, VaultEngine};
use crate::io::csv_format::write_accounts_csv;
use crate::types::{CallOutcome, Identity, LedgerCall, LedgerConfig, PipelineError};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete call-file pipelines
///
/// Each strategy reads calls from a CSV file, runs them through a fresh
/// ledger and writes the final account states to `output`.
pub trait ProcessingStrategy: Send + Sync {
    /// Process calls from the input file and write account states to output
    ///
    /// Rejected calls and malformed records are logged and counted; they do
    /// not stop processing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The ledger configuration is invalid
    /// - The input file cannot be opened
    /// - The async runtime cannot be started
    /// - Output cannot be written
    fn process(&self, input_path: &Path, output: &mut dyn Write)
        -> Result<RunReport, PipelineError>;
}

/// Ledger parameters shared by every strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSettings {
    /// Initialization parameters for the ledger
    pub config: LedgerConfig,
    /// Identities the host wallet refuses to pay
    pub rejected_recipients: Vec<Identity>,
}

impl LedgerSettings {
    pub fn new(config: LedgerConfig) -> Self {
        LedgerSettings {
            config,
            rejected_recipients: Vec::new(),
        }
    }

    pub fn with_rejected_recipients(mut self, recipients: Vec<Identity>) -> Self {
        self.rejected_recipients = recipients;
        self
    }

    /// Build a fresh engine paying out through a host wallet
    pub(crate) fn engine(&self) -> Result<VaultEngine<HostWallet>, PipelineError> {
        let wallet = HostWallet::rejecting(self.rejected_recipients.iter().copied());
        Ok(VaultEngine::new(self.config, wallet)?)
    }
}

/// Counters collected while a call file is processed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Calls that committed
    pub applied: u64,
    /// Calls the ledger rejected
    pub rejected: u64,
    /// Records that never became calls
    pub skipped: u64,
}

/// Result of a completed run
#[derive(Debug)]
pub struct RunReport {
    pub ledger: Ledger,
    pub wallet: HostWallet,
    pub stats: RunStats,
}

/// Run one call through the engine, logging the result
pub(crate) fn apply_call(
    engine: &mut VaultEngine<HostWallet>,
    call: &LedgerCall,
    stats: &mut RunStats,
) {
    match engine.process(call) {
        Ok(outcome) => {
            stats.applied += 1;
            match outcome {
                CallOutcome::Balance(balance) => {
                    info!(caller = call.caller, balance = %balance, "balance query");
                }
                CallOutcome::HeldBalance(held) => {
                    info!(caller = call.caller, held_balance = %held, "held balance query");
                }
                CallOutcome::Deposited { .. } | CallOutcome::Withdrawn { .. } => {}
            }
        }
        Err(error) => {
            stats.rejected += 1;
            warn!(op = call.kind.selector(), caller = call.caller, %error, "call rejected");
        }
    }
}

/// Write the final account states and package the run
pub(crate) fn finish(
    engine: VaultEngine<HostWallet>,
    stats: RunStats,
    output: &mut dyn Write,
) -> Result<RunReport, PipelineError> {
    write_accounts_csv(&engine.accounts(), output)?;

    let (ledger, wallet) = engine.into_parts();
    info!(
        applied = stats.applied,
        rejected = stats.rejected,
        skipped = stats.skipped,
        held_balance = %ledger.held_balance(),
        "run complete"
    );

    Ok(RunReport {
        ledger,
        wallet,
        stats,
    })
}

/// Create a processing strategy based on the specified strategy type
///
/// `batch` is only used by the async strategy; `None` selects the defaults.
pub fn create_strategy(
    strategy_type: StrategyType,
    settings: LedgerSettings,
    batch: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(settings)),
        StrategyType::Async => {
            let batch = batch.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(settings, batch))
        }
    }
}
