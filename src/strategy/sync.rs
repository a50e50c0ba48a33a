//! Synchronous processing strategy
//!
//! Single-threaded pipeline: the `SyncReader` streams one call at a time
//! into the engine, and the final account states go through
//! `csv_format::write_accounts_csv`.
//!
//! Memory use is O(identities + events), not O(calls in the file).

use crate::io::sync_reader::SyncReader;
use crate::strategy::{apply_call, finish, LedgerSettings, ProcessingStrategy, RunReport, RunStats};
use crate::types::PipelineError;
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use vault_ledger::strategy::{LedgerSettings, ProcessingStrategy, SyncProcessingStrategy};
/// use vault_ledger::types::LedgerConfig;
/// use std::path::Path;
/// use std::io;
///
/// let settings = LedgerSettings::new(LedgerConfig::new(1_000, 100));
/// let strategy = SyncProcessingStrategy::new(settings);
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("calls.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone)]
pub struct SyncProcessingStrategy {
    settings: LedgerSettings,
}

impl SyncProcessingStrategy {
    pub fn new(settings: LedgerSettings) -> Self {
        Self { settings }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<RunReport, PipelineError> {
        let mut engine = self.settings.engine()?;
        let reader = SyncReader::new(input_path)?;
        let mut stats = RunStats::default();

        for result in reader {
            match result {
                Ok(call) => apply_call(&mut engine, &call, &mut stats),
                Err(error) => {
                    warn!(%error, "skipping record");
                    stats.skipped += 1;
                }
            }
        }

        finish(engine, stats, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LedgerConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn strategy(bank_cap: u128, withdrawal_limit: u128) -> SyncProcessingStrategy {
        SyncProcessingStrategy::new(LedgerSettings::new(LedgerConfig::new(
            bank_cap,
            withdrawal_limit,
        )))
    }

    #[test]
    fn test_sync_strategy_processes_valid_deposit() {
        let file = create_temp_csv("op,caller,amount\ndeposit,1,100\n");

        let mut output = Vec::new();
        let report = strategy(1_000, 10).process(file.path(), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "identity,balance,deposits,withdrawals\n1,100,1,0\n"
        );
        assert_eq!(report.ledger.held_balance(), 100);
    }

    #[test]
    fn test_sync_strategy_processes_multiple_calls() {
        let csv_content = "op,caller,amount\n\
                          deposit,1,100\n\
                          withdraw,1,10\n\
                          deposit,2,200\n\
                          balance,1,\n";
        let file = create_temp_csv(csv_content);

        let mut output = Vec::new();
        let report = strategy(1_000, 10).process(file.path(), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "identity,balance,deposits,withdrawals\n1,90,1,1\n2,200,1,0\n"
        );
        assert_eq!(report.ledger.paid_out(1), 10);
        assert_eq!(report.stats.applied, 4);
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let mut output = Vec::new();

        let result = strategy(1_000, 10).process(Path::new("nonexistent.csv"), &mut output);

        let error = result.unwrap_err();
        assert!(matches!(error, PipelineError::FileNotFound { .. }));
        assert!(error.to_string().contains("Failed to open file"));
    }

    #[test]
    fn test_sync_strategy_rejects_invalid_config() {
        let file = create_temp_csv("op,caller,amount\n");
        let mut output = Vec::new();

        let result = strategy(0, 10).process(file.path(), &mut output);

        assert!(matches!(result, Err(PipelineError::Config(_))));
        assert!(output.is_empty());
    }

    #[test]
    fn test_sync_strategy_continues_after_rejected_call() {
        let csv_content = "op,caller,amount\n\
                          deposit,1,10\n\
                          deposit,2,1\n\
                          withdraw,3,1\n\
                          deposit,3,5\n";
        let file = create_temp_csv(csv_content);

        let mut output = Vec::new();
        let report = strategy(10, 1).process(file.path(), &mut output).unwrap();

        assert_eq!(report.stats.applied, 1);
        assert_eq!(report.stats.rejected, 3);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "identity,balance,deposits,withdrawals\n1,10,1,0\n"
        );
    }

    #[test]
    fn test_sync_strategy_continues_on_malformed_record() {
        // Second record has invalid amount, but processing should continue
        let csv_content = "op,caller,amount\n\
                          deposit,1,100\n\
                          deposit,2,invalid\n\
                          deposit,3,50\n";
        let file = create_temp_csv(csv_content);

        let mut output = Vec::new();
        let report = strategy(1_000, 10).process(file.path(), &mut output).unwrap();

        assert_eq!(report.stats.skipped, 1);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "identity,balance,deposits,withdrawals\n1,100,1,0\n3,50,1,0\n"
        );
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }
}
