//! Vault Ledger CLI
//!
//! Applies deposit and withdrawal calls from a CSV file to a capped custodial
//! ledger and prints the final per-identity state.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --bank-cap 1000 --withdrawal-limit 100 calls.csv > accounts.csv
//! cargo run -- --bank-cap 1000 --withdrawal-limit 100 --strategy async --batch-size 2000 calls.csv
//! cargo run -- --bank-cap 1000 --withdrawal-limit 100 --events events.csv --log-format json calls.csv
//! ```
//!
//! Account states go to stdout, logs to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid configuration, file not found, output failure, etc.)

use std::fs::File;
use std::io::BufWriter;
use std::process;
use tracing::error;
use vault_ledger::cli;
use vault_ledger::io::write_events_csv;
use vault_ledger::logging;
use vault_ledger::strategy::{self, RunReport};
use vault_ledger::types::PipelineError;

fn main() {
    let args = cli::parse_args();
    logging::init_logging(&args.log_level, args.log_format);

    let strategy = {
        let batch = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, args.to_ledger_settings(), batch)
    };

    let mut output = std::io::stdout();
    let result = strategy
        .process(&args.input_file, &mut output)
        .and_then(|report| match &args.events_file {
            Some(path) => export_events(&report, path),
            None => Ok(()),
        });

    if let Err(e) = result {
        error!(error = %e, "processing failed");
        process::exit(1);
    }
}

fn export_events(report: &RunReport, path: &std::path::Path) -> Result<(), PipelineError> {
    let file = File::create(path).map_err(|e| PipelineError::output("event log", e))?;
    let mut writer = BufWriter::new(file);
    write_events_csv(report.ledger.events().as_slice(), &mut writer)
}
