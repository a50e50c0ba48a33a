//! Asynchronous batch processing strategy
//!
//! Overlaps file reading with ledger execution. The reader side deserializes
//! batches with csv-async and hands them over a bounded channel; the ledger
//! side drains the channel and applies every call in input order.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_pending_batches)
//!     ├── AsyncReader ──batches──▶ mpsc (bounded by max_pending_batches)
//!     └── VaultEngine ◀── drains the channel, one call at a time
//! ```
//!
//! The ledger's bank cap is global, so calls from different identities are
//! not independent and are never applied in parallel. The channel bound
//! limits how far reading can run ahead of execution.

use crate::io::async_reader::AsyncReader;
use crate::strategy::{apply_call, finish, LedgerSettings, ProcessingStrategy, RunReport, RunStats};
use crate::types::{LedgerCall, PipelineError};
use std::io::Write;
use std::path::Path;
use tokio::sync::mpsc;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::{debug, warn};

/// Configuration for batch processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of calls per batch
    pub batch_size: usize,
    /// Maximum number of batches read ahead of the ledger
    pub max_pending_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_pending_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values fall back to the defaults.
    pub fn new(batch_size: usize, max_pending_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_pending_batches = if max_pending_batches == 0 {
            warn!(
                max_pending_batches,
                default = default.max_pending_batches,
                "invalid pending batch bound, using default"
            );
            default.max_pending_batches
        } else {
            max_pending_batches
        };

        Self {
            batch_size,
            max_pending_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// Produces the same output as the synchronous strategy for the same input.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    settings: LedgerSettings,
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(settings: LedgerSettings, config: BatchConfig) -> Self {
        Self { settings, config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<RunReport, PipelineError> {
        let mut engine = self.settings.engine()?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .build()
            .map_err(|e| PipelineError::Runtime {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        let batch_size = self.config.batch_size;
        let (sender, mut receiver) =
            mpsc::channel::<Vec<LedgerCall>>(self.config.max_pending_batches.max(1));

        let (skipped, mut stats) = runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| PipelineError::open(input_path, e))?;

            // Owns the sender so the channel closes when reading ends
            let read_side = async move {
                let mut reader = AsyncReader::new(file.compat());
                loop {
                    let batch = reader.read_batch(batch_size.max(1)).await;
                    if batch.is_empty() {
                        break;
                    }
                    debug!(calls = batch.len(), "batch read");
                    if sender.send(batch).await.is_err() {
                        break;
                    }
                }
                reader.skipped()
            };

            let apply_side = async {
                let mut stats = RunStats::default();
                while let Some(batch) = receiver.recv().await {
                    for call in &batch {
                        apply_call(&mut engine, call, &mut stats);
                    }
                }
                stats
            };

            Ok::<_, PipelineError>(futures::join!(read_side, apply_side))
        })?;

        stats.skipped = skipped;
        finish(engine, stats, output)
    }
}
