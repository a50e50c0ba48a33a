//! Asynchronous CSV reader with batch interface
//!
//! Provides batched reading of ledger calls from any async byte source.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - futures' `StreamExt` to pull records off the deserializer
//!
//! ```text
//! CSV bytes → AsyncReader → Batches of LedgerCalls
//!                  ↓
//!           csv_format module
//!           (CsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{LedgerCall, PipelineError};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Asynchronous CSV reader
///
/// Malformed records are logged and skipped; they never end a batch early.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: u64,
    skipped: u64,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 0,
            skipped: 0,
        }
    }

    /// Number of malformed records skipped so far
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Read a batch of calls
    ///
    /// Reads up to `batch_size` well-formed calls. Returns an empty vector
    /// once the input is exhausted.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<LedgerCall> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<CsvRecord>();

        while batch.len() < batch_size {
            let next = match records.next().await {
                Some(next) => next,
                None => break,
            };
            self.line_num += 1;
            let line = Some(self.line_num + 1);

            match next {
                Ok(csv_record) => match convert_csv_record(csv_record) {
                    Ok(call) => batch.push(call),
                    Err(message) => {
                        let error = PipelineError::Parse { line, message };
                        warn!(%error, "skipping record");
                        self.skipped += 1;
                    }
                },
                Err(e) => {
                    let error = PipelineError::Parse {
                        line,
                        message: e.to_string(),
                    };
                    warn!(%error, "skipping record");
                    self.skipped += 1;
                }
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CallKind;
    use futures::io::Cursor;

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let csv_content = "op,caller,amount\ndeposit,1,100\nwithdraw,1,50\ndeposit,2,200\n";
        let mut async_reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = async_reader.read_batch(2).await;
        assert_eq!(
            batch,
            vec![LedgerCall::deposit(1, 100), LedgerCall::withdraw(1, 50)]
        );

        let batch = async_reader.read_batch(2).await;
        assert_eq!(batch, vec![LedgerCall::deposit(2, 200)]);

        let batch = async_reader.read_batch(2).await;
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_empty_csv() {
        let mut async_reader = AsyncReader::new(Cursor::new("op,caller,amount\n".as_bytes()));

        let batch = async_reader.read_batch(10).await;
        assert_eq!(batch.len(), 0);
    }

    #[tokio::test]
    async fn test_async_reader_skips_malformed_record() {
        let csv_content = "op,caller,amount\ndeposit,1,nope\ndeposit,1,50\n";
        let mut async_reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        // Only the valid record should be in the batch
        let batch = async_reader.read_batch(10).await;
        assert_eq!(batch, vec![LedgerCall::deposit(1, 50)]);
        assert_eq!(async_reader.skipped(), 1);
    }

    #[tokio::test]
    async fn test_async_reader_keeps_unrecognized_operation() {
        let csv_content = "op,caller,amount\nsweep,1,5\nheld,1,\n";
        let mut async_reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = async_reader.read_batch(10).await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].kind, CallKind::Unrecognized("sweep".to_string()));
        assert_eq!(batch[1].kind, CallKind::Held);
        assert_eq!(batch[1].amount, None);
    }

    #[tokio::test]
    async fn test_async_reader_whitespace_handling() {
        let csv_content = "op,caller,amount\n  deposit  ,  1  ,  100  \n";
        let mut async_reader = AsyncReader::new(Cursor::new(csv_content.as_bytes()));

        let batch = async_reader.read_batch(10).await;
        assert_eq!(batch, vec![LedgerCall::deposit(1, 100)]);
    }
}
