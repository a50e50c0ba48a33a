//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over ledger calls from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<LedgerCall, PipelineError>` for each CSV row:
//!
//! ```no_run
//! use vault_ledger::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("calls.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(call) => println!("Processing call: {:?}", call),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the iterator
//! - Line numbers are attached to record errors

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::{LedgerCall, PipelineError};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Reads one record at a time; memory use does not grow with the file.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (for the optional amount field)
    /// - Use an 8KB buffer
    ///
    /// # Errors
    ///
    /// `FileNotFound` or `Io` if the file could not be opened.
    pub fn new(path: &Path) -> Result<Self, PipelineError> {
        let file = File::open(path).map_err(|e| PipelineError::open(path, e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<LedgerCall, PipelineError>;

    /// Get the next call from the CSV file
    ///
    /// Line numbers in errors count the header as line 1.
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();
        let next = deserializer.next()?;

        self.line_num += 1;
        let line = Some(self.line_num + 1);

        Some(match next {
            Ok(csv_record) => {
                convert_csv_record(csv_record).map_err(|message| PipelineError::Parse {
                    line,
                    message,
                })
            }
            Err(e) => Err(PipelineError::Parse {
                line,
                message: e.to_string(),
            }),
        })
    }
}
