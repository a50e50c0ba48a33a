//! CSV format handling for call records, account output and event export
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to ledger calls
//! - Account output serialization
//! - Event log export
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{
    AccountSnapshot, Amount, CallKind, EventRow, Identity, LedgerCall, LedgerEvent, PipelineError,
};
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: op, caller, amount
/// The amount field is optional because read operations take none.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub op: String,
    pub caller: Identity,
    pub amount: Option<String>,
}

/// Convert a CsvRecord to a LedgerCall
///
/// This function:
/// - Resolves the operation selector (unknown selectors are kept so the
///   ledger's fallback can reject them)
/// - Parses the amount into an integer amount (if present)
/// - Validates that amounts are present for deposit/withdraw
///
/// # Returns
///
/// Result containing either:
/// - Ok(LedgerCall) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<LedgerCall, String> {
    let kind = CallKind::from_selector(&csv_record.op);

    let amount = match csv_record.amount {
        Some(amount_str) if !amount_str.trim().is_empty() => {
            match amount_str.trim().parse::<Amount>() {
                Ok(amount) => Some(amount),
                Err(_) => {
                    return Err(format!(
                        "Invalid amount '{}' for {} by caller {}",
                        amount_str,
                        kind.selector(),
                        csv_record.caller
                    ))
                }
            }
        }
        _ => None,
    };

    if kind.requires_amount() && amount.is_none() {
        return Err(format!(
            "{} by caller {} requires an amount",
            kind.selector(),
            csv_record.caller
        ));
    }

    Ok(LedgerCall {
        kind,
        caller: csv_record.caller,
        amount,
    })
}

/// Write account states to CSV format
///
/// Writes accounts in CSV format with columns: identity, balance, deposits,
/// withdrawals. Accounts are sorted by identity for deterministic output.
pub fn write_accounts_csv(
    accounts: &[AccountSnapshot],
    output: &mut dyn Write,
) -> Result<(), PipelineError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["identity", "balance", "deposits", "withdrawals"])
        .map_err(|e| PipelineError::output("CSV header", e))?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by_key(|account| account.identity);

    for account in sorted_accounts {
        writer
            .write_record(&[
                account.identity.to_string(),
                account.balance.to_string(),
                account.deposits.to_string(),
                account.withdrawals.to_string(),
            ])
            .map_err(|e| PipelineError::output("account record", e))?;
    }

    writer
        .flush()
        .map_err(|e| PipelineError::output("accounts", e))?;

    Ok(())
}

/// Write the event log to CSV format
///
/// Columns: event, identity, amount, held_balance. Events keep their commit
/// order.
pub fn write_events_csv(
    events: &[LedgerEvent],
    output: &mut dyn Write,
) -> Result<(), PipelineError> {
    let mut writer = csv::Writer::from_writer(output);

    if events.is_empty() {
        writer
            .write_record(["event", "identity", "amount", "held_balance"])
            .map_err(|e| PipelineError::output("CSV header", e))?;
    }

    for event in events {
        writer
            .serialize(EventRow::from(event))
            .map_err(|e| PipelineError::output("event record", e))?;
    }

    writer
        .flush()
        .map_err(|e| PipelineError::output("events", e))?;

    Ok(())
}
