//! Call-related types for the vault ledger
//!
//! This module defines the identifiers, amounts and call records that flow
//! from the front end into the execution context.

/// Identity of a principal that owns a balance
///
/// Supports identities from 0 to 4,294,967,295
pub type Identity = u32;

/// Quantity of the native asset in its smallest indivisible unit
pub type Amount = u128;

/// Per-identity operation counter
pub type Count = u64;

/// Operations a caller can invoke on the ledger
///
/// Anything the front end does not recognize is carried as
/// [`CallKind::Unrecognized`] so the ledger's fallback path can reject it
/// with a structured error instead of the record being dropped silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallKind {
    /// Credit the attached amount to the caller's balance
    Deposit,

    /// Move an amount out of the caller's balance to the caller
    Withdraw,

    /// Read the caller's balance
    Balance,

    /// Read the total value held by the ledger
    Held,

    /// Any selector that does not name one of the operations above
    Unrecognized(String),
}

impl CallKind {
    /// Resolve an operation selector, case-insensitively
    pub fn from_selector(selector: &str) -> Self {
        match selector.trim().to_lowercase().as_str() {
            "deposit" => CallKind::Deposit,
            "withdraw" | "withdrawal" => CallKind::Withdraw,
            "balance" => CallKind::Balance,
            "held" => CallKind::Held,
            _ => CallKind::Unrecognized(selector.trim().to_string()),
        }
    }

    /// Whether the operation needs an amount argument
    pub fn requires_amount(&self) -> bool {
        matches!(self, CallKind::Deposit | CallKind::Withdraw)
    }

    /// Selector name used in logs and error messages
    pub fn selector(&self) -> &str {
        match self {
            CallKind::Deposit => "deposit",
            CallKind::Withdraw => "withdraw",
            CallKind::Balance => "balance",
            CallKind::Held => "held",
            CallKind::Unrecognized(selector) => selector,
        }
    }
}

/// A single call into the ledger
///
/// The amount is optional because read operations take none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerCall {
    /// The operation being invoked
    pub kind: CallKind,

    /// The identity making the call
    pub caller: Identity,

    /// Value attached to a deposit, or requested by a withdrawal
    pub amount: Option<Amount>,
}

impl LedgerCall {
    /// Build a deposit call
    pub fn deposit(caller: Identity, amount: Amount) -> Self {
        LedgerCall {
            kind: CallKind::Deposit,
            caller,
            amount: Some(amount),
        }
    }

    /// Build a withdrawal call
    pub fn withdraw(caller: Identity, amount: Amount) -> Self {
        LedgerCall {
            kind: CallKind::Withdraw,
            caller,
            amount: Some(amount),
        }
    }

    /// Build a balance query for `caller`
    pub fn balance(caller: Identity) -> Self {
        LedgerCall {
            kind: CallKind::Balance,
            caller,
            amount: None,
        }
    }

    /// Build a held-balance query
    pub fn held(caller: Identity) -> Self {
        LedgerCall {
            kind: CallKind::Held,
            caller,
            amount: None,
        }
    }
}

/// Result of a successful call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// A deposit was committed
    Deposited { new_held_balance: Amount },

    /// A withdrawal was committed and paid out
    Withdrawn { new_held_balance: Amount },

    /// Result of a balance query
    Balance(Amount),

    /// Result of a held-balance query
    HeldBalance(Amount),
}
