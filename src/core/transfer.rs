//! Host-side value transfer
//!
//! `HostWallet` stands in for the environment's native transfer. It accepts
//! every payment except those to recipients it was told to refuse, which is
//! how a failing payout is exercised from the command line and in tests.
//!
//! The wallet keeps no record of what it delivered. Payouts are recorded by
//! the ledger inside the withdrawing call's frame, so a payout made under an
//! enclosing frame that later fails is reverted with everything else.

use crate::core::ledger::Ledger;
use crate::core::traits::ValueTransfer;
use crate::types::{Amount, Identity, TransferError};
use std::collections::HashSet;

/// Value-transfer primitive that refuses a configured set of recipients
#[derive(Debug, Clone, Default)]
pub struct HostWallet {
    /// Recipients whose payments fail
    rejecting: HashSet<Identity>,
}

impl HostWallet {
    /// Create a wallet that accepts every payment
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a wallet whose payments to `recipients` fail
    pub fn rejecting<I>(recipients: I) -> Self
    where
        I: IntoIterator<Item = Identity>,
    {
        HostWallet {
            rejecting: recipients.into_iter().collect(),
        }
    }

    /// Whether payments to `identity` are refused
    pub fn rejects(&self, identity: Identity) -> bool {
        self.rejecting.contains(&identity)
    }
}

impl ValueTransfer for HostWallet {
    fn transfer(
        &mut self,
        _ledger: &mut Ledger,
        to: Identity,
        _amount: Amount,
    ) -> Result<(), TransferError> {
        if self.rejects(to) {
            return Err(TransferError::new(format!(
                "recipient {} refused payment",
                to
            )));
        }

        Ok(())
    }
}
