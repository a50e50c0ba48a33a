//! Seams between the ledger and its host environment
//!
//! The ledger moves value out through a [`ValueTransfer`] supplied by the
//! host. The primitive receives the ledger itself so that the recipient side
//! can call back into it before the withdrawal returns, which is exactly the
//! reentrancy the ledger's ordering has to tolerate.

use crate::core::ledger::Ledger;
use crate::types::{Amount, Identity, TransferError};

/// Primitive that moves value out of the ledger's custody
pub trait ValueTransfer {
    /// Move `amount` to `to`
    ///
    /// Called after the ledger has already applied the withdrawal's effects.
    /// Implementations may call back into `ledger`; such nested calls observe
    /// the post-withdrawal state.
    fn transfer(
        &mut self,
        ledger: &mut Ledger,
        to: Identity,
        amount: Amount,
    ) -> Result<(), TransferError>;
}

impl<F> ValueTransfer for F
where
    F: FnMut(&mut Ledger, Identity, Amount) -> Result<(), TransferError>,
{
    fn transfer(
        &mut self,
        ledger: &mut Ledger,
        to: Identity,
        amount: Amount,
    ) -> Result<(), TransferError> {
        self(ledger, to, amount)
    }
}
