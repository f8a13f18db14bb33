use crate::{error::Result, tx::ScArg};

use super::{BuiltTransaction, Transfer};

/// Wallet engine that turns transfers into a ledger transaction.
pub trait TxBuilder: Send + Sync {
    /// Assemble a transaction and compute its fee.
    ///
    /// # Arguments
    /// * `transfers` - Value movements to include
    /// * `ring_size` - Anonymity set size
    /// * `sc_args` - Smart-contract call arguments, empty for plain transfers
    fn build(
        &self,
        transfers: &[Transfer],
        ring_size: u64,
        sc_args: &[ScArg],
    ) -> Result<BuiltTransaction>;
}

/// Credential-gated approval of a built transaction.
pub trait SigningGate: Send + Sync {
    /// Fails with [`crate::Error::Authorization`] when the credential is wrong.
    fn authorize(&self, tx: &BuiltTransaction, credential: &str) -> Result<()>;
}
