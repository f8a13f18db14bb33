use std::sync::Arc;

use crate::{
    error::Result,
    tx::TxId,
    EncryptedBalanceResult, GetBlockResult, GetTransactionResult,
};

/// Request/response facade over the ledger node.
///
/// The transport is up to the implementor. Errors returned here are genuine
/// failures of an active connection; being offline is reported through
/// [`LedgerBackend::is_connected`] instead.
pub trait LedgerBackend: Send + Sync {
    /// Whether a transport connection is currently available.
    fn is_connected(&self) -> bool;

    /// Look up several transactions at once. Answers come back in request order.
    fn get_transactions(&self, tx_ids: &[TxId]) -> Result<GetTransactionResult>;

    fn get_block(&self, height: i64) -> Result<GetBlockResult>;

    fn get_encrypted_balance(&self, address: &str) -> Result<EncryptedBalanceResult>;

    /// Hashes of the transactions included in a fetched block.
    ///
    /// The block serialization belongs to the chain, so the backend decodes it.
    fn block_tx_hashes(&self, block: &GetBlockResult) -> Result<Vec<TxId>>;

    /// Submit a serialized, signed transaction.
    fn send_raw_transaction(&self, tx_hex: &str) -> Result<()>;
}

impl<T: LedgerBackend + ?Sized> LedgerBackend for &T {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn get_transactions(&self, tx_ids: &[TxId]) -> Result<GetTransactionResult> {
        (**self).get_transactions(tx_ids)
    }

    fn get_block(&self, height: i64) -> Result<GetBlockResult> {
        (**self).get_block(height)
    }

    fn get_encrypted_balance(&self, address: &str) -> Result<EncryptedBalanceResult> {
        (**self).get_encrypted_balance(address)
    }

    fn block_tx_hashes(&self, block: &GetBlockResult) -> Result<Vec<TxId>> {
        (**self).block_tx_hashes(block)
    }

    fn send_raw_transaction(&self, tx_hex: &str) -> Result<()> {
        (**self).send_raw_transaction(tx_hex)
    }
}

impl<T: LedgerBackend + ?Sized> LedgerBackend for Arc<T> {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn get_transactions(&self, tx_ids: &[TxId]) -> Result<GetTransactionResult> {
        (**self).get_transactions(tx_ids)
    }

    fn get_block(&self, height: i64) -> Result<GetBlockResult> {
        (**self).get_block(height)
    }

    fn get_encrypted_balance(&self, address: &str) -> Result<EncryptedBalanceResult> {
        (**self).get_encrypted_balance(address)
    }

    fn block_tx_hashes(&self, block: &GetBlockResult) -> Result<Vec<TxId>> {
        (**self).block_tx_hashes(block)
    }

    fn send_raw_transaction(&self, tx_hex: &str) -> Result<()> {
        (**self).send_raw_transaction(tx_hex)
    }
}
