use std::sync::Arc;

use crate::{
    error::Result,
    tx::TxId,
    EncryptedBalanceResult, GetBlockResult, GetTransactionResult,
};

/// Async version of LedgerBackend for non-blocking I/O operations
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait AsyncLedgerBackend: Send + Sync {
    /// Whether a transport connection is currently available
    fn is_connected(&self) -> bool;

    /// Look up several transactions at once
    ///
    /// # Arguments
    /// * `tx_ids` - Hashes to look up
    ///
    /// # Returns
    /// * One entry per requested hash, in request order
    async fn get_transactions(&self, tx_ids: &[TxId]) -> Result<GetTransactionResult>;

    /// Fetch a block by height
    ///
    /// # Arguments
    /// * `height` - Block height to query
    async fn get_block(&self, height: i64) -> Result<GetBlockResult>;

    /// Fetch the encrypted balance of an address
    ///
    /// # Arguments
    /// * `address` - Wallet address
    ///
    /// # Returns
    /// * Balance data, including the address's registration height
    async fn get_encrypted_balance(&self, address: &str) -> Result<EncryptedBalanceResult>;

    /// Hashes of the transactions included in a fetched block
    fn block_tx_hashes(&self, block: &GetBlockResult) -> Result<Vec<TxId>>;

    /// Submit a serialized, signed transaction
    async fn send_raw_transaction(&self, tx_hex: &str) -> Result<()>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl<'a, T: AsyncLedgerBackend + ?Sized> AsyncLedgerBackend for &'a T {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    async fn get_transactions(&self, tx_ids: &[TxId]) -> Result<GetTransactionResult> {
        (**self).get_transactions(tx_ids).await
    }

    async fn get_block(&self, height: i64) -> Result<GetBlockResult> {
        (**self).get_block(height).await
    }

    async fn get_encrypted_balance(&self, address: &str) -> Result<EncryptedBalanceResult> {
        (**self).get_encrypted_balance(address).await
    }

    fn block_tx_hashes(&self, block: &GetBlockResult) -> Result<Vec<TxId>> {
        (**self).block_tx_hashes(block)
    }

    async fn send_raw_transaction(&self, tx_hex: &str) -> Result<()> {
        (**self).send_raw_transaction(tx_hex).await
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl<T: AsyncLedgerBackend + ?Sized> AsyncLedgerBackend for Arc<T> {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    async fn get_transactions(&self, tx_ids: &[TxId]) -> Result<GetTransactionResult> {
        (**self).get_transactions(tx_ids).await
    }

    async fn get_block(&self, height: i64) -> Result<GetBlockResult> {
        (**self).get_block(height).await
    }

    async fn get_encrypted_balance(&self, address: &str) -> Result<EncryptedBalanceResult> {
        (**self).get_encrypted_balance(address).await
    }

    fn block_tx_hashes(&self, block: &GetBlockResult) -> Result<Vec<TxId>> {
        (**self).block_tx_hashes(block)
    }

    async fn send_raw_transaction(&self, tx_hex: &str) -> Result<()> {
        (**self).send_raw_transaction(tx_hex).await
    }
}
