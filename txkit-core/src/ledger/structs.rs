use serde::{Deserialize, Serialize};

/// Ledger view of one transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInfo {
    /// Hash of the block that confirmed the transaction, empty while unconfirmed.
    #[serde(default)]
    pub valid_block: String,
    #[serde(default)]
    pub block_height: i64,
}

impl TxInfo {
    pub fn confirmed(valid_block: impl Into<String>, block_height: i64) -> Self {
        Self {
            valid_block: valid_block.into(),
            block_height,
        }
    }

    /// Confirming block and its height, if the ledger reports one.
    pub fn confirming_block(&self) -> Option<(&str, i64)> {
        if self.valid_block.is_empty() {
            None
        } else {
            Some((&self.valid_block, self.block_height))
        }
    }
}

/// Batched answer to a transaction lookup, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTransactionResult {
    #[serde(default)]
    pub txs: Vec<TxInfo>,
    #[serde(default)]
    pub txs_as_hex: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBlockResult {
    /// Hex encoded serialized block.
    pub blob: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedBalanceResult {
    /// Height at which the address was registered.
    pub registration: i64,
}
