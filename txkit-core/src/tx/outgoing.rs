use serde::{Deserialize, Serialize};

use super::{TransactionType, TxId, TxStatus};
use crate::error::Result;

/// A transaction this wallet has broadcast, as persisted by a [`crate::TxStore`].
///
/// Everything except `status`, `block_height` and `description` is fixed
/// when the record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingTransaction {
    pub tx_id: TxId,
    pub tx_type: TransactionType,
    /// Chain height the transaction was built against.
    pub height_built: Option<i64>,
    /// Local creation time, seconds since the unix epoch.
    pub timestamp: i64,
    pub status: TxStatus,
    /// Full serialized transaction.
    pub raw_hex: String,
    /// Height of the confirming block, set once the record is `Valid`
    /// (`0` when it was given up on).
    pub block_height: Option<i64>,
    /// Free-form user note.
    pub description: Option<String>,
}

impl OutgoingTransaction {
    /// A freshly broadcast record.
    pub fn pending(
        tx_id: TxId,
        tx_type: TransactionType,
        height_built: Option<i64>,
        timestamp: i64,
        raw: &[u8],
        description: Option<String>,
    ) -> Self {
        Self {
            tx_id,
            tx_type,
            height_built,
            timestamp,
            status: TxStatus::Pending,
            raw_hex: hex::encode(raw),
            block_height: None,
            description,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == TxStatus::Pending
    }

    pub fn raw_bytes(&self) -> Result<Vec<u8>> {
        Ok(hex::decode(&self.raw_hex)?)
    }
}

/// A named smart-contract call argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScArg {
    pub name: String,
    pub value: String,
}

impl ScArg {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
