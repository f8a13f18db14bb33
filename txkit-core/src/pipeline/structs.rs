use serde::{Deserialize, Serialize};

use crate::tx::{TransactionType, TxId};

/// One value movement requested by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub destination: String,
    pub amount: u64,
    #[serde(default)]
    pub burn: u64,
    /// Asset to move, `None` for the native coin.
    #[serde(default)]
    pub asset: Option<String>,
}

impl Transfer {
    pub fn new(destination: impl Into<String>, amount: u64) -> Self {
        Self {
            destination: destination.into(),
            amount,
            burn: 0,
            asset: None,
        }
    }
}

/// Assembled transaction, ready to be authorized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltTransaction {
    pub tx_id: TxId,
    pub tx_type: TransactionType,
    /// Chain height the transaction was built against.
    pub height_built: Option<i64>,
    /// Serialized transaction.
    pub raw: Vec<u8>,
    /// Fee to show the user before authorization.
    pub fee: u64,
}

/// A built transaction the signing gate has accepted.
///
/// Only [`crate::TransactionPipeline::authorize`] creates these, so nothing
/// unauthorized can reach broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedTransaction {
    built: BuiltTransaction,
}

impl AuthorizedTransaction {
    pub(crate) fn new(built: BuiltTransaction) -> Self {
        Self { built }
    }

    pub fn built(&self) -> &BuiltTransaction {
        &self.built
    }

    pub fn into_built(self) -> BuiltTransaction {
        self.built
    }
}
