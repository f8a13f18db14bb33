use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Confirmation state of an outgoing transaction.
///
/// `Valid` and `Invalid` are terminal: a record only ever moves out of
/// `Pending`, and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Valid,
    Invalid,
}

impl TxStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Pending => "pending",
            TxStatus::Valid => "valid",
            TxStatus::Invalid => "invalid",
        }
    }

    pub const fn is_terminal(&self) -> bool {
        !matches!(self, TxStatus::Pending)
    }

    /// Whether moving from `self` to `next` respects the lifecycle.
    pub const fn can_transition_to(&self, next: TxStatus) -> bool {
        matches!(
            (self, next),
            (TxStatus::Pending, TxStatus::Valid) | (TxStatus::Pending, TxStatus::Invalid)
        )
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(TxStatus::Pending),
            "valid" => Ok(TxStatus::Valid),
            "invalid" => Ok(TxStatus::Invalid),
            other => Err(Error::UnknownStatus(other.to_string())),
        }
    }
}

/// Kind of ledger transaction, using the ledger's numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum TransactionType {
    Premine,
    /// One-time account activation. Confirms through the address's
    /// registration height instead of a confirming block field.
    Registration,
    Coinbase,
    Transfer,
    Burn,
    SmartContract,
}

impl TransactionType {
    pub const fn code(&self) -> i64 {
        match self {
            TransactionType::Premine => 0,
            TransactionType::Registration => 1,
            TransactionType::Coinbase => 2,
            TransactionType::Transfer => 3,
            TransactionType::Burn => 4,
            TransactionType::SmartContract => 5,
        }
    }
}

impl TryFrom<i64> for TransactionType {
    type Error = Error;

    fn try_from(code: i64) -> Result<Self> {
        match code {
            0 => Ok(TransactionType::Premine),
            1 => Ok(TransactionType::Registration),
            2 => Ok(TransactionType::Coinbase),
            3 => Ok(TransactionType::Transfer),
            4 => Ok(TransactionType::Burn),
            5 => Ok(TransactionType::SmartContract),
            other => Err(Error::UnknownTransactionType(other)),
        }
    }
}

impl From<TransactionType> for i64 {
    fn from(t: TransactionType) -> Self {
        t.code()
    }
}
