use serde::{Deserialize, Serialize};

use crate::tx::ScArg;

/// One line of the wallet's transfer history.
///
/// Produced by the wallet's balance engine; read-only here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub incoming: bool,
    pub coinbase: bool,
    pub sender: String,
    pub destination: String,
    pub amount: u64,
    pub burn: u64,
    pub tx_id: String,
    pub block_hash: String,
    /// Seconds since the unix epoch.
    pub time: i64,
    #[serde(default)]
    pub sc_args: Vec<ScArg>,
}

impl HistoryEntry {
    /// Sent by this wallet, as opposed to received or mined.
    pub fn is_outgoing(&self) -> bool {
        !self.incoming && !self.coinbase
    }

    pub fn sc_arg(&self, name: &str) -> Option<&str> {
        self.sc_args
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| arg.value.as_str())
    }
}

/// A history entry tagged with the asset it moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Smart-contract id of the asset, the native coin included.
    pub scid: String,
    #[serde(flatten)]
    pub entry: HistoryEntry,
}
