use serde::{Deserialize, Serialize};

use super::HistoryEntry;
use crate::constants::{SC_ENTRYPOINT_ARG, SC_ID_ARG};

/// Smart-contract call predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScCallFilter {
    pub scid: Option<String>,
    pub entrypoint: Option<String>,
}

impl ScCallFilter {
    fn matches(&self, entry: &HistoryEntry) -> bool {
        let Some(scid) = entry.sc_arg(SC_ID_ARG) else {
            return false;
        };
        self.scid.as_deref().map_or(true, |want| want == scid)
            && self
                .entrypoint
                .as_deref()
                .map_or(true, |want| entry.sc_arg(SC_ENTRYPOINT_ARG) == Some(want))
    }
}

/// Criteria of a history query.
///
/// Every predicate that is set must hold for an entry to match; predicates
/// left unset do not take part. `offset` and `limit` apply after sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryFilter {
    pub incoming: Option<bool>,
    /// Neither incoming nor coinbase.
    pub outgoing: Option<bool>,
    pub coinbase: Option<bool>,
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub min_amount: Option<u64>,
    pub min_burn: Option<u64>,
    pub tx_id: Option<String>,
    pub block_hash: Option<String>,
    pub sc_call: Option<ScCallFilter>,

    pub offset: Option<usize>,
    pub limit: Option<usize>,
    /// Newest first instead of oldest first.
    pub descending: bool,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incoming(mut self, incoming: bool) -> Self {
        self.incoming = Some(incoming);
        self
    }

    pub fn outgoing(mut self, outgoing: bool) -> Self {
        self.outgoing = Some(outgoing);
        self
    }

    pub fn coinbase(mut self, coinbase: bool) -> Self {
        self.coinbase = Some(coinbase);
        self
    }

    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    pub fn min_amount(mut self, amount: u64) -> Self {
        self.min_amount = Some(amount);
        self
    }

    pub fn min_burn(mut self, burn: u64) -> Self {
        self.min_burn = Some(burn);
        self
    }

    pub fn tx_id(mut self, tx_id: impl Into<String>) -> Self {
        self.tx_id = Some(tx_id.into());
        self
    }

    pub fn block_hash(mut self, block_hash: impl Into<String>) -> Self {
        self.block_hash = Some(block_hash.into());
        self
    }

    pub fn sc_call(mut self, sc_call: ScCallFilter) -> Self {
        self.sc_call = Some(sc_call);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.descending = true;
        self
    }

    /// Whether `entry` satisfies every set predicate.
    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        fn check<T>(pred: &Option<T>, f: impl FnOnce(&T) -> bool) -> bool {
            pred.as_ref().map_or(true, f)
        }

        check(&self.incoming, |&v| entry.incoming == v)
            && check(&self.outgoing, |&v| entry.is_outgoing() == v)
            && check(&self.coinbase, |&v| entry.coinbase == v)
            && check(&self.sender, |v| &entry.sender == v)
            && check(&self.receiver, |v| &entry.destination == v)
            && check(&self.min_amount, |&v| entry.amount >= v)
            && check(&self.min_burn, |&v| entry.burn >= v)
            && check(&self.tx_id, |v| &entry.tx_id == v)
            && check(&self.block_hash, |v| &entry.block_hash == v)
            && check(&self.sc_call, |v| v.matches(entry))
    }
}
