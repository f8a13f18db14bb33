use std::collections::{HashMap, HashSet};

use crate::tx::TxId;

/// Consecutive unconfirmed polls per pending transaction.
///
/// Lives in process memory only: a restart hands every pending record a
/// fresh budget.
#[derive(Debug, Clone, Default)]
pub struct RetryTracker {
    attempts: HashMap<TxId, u32>,
}

impl RetryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more failed poll for `tx_id`, returning the new total.
    pub fn record_failure(&mut self, tx_id: &TxId) -> u32 {
        let n = self.attempts.entry(tx_id.clone()).or_insert(0);
        *n = n.saturating_add(1);
        *n
    }

    pub fn attempts(&self, tx_id: &TxId) -> Option<u32> {
        self.attempts.get(tx_id).copied()
    }

    pub fn clear(&mut self, tx_id: &TxId) {
        self.attempts.remove(tx_id);
    }

    /// Forget every counter whose transaction is not in `pending`.
    pub fn retain(&mut self, pending: &HashSet<&TxId>) {
        self.attempts.retain(|id, _| pending.contains(id));
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }
}
