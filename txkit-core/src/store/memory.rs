use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use super::{OutgoingTxQuery, TxStore};
use crate::{
    error::{Error, Result},
    tx::{OutgoingTransaction, TxId, TxStatus},
};

/// Store that keeps records in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    txs: Mutex<BTreeMap<TxId, OutgoingTransaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        // a poisoned map still holds every record
        self.txs
            .lock()
            .map(|txs| txs.len())
            .unwrap_or_else(|e| e.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<TxId, OutgoingTransaction>>> {
        self.txs.lock().map_err(|e| {
            Error::Store(Box::new(std::io::Error::other(format!(
                "memory store poisoned: {e}"
            ))))
        })
    }
}

impl TxStore for MemoryStore {
    fn insert(&self, tx: &OutgoingTransaction) -> Result<bool> {
        let mut txs = self.lock()?;
        if txs.contains_key(&tx.tx_id) {
            return Ok(false);
        }
        txs.insert(tx.tx_id.clone(), tx.clone());
        Ok(true)
    }

    fn get(&self, tx_id: &TxId) -> Result<Option<OutgoingTransaction>> {
        Ok(self.lock()?.get(tx_id).cloned())
    }

    fn query(&self, query: &OutgoingTxQuery) -> Result<Vec<OutgoingTransaction>> {
        let mut res: Vec<OutgoingTransaction> = self
            .lock()?
            .values()
            .filter(|tx| query.matches(tx))
            .cloned()
            .collect();
        query.apply(&mut res);
        Ok(res)
    }

    fn update_status(
        &self,
        tx_id: &TxId,
        status: TxStatus,
        block_height: Option<i64>,
    ) -> Result<bool> {
        match self.lock()?.get_mut(tx_id) {
            Some(tx) => {
                tx.status = status;
                tx.block_height = block_height;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn update_description(&self, tx_id: &TxId, description: Option<&str>) -> Result<bool> {
        match self.lock()?.get_mut(tx_id) {
            Some(tx) => {
                tx.description = description.map(str::to_string);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, tx_id: &TxId) -> Result<bool> {
        Ok(self.lock()?.remove(tx_id).is_some())
    }

    fn clear(&self) -> Result<usize> {
        let mut txs = self.lock()?;
        let n = txs.len();
        txs.clear();
        Ok(n)
    }
}
