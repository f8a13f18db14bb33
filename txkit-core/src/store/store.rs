use std::sync::Arc;

use crate::{
    error::Result,
    tx::{OutgoingTransaction, TxId, TxStatus},
};

use super::OutgoingTxQuery;

/// Trait for persisting outgoing transaction records
///
/// Storage errors are returned unchanged; implementations do not retry.
pub trait TxStore: Send + Sync {
    /// Record a transaction. Inserting an id that already exists is a no-op
    /// and leaves the stored row untouched.
    ///
    /// Returns whether a row was written.
    fn insert(&self, tx: &OutgoingTransaction) -> Result<bool>;

    fn get(&self, tx_id: &TxId) -> Result<Option<OutgoingTransaction>>;

    /// Snapshot of the records matching `query`, ordered and limited by the store.
    fn query(&self, query: &OutgoingTxQuery) -> Result<Vec<OutgoingTransaction>>;

    /// Overwrite status and block height of a record.
    ///
    /// The lifecycle is not enforced here; callers only move records out of
    /// `Pending`. Returns whether a record matched.
    fn update_status(
        &self,
        tx_id: &TxId,
        status: TxStatus,
        block_height: Option<i64>,
    ) -> Result<bool>;

    /// Replace the user note of a record.
    fn update_description(&self, tx_id: &TxId, description: Option<&str>) -> Result<bool>;

    fn delete(&self, tx_id: &TxId) -> Result<bool>;

    /// Delete every record, returning how many were removed.
    fn clear(&self) -> Result<usize>;
}

impl<T: TxStore + ?Sized> TxStore for &T {
    fn insert(&self, tx: &OutgoingTransaction) -> Result<bool> {
        (**self).insert(tx)
    }

    fn get(&self, tx_id: &TxId) -> Result<Option<OutgoingTransaction>> {
        (**self).get(tx_id)
    }

    fn query(&self, query: &OutgoingTxQuery) -> Result<Vec<OutgoingTransaction>> {
        (**self).query(query)
    }

    fn update_status(
        &self,
        tx_id: &TxId,
        status: TxStatus,
        block_height: Option<i64>,
    ) -> Result<bool> {
        (**self).update_status(tx_id, status, block_height)
    }

    fn update_description(&self, tx_id: &TxId, description: Option<&str>) -> Result<bool> {
        (**self).update_description(tx_id, description)
    }

    fn delete(&self, tx_id: &TxId) -> Result<bool> {
        (**self).delete(tx_id)
    }

    fn clear(&self) -> Result<usize> {
        (**self).clear()
    }
}

impl<T: TxStore + ?Sized> TxStore for Arc<T> {
    fn insert(&self, tx: &OutgoingTransaction) -> Result<bool> {
        (**self).insert(tx)
    }

    fn get(&self, tx_id: &TxId) -> Result<Option<OutgoingTransaction>> {
        (**self).get(tx_id)
    }

    fn query(&self, query: &OutgoingTxQuery) -> Result<Vec<OutgoingTransaction>> {
        (**self).query(query)
    }

    fn update_status(
        &self,
        tx_id: &TxId,
        status: TxStatus,
        block_height: Option<i64>,
    ) -> Result<bool> {
        (**self).update_status(tx_id, status, block_height)
    }

    fn update_description(&self, tx_id: &TxId, description: Option<&str>) -> Result<bool> {
        (**self).update_description(tx_id, description)
    }

    fn delete(&self, tx_id: &TxId) -> Result<bool> {
        (**self).delete(tx_id)
    }

    fn clear(&self) -> Result<usize> {
        (**self).clear()
    }
}
