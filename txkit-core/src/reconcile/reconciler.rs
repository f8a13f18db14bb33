use log::debug;

use super::{
    logic::{self, RegistrationProof},
    ReconcilerConfig, RetryTracker,
};
use crate::{
    error::Result,
    ledger::LedgerBackend,
    store::{OutgoingTxQuery, TxStore},
    tx::TxId,
};

/// Brings pending outgoing transactions in line with the ledger.
///
/// Each call to [`Reconciler::poll`] is one round. The caller owns the
/// schedule and must not run two rounds of the same wallet at once.
pub struct Reconciler<B, S>
where
    B: LedgerBackend,
    S: TxStore,
{
    backend: B,
    store: S,
    address: String,
    config: ReconcilerConfig,
    tracker: RetryTracker,
}

impl<B: LedgerBackend, S: TxStore> Reconciler<B, S> {
    /// # Arguments
    /// * `backend` - Ledger to query
    /// * `store` - Store holding the wallet's outgoing transactions
    /// * `address` - Wallet address, used to confirm registration transactions
    pub fn new(backend: B, store: S, address: impl Into<String>) -> Self {
        Self {
            backend,
            store,
            address: address.into(),
            config: ReconcilerConfig::default(),
            tracker: RetryTracker::new(),
        }
    }

    pub fn with_config(mut self, config: ReconcilerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_tracker(mut self, tracker: RetryTracker) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn tracker(&self) -> &RetryTracker {
        &self.tracker
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (B, S, RetryTracker) {
        (self.backend, self.store, self.tracker)
    }

    /// Run one reconciliation round.
    ///
    /// Returns how many records changed status. Being offline or having
    /// nothing pending is not an error and yields `0`. A ledger error aborts
    /// the round before anything is written; a store error aborts the rest
    /// of the round but keeps the updates already made.
    pub fn poll(&mut self) -> Result<usize> {
        if !self.backend.is_connected() {
            debug!("ledger not connected, skipping reconciliation");
            return Ok(0);
        }

        let pending = self.store.query(&OutgoingTxQuery::pending())?;
        if pending.is_empty() {
            return Ok(0);
        }

        let tx_ids: Vec<TxId> = pending.iter().map(|tx| tx.tx_id.clone()).collect();
        let result = self.backend.get_transactions(&tx_ids)?;

        let registration = if logic::has_registration(&pending) {
            Some(self.registration_proof()?)
        } else {
            None
        };

        let outcomes = logic::classify_all(&pending, &result.txs, registration.as_ref());
        logic::apply_outcomes(
            &self.store,
            &mut self.tracker,
            self.config.max_attempts,
            outcomes,
        )
    }

    fn registration_proof(&self) -> Result<RegistrationProof> {
        let balance = self.backend.get_encrypted_balance(&self.address)?;
        let block = self.backend.get_block(balance.registration)?;
        let hashes = self.backend.block_tx_hashes(&block)?;
        Ok(RegistrationProof::new(balance.registration, hashes))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    };

    use super::*;
    use crate::{
        error::Error,
        store::MemoryStore,
        tx::{OutgoingTransaction, TransactionType, TxStatus},
        EncryptedBalanceResult, GetBlockResult, GetTransactionResult, TxInfo,
    };

    const ADDRESS: &str = "dero1qyw4fl3dupcg5qlrcsvcedze507q9u67lxfpu8kgnzp04aq73yheqqg2ctjn4";

    /// Ledger stub answering from fixed data.
    #[derive(Default)]
    struct MockLedger {
        offline: AtomicBool,
        fail_lookups: AtomicBool,
        fail_balance: AtomicBool,
        confirmed: Mutex<Vec<(TxId, i64)>>,
        registration_height: i64,
        registration_block: Vec<TxId>,
        lookups: AtomicUsize,
    }

    impl MockLedger {
        fn confirm(&self, tx_id: &TxId, height: i64) {
            self.confirmed.lock().unwrap().push((tx_id.clone(), height));
        }
    }

    impl LedgerBackend for MockLedger {
        fn is_connected(&self) -> bool {
            !self.offline.load(Ordering::Relaxed)
        }

        fn get_transactions(&self, tx_ids: &[TxId]) -> Result<GetTransactionResult> {
            self.lookups.fetch_add(1, Ordering::Relaxed);
            if self.fail_lookups.load(Ordering::Relaxed) {
                return Err(Error::Backend("connection reset".into()));
            }
            let confirmed = self.confirmed.lock().unwrap();
            let txs = tx_ids
                .iter()
                .map(|id| match confirmed.iter().find(|(c, _)| c == id) {
                    Some((_, h)) => TxInfo::confirmed("b10c", *h),
                    None => TxInfo::default(),
                })
                .collect();
            Ok(GetTransactionResult {
                txs,
                txs_as_hex: vec![String::new(); tx_ids.len()],
            })
        }

        fn get_block(&self, height: i64) -> Result<GetBlockResult> {
            Ok(GetBlockResult {
                blob: height.to_string(),
            })
        }

        fn get_encrypted_balance(&self, address: &str) -> Result<EncryptedBalanceResult> {
            assert_eq!(address, ADDRESS);
            if self.fail_balance.load(Ordering::Relaxed) {
                return Err(Error::Backend("balance lookup timed out".into()));
            }
            Ok(EncryptedBalanceResult {
                registration: self.registration_height,
            })
        }

        fn block_tx_hashes(&self, block: &GetBlockResult) -> Result<Vec<TxId>> {
            if block.blob == self.registration_height.to_string() {
                Ok(self.registration_block.clone())
            } else {
                Ok(vec![])
            }
        }

        fn send_raw_transaction(&self, _tx_hex: &str) -> Result<()> {
            Ok(())
        }
    }

    /// Memory store whose status updates start failing after `budget` writes.
    struct FlakyStore {
        inner: MemoryStore,
        budget: AtomicUsize,
    }

    impl TxStore for FlakyStore {
        fn insert(&self, tx: &OutgoingTransaction) -> Result<bool> {
            self.inner.insert(tx)
        }
        fn get(&self, tx_id: &TxId) -> Result<Option<OutgoingTransaction>> {
            self.inner.get(tx_id)
        }
        fn query(&self, query: &OutgoingTxQuery) -> Result<Vec<OutgoingTransaction>> {
            self.inner.query(query)
        }
        fn update_status(
            &self,
            tx_id: &TxId,
            status: TxStatus,
            block_height: Option<i64>,
        ) -> Result<bool> {
            if self.budget.load(Ordering::Relaxed) == 0 {
                return Err(Error::Store("disk full".into()));
            }
            self.budget.fetch_sub(1, Ordering::Relaxed);
            self.inner.update_status(tx_id, status, block_height)
        }
        fn update_description(&self, tx_id: &TxId, description: Option<&str>) -> Result<bool> {
            self.inner.update_description(tx_id, description)
        }
        fn delete(&self, tx_id: &TxId) -> Result<bool> {
            self.inner.delete(tx_id)
        }
        fn clear(&self) -> Result<usize> {
            self.inner.clear()
        }
    }

    fn pending(n: u8, tx_type: TransactionType) -> OutgoingTransaction {
        OutgoingTransaction::pending(
            TxId::from_bytes([n; 32]),
            tx_type,
            Some(900),
            1_700_000_000,
            &[n; 8],
            None,
        )
    }

    #[test]
    fn test_offline_is_a_no_op() {
        let ledger = MockLedger::default();
        ledger.offline.store(true, Ordering::Relaxed);
        let store = MemoryStore::new();
        store.insert(&pending(1, TransactionType::Transfer)).unwrap();

        let mut reconciler = Reconciler::new(&ledger, &store, ADDRESS);
        assert_eq!(reconciler.poll().unwrap(), 0);

        // nothing was asked and nothing was counted
        assert_eq!(ledger.lookups.load(Ordering::Relaxed), 0);
        assert!(reconciler.tracker().is_empty());
    }

    #[test]
    fn test_nothing_pending_skips_lookup() {
        let ledger = MockLedger::default();
        let store = MemoryStore::new();

        let mut reconciler = Reconciler::new(&ledger, &store, ADDRESS);
        assert_eq!(reconciler.poll().unwrap(), 0);
        assert_eq!(ledger.lookups.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_retry_threshold_boundary() {
        let ledger = MockLedger::default();
        let store = MemoryStore::new();
        let tx = pending(1, TransactionType::Transfer);
        store.insert(&tx).unwrap();

        let mut reconciler = Reconciler::new(&ledger, &store, ADDRESS);

        for round in 1..=29 {
            assert_eq!(reconciler.poll().unwrap(), 0);
            assert_eq!(reconciler.tracker().attempts(&tx.tx_id), Some(round));
        }
        assert_eq!(
            store.get(&tx.tx_id).unwrap().unwrap().status,
            TxStatus::Pending
        );

        // 30th failed poll gives up
        assert_eq!(reconciler.poll().unwrap(), 1);
        let stored = store.get(&tx.tx_id).unwrap().unwrap();
        assert_eq!(stored.status, TxStatus::Invalid);
        assert_eq!(stored.block_height, Some(0));
        assert_eq!(reconciler.tracker().attempts(&tx.tx_id), None);

        // a terminal record is never polled again
        let lookups = ledger.lookups.load(Ordering::Relaxed);
        assert_eq!(reconciler.poll().unwrap(), 0);
        assert_eq!(ledger.lookups.load(Ordering::Relaxed), lookups);
    }

    #[test]
    fn test_custom_attempt_limit() {
        let ledger = MockLedger::default();
        let store = MemoryStore::new();
        let tx = pending(1, TransactionType::Transfer);
        store.insert(&tx).unwrap();

        let mut reconciler = Reconciler::new(&ledger, &store, ADDRESS)
            .with_config(ReconcilerConfig { max_attempts: 2 });
        assert_eq!(reconciler.poll().unwrap(), 0);
        assert_eq!(reconciler.poll().unwrap(), 1);
        assert_eq!(
            store.get(&tx.tx_id).unwrap().unwrap().status,
            TxStatus::Invalid
        );
    }

    #[test]
    fn test_confirmation_clears_counter() {
        let ledger = MockLedger::default();
        let store = MemoryStore::new();
        let tx = pending(1, TransactionType::Transfer);
        let other = pending(2, TransactionType::Transfer);
        store.insert(&tx).unwrap();
        store.insert(&other).unwrap();

        let mut reconciler = Reconciler::new(&ledger, &store, ADDRESS);
        assert_eq!(reconciler.poll().unwrap(), 0);
        assert_eq!(reconciler.tracker().len(), 2);

        ledger.confirm(&tx.tx_id, 1234);
        assert_eq!(reconciler.poll().unwrap(), 1);

        let stored = store.get(&tx.tx_id).unwrap().unwrap();
        assert_eq!(stored.status, TxStatus::Valid);
        assert_eq!(stored.block_height, Some(1234));
        assert_eq!(reconciler.tracker().attempts(&tx.tx_id), None);
        assert_eq!(reconciler.tracker().attempts(&other.tx_id), Some(2));
    }

    #[test]
    fn test_registration_confirms_through_registration_height() {
        let reg = pending(7, TransactionType::Registration);
        let ledger = MockLedger {
            registration_height: 4242,
            registration_block: vec![TxId::from_bytes([3; 32]), reg.tx_id.clone()],
            ..Default::default()
        };
        let store = MemoryStore::new();
        store.insert(&reg).unwrap();

        let mut reconciler = Reconciler::new(&ledger, &store, ADDRESS);
        assert_eq!(reconciler.poll().unwrap(), 1);

        let stored = store.get(&reg.tx_id).unwrap().unwrap();
        assert_eq!(stored.status, TxStatus::Valid);
        assert_eq!(stored.block_height, Some(4242));
    }

    #[test]
    fn test_registration_not_in_block_stays_pending() {
        let reg = pending(7, TransactionType::Registration);
        let ledger = MockLedger {
            registration_height: 4242,
            ..Default::default()
        };
        // a confirming block on the entry itself does not count
        ledger.confirm(&reg.tx_id, 4300);
        let store = MemoryStore::new();
        store.insert(&reg).unwrap();

        let mut reconciler = Reconciler::new(&ledger, &store, ADDRESS);
        assert_eq!(reconciler.poll().unwrap(), 0);
        assert_eq!(reconciler.tracker().attempts(&reg.tx_id), Some(1));
    }

    #[test]
    fn test_ledger_error_leaves_counters_untouched() {
        let ledger = MockLedger::default();
        let store = MemoryStore::new();
        let tx = pending(1, TransactionType::Transfer);
        store.insert(&tx).unwrap();

        let mut reconciler = Reconciler::new(&ledger, &store, ADDRESS);
        reconciler.poll().unwrap();

        ledger.fail_lookups.store(true, Ordering::Relaxed);
        let err = reconciler.poll().unwrap_err();
        assert_eq!(err.to_string(), "connection reset");
        assert_eq!(reconciler.tracker().attempts(&tx.tx_id), Some(1));
    }

    #[test]
    fn test_deleted_record_drops_counter() {
        let ledger = MockLedger::default();
        let store = MemoryStore::new();
        let tx = pending(1, TransactionType::Transfer);
        let kept = pending(2, TransactionType::Transfer);
        store.insert(&tx).unwrap();
        store.insert(&kept).unwrap();

        let mut reconciler = Reconciler::new(&ledger, &store, ADDRESS);
        reconciler.poll().unwrap();
        store.delete(&tx.tx_id).unwrap();
        reconciler.poll().unwrap();

        assert_eq!(reconciler.tracker().attempts(&tx.tx_id), None);
        assert_eq!(reconciler.tracker().attempts(&kept.tx_id), Some(2));
    }

    #[test]
    fn test_store_error_keeps_earlier_updates() {
        let ledger = MockLedger::default();
        let store = FlakyStore {
            inner: MemoryStore::new(),
            budget: AtomicUsize::new(1),
        };
        let txs: Vec<_> = (1..=3).map(|n| pending(n, TransactionType::Transfer)).collect();
        for tx in &txs {
            store.insert(tx).unwrap();
            ledger.confirm(&tx.tx_id, 50);
        }

        let mut reconciler = Reconciler::new(&ledger, &store, ADDRESS);
        let err = reconciler.poll().unwrap_err();
        assert_eq!(err.to_string(), "disk full");

        let statuses: Vec<TxStatus> = txs
            .iter()
            .map(|tx| store.get(&tx.tx_id).unwrap().unwrap().status)
            .collect();
        assert_eq!(
            statuses,
            vec![TxStatus::Valid, TxStatus::Pending, TxStatus::Pending]
        );

        // the next round finishes the rest
        store.budget.store(usize::MAX, Ordering::Relaxed);
        assert_eq!(reconciler.poll().unwrap(), 2);
    }

    #[test]
    fn test_registration_lookup_error_aborts_before_writes() {
        let transfer = pending(1, TransactionType::Transfer);
        let reg = pending(2, TransactionType::Registration);
        let ledger = MockLedger {
            registration_height: 4242,
            registration_block: vec![reg.tx_id.clone()],
            ..Default::default()
        };
        ledger.confirm(&transfer.tx_id, 4250);
        ledger.fail_balance.store(true, Ordering::Relaxed);
        let store = MemoryStore::new();
        store.insert(&transfer).unwrap();
        store.insert(&reg).unwrap();

        let mut reconciler = Reconciler::new(&ledger, &store, ADDRESS);
        let err = reconciler.poll().unwrap_err();
        assert_eq!(err.to_string(), "balance lookup timed out");

        // the confirmed transfer was not written either
        assert_eq!(store.query(&OutgoingTxQuery::pending()).unwrap().len(), 2);
        assert!(reconciler.tracker().is_empty());

        ledger.fail_balance.store(false, Ordering::Relaxed);
        assert_eq!(reconciler.poll().unwrap(), 2);
    }
}
