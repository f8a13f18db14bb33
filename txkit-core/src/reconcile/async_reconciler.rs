use log::debug;

use super::{
    logic::{self, RegistrationProof},
    ReconcilerConfig, RetryTracker,
};
use crate::{
    error::Result,
    ledger::AsyncLedgerBackend,
    store::{OutgoingTxQuery, TxStore},
    tx::TxId,
};

/// Async version of Reconciler for non-blocking ledger I/O
///
/// Store calls stay synchronous; they are expected to be local and short.
pub struct AsyncReconciler<B, S>
where
    B: AsyncLedgerBackend,
    S: TxStore,
{
    backend: B,
    store: S,
    address: String,
    config: ReconcilerConfig,
    tracker: RetryTracker,
}

impl<B: AsyncLedgerBackend, S: TxStore> AsyncReconciler<B, S> {
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

    /// Run one reconciliation round, see [`crate::Reconciler::poll`].
    pub async fn poll(&mut self) -> Result<usize> {
        if !self.backend.is_connected() {
            debug!("ledger not connected, skipping reconciliation");
            return Ok(0);
        }

        let pending = self.store.query(&OutgoingTxQuery::pending())?;
        if pending.is_empty() {
            return Ok(0);
        }

        let tx_ids: Vec<TxId> = pending.iter().map(|tx| tx.tx_id.clone()).collect();
        let registration = async {
            if logic::has_registration(&pending) {
                self.registration_proof().await.map(Some)
            } else {
                Ok(None)
            }
        };

        // both lookups are independent, run them side by side
        let (result, registration) =
            futures::try_join!(self.backend.get_transactions(&tx_ids), registration)?;

        let outcomes = logic::classify_all(&pending, &result.txs, registration.as_ref());
        logic::apply_outcomes(
            &self.store,
            &mut self.tracker,
            self.config.max_attempts,
            outcomes,
        )
    }

    async fn registration_proof(&self) -> Result<RegistrationProof> {
        let balance = self.backend.get_encrypted_balance(&self.address).await?;
        let block = self.backend.get_block(balance.registration).await?;
        let hashes = self.backend.block_tx_hashes(&block)?;
        Ok(RegistrationProof::new(balance.registration, hashes))
    }
}
