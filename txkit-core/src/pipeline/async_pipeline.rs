use super::{logic, AuthorizedTransaction, BuiltTransaction, SigningGate, Transfer, TxBuilder};
use crate::{
    error::Result,
    ledger::AsyncLedgerBackend,
    store::TxStore,
    tx::{OutgoingTransaction, ScArg},
};

/// Async version of TransactionPipeline for non-blocking broadcast
///
/// Only the ledger call is awaited; building, signing and recording stay
/// synchronous.
pub struct AsyncTransactionPipeline<B, S, W, G>
where
    B: AsyncLedgerBackend,
    S: TxStore,
    W: TxBuilder,
    G: SigningGate,
{
    backend: B,
    store: S,
    builder: W,
    gate: G,
}

impl<B, S, W, G> AsyncTransactionPipeline<B, S, W, G>
where
    B: AsyncLedgerBackend,
    S: TxStore,
    W: TxBuilder,
    G: SigningGate,
{
    pub fn new(backend: B, store: S, builder: W, gate: G) -> Self {
        Self {
            backend,
            store,
            builder,
            gate,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn build(
        &self,
        transfers: &[Transfer],
        ring_size: u64,
        sc_args: &[ScArg],
    ) -> Result<BuiltTransaction> {
        logic::check_request(transfers, sc_args)?;
        self.builder.build(transfers, ring_size, sc_args)
    }

    pub fn authorize(
        &self,
        built: BuiltTransaction,
        credential: &str,
    ) -> Result<AuthorizedTransaction> {
        self.gate.authorize(&built, credential)?;
        Ok(AuthorizedTransaction::new(built))
    }

    /// See [`crate::TransactionPipeline::broadcast`].
    pub async fn broadcast(
        &self,
        tx: AuthorizedTransaction,
        description: Option<&str>,
    ) -> Result<OutgoingTransaction> {
        let built = tx.into_built();
        self.backend
            .send_raw_transaction(&hex::encode(&built.raw))
            .await?;
        logic::store_record(&self.store, logic::pending_record(built, description))
    }

    pub async fn send(
        &self,
        transfers: &[Transfer],
        ring_size: u64,
        sc_args: &[ScArg],
        credential: &str,
        description: Option<&str>,
    ) -> Result<OutgoingTransaction> {
        let built = self.build(transfers, ring_size, sc_args)?;
        let authorized = self.authorize(built, credential)?;
        self.broadcast(authorized, description).await
    }
}
