use super::{logic, AuthorizedTransaction, BuiltTransaction, SigningGate, Transfer, TxBuilder};
use crate::{
    error::Result,
    ledger::LedgerBackend,
    store::TxStore,
    tx::{OutgoingTransaction, ScArg},
};

/// Build, authorize, broadcast and record an outgoing transaction.
pub struct TransactionPipeline<B, S, W, G>
where
    B: LedgerBackend,
    S: TxStore,
    W: TxBuilder,
    G: SigningGate,
{
    backend: B,
    store: S,
    builder: W,
    gate: G,
}

impl<B, S, W, G> TransactionPipeline<B, S, W, G>
where
    B: LedgerBackend,
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

    /// Submit the transaction and record it as pending before returning.
    ///
    /// If recording fails after a successful submission the store error is
    /// returned; the transaction is already on the wire and is not resent.
    /// Rebroadcasting a recorded transaction returns the existing record.
    pub fn broadcast(
        &self,
        tx: AuthorizedTransaction,
        description: Option<&str>,
    ) -> Result<OutgoingTransaction> {
        let built = tx.into_built();
        self.backend.send_raw_transaction(&hex::encode(&built.raw))?;
        logic::store_record(&self.store, logic::pending_record(built, description))
    }

    /// Run every step in order, stopping at the first failure.
    pub fn send(
        &self,
        transfers: &[Transfer],
        ring_size: u64,
        sc_args: &[ScArg],
        credential: &str,
        description: Option<&str>,
    ) -> Result<OutgoingTransaction> {
        let built = self.build(transfers, ring_size, sc_args)?;
        let authorized = self.authorize(built, credential)?;
        self.broadcast(authorized, description)
    }
}
