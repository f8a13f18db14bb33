use std::sync::Mutex;

use txkit_core::{
    BuiltTransaction, EncryptedBalanceResult, Error, GetBlockResult, GetTransactionResult,
    LedgerBackend, MemoryStore, OutgoingTxQuery, Reconciler, Result, ScArg, SigningGate,
    TransactionPipeline, TransactionType, Transfer, TxBuilder, TxId, TxInfo, TxStatus, TxStore,
};

/// Ledger that accepts every broadcast and confirms on demand.
#[derive(Default)]
struct Node {
    mempool: Mutex<Vec<String>>,
    confirmed_at: Mutex<Option<i64>>,
}

impl Node {
    fn mine(&self, height: i64) {
        *self.confirmed_at.lock().unwrap() = Some(height);
    }
}

impl LedgerBackend for Node {
    fn is_connected(&self) -> bool {
        true
    }

    fn get_transactions(&self, tx_ids: &[TxId]) -> Result<GetTransactionResult> {
        let info = match *self.confirmed_at.lock().unwrap() {
            Some(height) => TxInfo::confirmed("b10c", height),
            None => TxInfo::default(),
        };
        Ok(GetTransactionResult {
            txs: vec![info; tx_ids.len()],
            txs_as_hex: vec![],
        })
    }

    fn get_block(&self, _height: i64) -> Result<GetBlockResult> {
        Ok(GetBlockResult::default())
    }

    fn get_encrypted_balance(&self, _address: &str) -> Result<EncryptedBalanceResult> {
        Ok(EncryptedBalanceResult::default())
    }

    fn block_tx_hashes(&self, _block: &GetBlockResult) -> Result<Vec<TxId>> {
        Ok(vec![])
    }

    fn send_raw_transaction(&self, tx_hex: &str) -> Result<()> {
        self.mempool.lock().unwrap().push(tx_hex.to_string());
        Ok(())
    }
}

struct Builder;

impl TxBuilder for Builder {
    fn build(&self, _transfers: &[Transfer], _ring: u64, _sc: &[ScArg]) -> Result<BuiltTransaction> {
        Ok(BuiltTransaction {
            tx_id: TxId::from_bytes([7; 32]),
            tx_type: TransactionType::Transfer,
            height_built: Some(1500),
            raw: vec![1, 2, 3],
            fee: 90,
        })
    }
}

struct Gate;

impl SigningGate for Gate {
    fn authorize(&self, _tx: &BuiltTransaction, credential: &str) -> Result<()> {
        if credential == "open sesame" {
            Ok(())
        } else {
            Err(Error::Authorization("bad password".to_string()))
        }
    }
}

#[test]
fn test_broadcast_then_confirm() {
    let node = Node::default();
    let store = MemoryStore::new();

    let pipeline = TransactionPipeline::new(&node, &store, Builder, Gate);
    let sent = pipeline
        .send(&[Transfer::new("dero1qy", 1000)], 16, &[], "open sesame", Some("rent"))
        .unwrap();
    assert_eq!(node.mempool.lock().unwrap().len(), 1);
    assert_eq!(store.query(&OutgoingTxQuery::pending()).unwrap().len(), 1);

    let mut reconciler = Reconciler::new(&node, &store, "dero1self");

    // not yet mined
    assert_eq!(reconciler.poll().unwrap(), 0);
    let row = store.get(&sent.tx_id).unwrap().unwrap();
    assert_eq!(row.status, TxStatus::Pending);
    assert_eq!(reconciler.tracker().attempts(&sent.tx_id), Some(1));

    node.mine(1502);
    assert_eq!(reconciler.poll().unwrap(), 1);
    let row = store.get(&sent.tx_id).unwrap().unwrap();
    assert_eq!(row.status, TxStatus::Valid);
    assert_eq!(row.block_height, Some(1502));
    assert_eq!(row.description.as_deref(), Some("rent"));
    assert!(reconciler.tracker().is_empty());

    // terminal records are left alone
    assert_eq!(reconciler.poll().unwrap(), 0);
}

#[test]
fn test_rejected_credential_leaves_no_trace() {
    let node = Node::default();
    let store = MemoryStore::new();
    let pipeline = TransactionPipeline::new(&node, &store, Builder, Gate);

    let err = pipeline
        .send(&[Transfer::new("dero1qy", 1000)], 16, &[], "letmein", None)
        .unwrap_err();

    assert!(err.is_authorization());
    assert!(node.mempool.lock().unwrap().is_empty());
    assert!(store.query(&OutgoingTxQuery::new()).unwrap().is_empty());
}
