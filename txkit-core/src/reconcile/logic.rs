use std::collections::HashSet;

use log::{debug, info, warn};

use super::RetryTracker;
use crate::{
    error::Result,
    ledger::TxInfo,
    store::TxStore,
    tx::{OutgoingTransaction, TransactionType, TxId, TxStatus},
};

/// What the ledger says about one pending record this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Confirmed { block_height: i64 },
    Unconfirmed,
}

/// Registration height of the wallet address and the transactions of the
/// block at that height.
#[derive(Debug, Clone)]
pub(crate) struct RegistrationProof {
    pub(crate) height: i64,
    pub(crate) block_txs: HashSet<TxId>,
}

impl RegistrationProof {
    pub(crate) fn new(height: i64, block_txs: Vec<TxId>) -> Self {
        Self {
            height,
            block_txs: block_txs.into_iter().collect(),
        }
    }
}

pub(crate) fn has_registration(pending: &[OutgoingTransaction]) -> bool {
    pending
        .iter()
        .any(|tx| tx.tx_type == TransactionType::Registration)
}

/// Decide the outcome of one record.
///
/// Registration transactions never get a confirming block on their own
/// entry; they count as confirmed once they appear in the block at the
/// address's registration height.
pub(crate) fn classify(
    record: &OutgoingTransaction,
    info: Option<&TxInfo>,
    registration: Option<&RegistrationProof>,
) -> Outcome {
    if record.tx_type == TransactionType::Registration {
        return match registration {
            Some(proof) if proof.block_txs.contains(&record.tx_id) => Outcome::Confirmed {
                block_height: proof.height,
            },
            _ => Outcome::Unconfirmed,
        };
    }

    match info.and_then(TxInfo::confirming_block) {
        Some((_, block_height)) => Outcome::Confirmed { block_height },
        None => Outcome::Unconfirmed,
    }
}

/// Pair each pending record with its ledger answer, by position.
pub(crate) fn classify_all(
    pending: &[OutgoingTransaction],
    infos: &[TxInfo],
    registration: Option<&RegistrationProof>,
) -> Vec<(TxId, Outcome)> {
    if infos.len() != pending.len() {
        warn!(
            "ledger answered {} of {} pending transactions",
            infos.len(),
            pending.len()
        );
    }

    pending
        .iter()
        .enumerate()
        .map(|(i, record)| {
            (
                record.tx_id.clone(),
                classify(record, infos.get(i), registration),
            )
        })
        .collect()
}

/// Write the round's outcomes to the store and retry tracker.
///
/// Stops at the first store error; updates applied before it stay.
pub(crate) fn apply_outcomes<S: TxStore + ?Sized>(
    store: &S,
    tracker: &mut RetryTracker,
    max_attempts: u32,
    outcomes: Vec<(TxId, Outcome)>,
) -> Result<usize> {
    let pending: HashSet<&TxId> = outcomes.iter().map(|(id, _)| id).collect();
    tracker.retain(&pending);

    let mut updated = 0;

    for (tx_id, outcome) in &outcomes {
        match outcome {
            Outcome::Confirmed { block_height } => {
                store.update_status(tx_id, TxStatus::Valid, Some(*block_height))?;
                tracker.clear(tx_id);
                updated += 1;
                info!("transaction {} confirmed at height {}", tx_id, block_height);
            }
            Outcome::Unconfirmed => {
                let attempts = tracker.record_failure(tx_id);
                if attempts >= max_attempts {
                    store.update_status(tx_id, TxStatus::Invalid, Some(0))?;
                    tracker.clear(tx_id);
                    updated += 1;
                    info!(
                        "transaction {} still unconfirmed after {} polls, marked invalid",
                        tx_id, attempts
                    );
                } else {
                    debug!(
                        "transaction {} unconfirmed ({}/{})",
                        tx_id, attempts, max_attempts
                    );
                }
            }
        }
    }

    Ok(updated)
}
