//! Steps shared by the blocking and async pipelines.

use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, info, warn};

use super::{BuiltTransaction, Transfer};
use crate::{
    error::{Error, Result},
    store::TxStore,
    tx::{OutgoingTransaction, ScArg},
};

pub(crate) fn check_request(transfers: &[Transfer], sc_args: &[ScArg]) -> Result<()> {
    if transfers.is_empty() && sc_args.is_empty() {
        return Err(Error::Build("nothing to send".to_string()));
    }
    Ok(())
}

/// Pending record of a transaction that was just submitted.
pub(crate) fn pending_record(
    built: BuiltTransaction,
    description: Option<&str>,
) -> OutgoingTransaction {
    OutgoingTransaction::pending(
        built.tx_id,
        built.tx_type,
        built.height_built,
        unix_now(),
        &built.raw,
        description.map(str::to_string),
    )
}

/// Insert `record`, returning the row that ends up stored.
pub(crate) fn store_record<S: TxStore>(
    store: &S,
    record: OutgoingTransaction,
) -> Result<OutgoingTransaction> {
    match store.insert(&record) {
        Ok(true) => {
            info!("transaction {} broadcast, pending", record.tx_id);
            Ok(record)
        }
        Ok(false) => {
            // rebroadcast of a recorded transaction, the first record stands
            debug!("transaction {} rebroadcast, already recorded", record.tx_id);
            Ok(store.get(&record.tx_id)?.unwrap_or(record))
        }
        Err(e) => {
            warn!(
                "transaction {} broadcast but not recorded: {}",
                record.tx_id, e
            );
            Err(e)
        }
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
