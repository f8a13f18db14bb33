//! Locally originated transactions and their lifecycle states.
//!
//! ## Core Types
//!
//! - [`OutgoingTransaction`] - One broadcast transaction as recorded by the wallet
//! - [`TxId`] - Hex transaction hash, the record's primary key
//! - [`TxStatus`] - Closed `pending` / `valid` / `invalid` lifecycle
//! - [`TransactionType`] - Ledger transaction kind, selects how a record confirms

mod id;
mod outgoing;
mod status;

pub use id::TxId;
pub use outgoing::{OutgoingTransaction, ScArg};
pub use status::{TransactionType, TxStatus};
