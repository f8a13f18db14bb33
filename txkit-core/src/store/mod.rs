//! Durable record of everything the wallet has broadcast.
//!
//! ## Traits
//!
//! - [`TxStore`] - Insert, query, update and delete outgoing transaction records
//!
//! ## Implementations
//!
//! - [`MemoryStore`] - In-process store for tests and ephemeral wallets
//! - `store-sqlite` crate - SQLite backed store
//!
//! Each operation is atomic on its own. Nothing spans several calls, so a
//! batch of reconciliation updates is applied one record at a time.

mod memory;
mod query;
mod store;

pub use memory::MemoryStore;
pub use query::{OrderColumn, OutgoingTxQuery};
pub use store::TxStore;
