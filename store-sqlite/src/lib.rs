//! SQLite persistence for outgoing transaction records.
//!
//! [`SqliteStore`] implements [`txkit_core::TxStore`] on top of a single
//! `outgoing_txs` table. Opening a wallet file created by an older release
//! adds any missing columns in place.

#![allow(clippy::module_inception)]
mod error;
mod schema;
mod store;

pub use error::{Error, Result};
pub use schema::SCHEMA_VERSION;
pub use store::SqliteStore;
