//! Outgoing transaction lifecycle for light wallets.
//!
//! A transaction is recorded as pending the moment it is broadcast, then a
//! [`Reconciler`] repeatedly asks the ledger about every pending record until
//! it is confirmed or given up on. [`FilterEngine`] answers history queries
//! over the wallet's in-memory transfer log.

#![allow(clippy::module_inception)]

pub mod constants;
pub mod error;
mod history;
mod ledger;
mod pipeline;
mod reconcile;
mod store;
mod tx;

pub use error::{Error, Result};
pub use history::*;
pub use ledger::*;
pub use pipeline::*;
pub use reconcile::*;
pub use store::*;
pub use tx::*;
