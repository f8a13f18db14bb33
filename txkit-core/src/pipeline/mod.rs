//! Outgoing transaction flow: build, authorize, broadcast, record.
//!
//! Building and signing belong to the wallet engine and are reached through
//! [`TxBuilder`] and [`SigningGate`]. [`TransactionPipeline`] only enforces
//! the order of the steps and records every broadcast transaction as
//! pending before handing control back.
//!
//! - [`TransactionPipeline`] - Blocking broadcast
//! - [`AsyncTransactionPipeline`] - Async broadcast (requires `async` feature)

#[cfg(feature = "async")]
mod async_pipeline;
mod logic;
mod pipeline;
mod structs;
mod traits;

#[cfg(feature = "async")]
pub use async_pipeline::AsyncTransactionPipeline;
pub use pipeline::TransactionPipeline;
pub use structs::*;
pub use traits::{SigningGate, TxBuilder};
