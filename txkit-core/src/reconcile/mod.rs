//! Reconciliation of locally pending transactions against the ledger.
//!
//! A round loads every `pending` record, asks the ledger about all of them
//! in one batch, and moves each record to `valid` once confirmed, or to
//! `invalid` after too many unconfirmed rounds.
//!
//! ```text
//! pending --(confirmed)----------------> valid    (terminal)
//! pending --(max_attempts failed polls)-> invalid (terminal)
//! ```
//!
//! - [`Reconciler`] - Blocking ledger calls
//! - [`AsyncReconciler`] - Async ledger calls (requires `async` feature)
//!
//! Both share the decision logic and differ only in how the ledger is called.

#[cfg(feature = "async")]
mod async_reconciler;
mod config;
pub(crate) mod logic;
mod reconciler;
mod retry;

#[cfg(feature = "async")]
pub use async_reconciler::AsyncReconciler;
pub use config::ReconcilerConfig;
pub use reconciler::Reconciler;
pub use retry::RetryTracker;
