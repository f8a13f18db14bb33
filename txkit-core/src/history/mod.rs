//! Queries over the wallet's transfer history.
//!
//! [`FilterEngine`] fans an [`EntryFilter`] out over chunks of the history
//! log and gathers the matches back in time order. With the `parallel`
//! feature workers run on the rayon pool, otherwise on scoped std threads.
//!
//! Wallets holding tokens keep one log per asset; [`FilterEngine::filter_assets`]
//! queries a single asset or all of them merged.

mod engine;
mod entry;
mod filter;

pub use engine::FilterEngine;
pub use entry::{AssetEntry, HistoryEntry};
pub use filter::{EntryFilter, ScCallFilter};
