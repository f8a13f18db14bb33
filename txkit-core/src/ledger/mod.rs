mod backend;
#[cfg(feature = "async")]
mod backend_async;
mod structs;

pub use backend::LedgerBackend;
#[cfg(feature = "async")]
pub use backend_async::AsyncLedgerBackend;
pub use structs::*;
