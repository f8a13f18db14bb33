use std::time::Duration;

/// Number of consecutive unconfirmed polls after which a pending
/// transaction is marked invalid.
pub const MAX_CONFIRMATION_ATTEMPTS: u32 = 30;

/// Interval at which schedulers are expected to run a reconciliation round.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Size of the "recent transactions" view.
pub const RECENT_TXS_LIMIT: u64 = 10;

/// Length in bytes of a transaction or block hash.
pub const HASH_SIZE: usize = 32;

/// SC call argument holding the smart contract id.
pub const SC_ID_ARG: &str = "SC_ID";

/// SC call argument holding the invoked entrypoint.
pub const SC_ENTRYPOINT_ARG: &str = "entrypoint";
