use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Validation
    #[error("invalid transaction id: {0}")]
    InvalidTxId(String),
    #[error("unknown transaction status {0:?}")]
    UnknownStatus(String),
    #[error("unknown transaction type {0}")]
    UnknownTransactionType(i64),

    // Pipeline
    #[error("authorization failed: {0}")]
    Authorization(String),
    #[error("failed to build transaction: {0}")]
    Build(String),
    #[error("failed to broadcast transaction: {0}")]
    Broadcast(String),

    // Wrapped external errors
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),

    // Pass-through for downstream storage and backend crates
    #[error(transparent)]
    Store(Box<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Whether the UI should re-prompt for the signing credential.
    pub fn is_authorization(&self) -> bool {
        matches!(self, Error::Authorization(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
