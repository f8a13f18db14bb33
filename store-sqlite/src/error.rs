use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("sqlite connection lock poisoned")]
    Poisoned,
    #[error("outgoing_txs.{0} is NULL")]
    MissingColumn(&'static str),
    #[error("database schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: i64, supported: i64 },
    #[error(transparent)]
    Core(#[from] txkit_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for txkit_core::Error {
    fn from(e: Error) -> Self {
        match e {
            // stored data that fails validation keeps its own error kind
            Error::Core(e) => e,
            e => txkit_core::Error::Store(Box::new(e)),
        }
    }
}
