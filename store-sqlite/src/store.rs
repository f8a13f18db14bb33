use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};

use log::{debug, info};
use rusqlite::{params, params_from_iter, types::Value, Connection, OptionalExtension};
use txkit_core::{
    OutgoingTransaction, OutgoingTxQuery, TransactionType, TxId, TxStatus, TxStore,
};

use crate::{
    error::{Error, Result},
    schema,
};

const SELECT_COLUMNS: &str = "SELECT tx_id, height_built, timestamp, status, tx_type, \
                              hex_data, block_height, description FROM outgoing_txs";

/// [`TxStore`] backed by a SQLite database.
///
/// One connection is shared behind a mutex; every call holds the lock for a
/// single statement.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("opening outgoing tx store at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Take over an open connection, migrating its schema first.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        schema::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::Poisoned)
    }

    fn insert_row(&self, tx: &OutgoingTransaction) -> Result<bool> {
        let n = self.conn()?.execute(
            "INSERT OR IGNORE INTO outgoing_txs \
             (tx_id, height_built, timestamp, status, tx_type, hex_data, block_height, description) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                tx.tx_id.as_str(),
                tx.height_built,
                tx.timestamp,
                tx.status.as_str(),
                tx.tx_type.code(),
                tx.raw_hex,
                tx.block_height,
                tx.description,
            ],
        )?;
        if n == 0 {
            debug!("transaction {} already recorded", tx.tx_id);
        }
        Ok(n > 0)
    }

    fn get_row(&self, tx_id: &TxId) -> Result<Option<OutgoingTransaction>> {
        let row = self
            .conn()?
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE tx_id = ?1"),
                [tx_id.as_str()],
                StoredRow::read,
            )
            .optional()?;
        row.map(StoredRow::into_tx).transpose()
    }

    fn query_rows(&self, query: &OutgoingTxQuery) -> Result<Vec<OutgoingTransaction>> {
        let (sql, values) = build_query(query);
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(values), StoredRow::read)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(StoredRow::into_tx).collect()
    }
}

impl TxStore for SqliteStore {
    fn insert(&self, tx: &OutgoingTransaction) -> txkit_core::Result<bool> {
        Ok(self.insert_row(tx)?)
    }

    fn get(&self, tx_id: &TxId) -> txkit_core::Result<Option<OutgoingTransaction>> {
        Ok(self.get_row(tx_id)?)
    }

    fn query(&self, query: &OutgoingTxQuery) -> txkit_core::Result<Vec<OutgoingTransaction>> {
        Ok(self.query_rows(query)?)
    }

    fn update_status(
        &self,
        tx_id: &TxId,
        status: TxStatus,
        block_height: Option<i64>,
    ) -> txkit_core::Result<bool> {
        let n = self
            .conn()?
            .execute(
                "UPDATE outgoing_txs SET status = ?1, block_height = ?2 WHERE tx_id = ?3",
                params![status.as_str(), block_height, tx_id.as_str()],
            )
            .map_err(Error::from)?;
        Ok(n > 0)
    }

    fn update_description(
        &self,
        tx_id: &TxId,
        description: Option<&str>,
    ) -> txkit_core::Result<bool> {
        let n = self
            .conn()?
            .execute(
                "UPDATE outgoing_txs SET description = ?1 WHERE tx_id = ?2",
                params![description, tx_id.as_str()],
            )
            .map_err(Error::from)?;
        Ok(n > 0)
    }

    fn delete(&self, tx_id: &TxId) -> txkit_core::Result<bool> {
        let n = self
            .conn()?
            .execute("DELETE FROM outgoing_txs WHERE tx_id = ?1", [tx_id.as_str()])
            .map_err(Error::from)?;
        Ok(n > 0)
    }

    fn clear(&self) -> txkit_core::Result<usize> {
        let n = self
            .conn()?
            .execute("DELETE FROM outgoing_txs", [])
            .map_err(Error::from)?;
        info!("cleared {n} outgoing transactions");
        Ok(n)
    }
}

/// SQL text and bound values for `query`.
fn build_query(query: &OutgoingTxQuery) -> (String, Vec<Value>) {
    let mut sql = String::from(SELECT_COLUMNS);
    let mut values = Vec::new();
    let mut clauses = Vec::new();

    if let Some(tx_type) = query.tx_type {
        values.push(Value::Integer(tx_type.code()));
        clauses.push(format!("tx_type = ?{}", values.len()));
    }
    if let Some(status) = query.status {
        values.push(Value::Text(status.as_str().to_string()));
        clauses.push(format!("status = ?{}", values.len()));
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    match query.order_by {
        Some(column) => {
            let dir = if query.descending { "DESC" } else { "ASC" };
            sql.push_str(&format!(
                " ORDER BY {} {dir}, tx_id ASC",
                column.column_name()
            ));
        }
        None => sql.push_str(" ORDER BY tx_id ASC"),
    }

    // SQLite only accepts OFFSET after a LIMIT, -1 means unbounded
    if query.limit.is_some() || query.offset.is_some() {
        let limit = query.limit.map_or(-1, clamp);
        values.push(Value::Integer(limit));
        sql.push_str(&format!(" LIMIT ?{}", values.len()));
    }
    if let Some(offset) = query.offset {
        values.push(Value::Integer(clamp(offset)));
        sql.push_str(&format!(" OFFSET ?{}", values.len()));
    }

    (sql, values)
}

fn clamp(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// A row as stored, before validation.
struct StoredRow {
    tx_id: String,
    height_built: Option<i64>,
    timestamp: Option<i64>,
    status: Option<String>,
    tx_type: Option<i64>,
    hex_data: Option<String>,
    block_height: Option<i64>,
    description: Option<String>,
}

impl StoredRow {
    fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            tx_id: row.get(0)?,
            height_built: row.get(1)?,
            timestamp: row.get(2)?,
            status: row.get(3)?,
            tx_type: row.get(4)?,
            hex_data: row.get(5)?,
            block_height: row.get(6)?,
            description: row.get(7)?,
        })
    }

    fn into_tx(self) -> Result<OutgoingTransaction> {
        let status: TxStatus = self.status.ok_or(Error::MissingColumn("status"))?.parse()?;
        let tx_type: TransactionType = self
            .tx_type
            .ok_or(Error::MissingColumn("tx_type"))?
            .try_into()?;

        Ok(OutgoingTransaction {
            tx_id: TxId::parse(&self.tx_id)?,
            tx_type,
            height_built: self.height_built,
            timestamp: self.timestamp.ok_or(Error::MissingColumn("timestamp"))?,
            status,
            raw_hex: self.hex_data.ok_or(Error::MissingColumn("hex_data"))?,
            block_height: self.block_height,
            description: self.description,
        })
    }
}
