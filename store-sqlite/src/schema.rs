use log::info;
use rusqlite::Connection;

use crate::error::{Error, Result};

/// Version stored in `PRAGMA user_version` once migrations have run.
pub const SCHEMA_VERSION: i64 = 2;

const CREATE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS outgoing_txs (
        tx_id        TEXT PRIMARY KEY,
        height_built INTEGER NULL,
        timestamp    INTEGER NULL,
        status       TEXT NULL,
        tx_type      INTEGER NULL,
        hex_data     TEXT NULL,
        block_height INTEGER NULL,
        description  TEXT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_outgoing_txs_status
        ON outgoing_txs(status);
"#;

/// Columns added after the first release, with their definitions.
const ADDED_COLUMNS: [(&str, &str); 1] = [("description", "TEXT NULL")];

/// Create the table if needed and bring an older one up to date.
pub(crate) fn migrate(conn: &Connection) -> Result<()> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if version > SCHEMA_VERSION {
        return Err(Error::UnsupportedSchema {
            found: version,
            supported: SCHEMA_VERSION,
        });
    }

    conn.execute_batch(CREATE_SQL)?;

    for (column, definition) in ADDED_COLUMNS {
        if !column_exists(conn, column)? {
            info!("adding outgoing_txs.{column}");
            conn.execute(
                &format!("ALTER TABLE outgoing_txs ADD COLUMN {column} {definition}"),
                [],
            )?;
        }
    }

    if version < SCHEMA_VERSION {
        conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))?;
    }
    Ok(())
}

fn column_exists(conn: &Connection, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info(outgoing_txs)")?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_version(conn: &Connection) -> i64 {
        conn.query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_migrate_fresh_database() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        assert!(column_exists(&conn, "description").unwrap());
        assert_eq!(user_version(&conn), SCHEMA_VERSION);
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();
        assert_eq!(user_version(&conn), SCHEMA_VERSION);
    }

    #[test]
    fn test_adds_description_to_legacy_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE outgoing_txs (
                tx_id TEXT PRIMARY KEY,
                height_built INTEGER NULL,
                timestamp INTEGER NULL,
                status TEXT NULL,
                tx_type INTEGER NULL,
                hex_data TEXT NULL,
                block_height INTEGER NULL
            )",
        )
        .unwrap();
        assert!(!column_exists(&conn, "description").unwrap());

        migrate(&conn).unwrap();
        assert!(column_exists(&conn, "description").unwrap());
    }

    #[test]
    fn test_rejects_newer_schema() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA user_version = 99").unwrap();

        assert!(matches!(
            migrate(&conn),
            Err(Error::UnsupportedSchema { found: 99, .. })
        ));
    }
}
