//! Table definitions and additive migrations.
//!
//! Databases created by earlier releases lack `control_status.changed_by`
//! and `users.use_seq`. Both are added in place on open; existing rows keep
//! their data and read the new column as NULL / 0.

use rusqlite::Connection;

use crate::error::StoreError;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS control_status (
    control_id TEXT PRIMARY KEY,
    status TEXT,
    notes TEXT,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL,
    last_used TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
";

/// SQL expression for "now" with millisecond precision, in the same
/// `YYYY-MM-DD HH:MM:SS` shape `CURRENT_TIMESTAMP` produces.
pub(crate) const NOW_SQL: &str = "strftime('%Y-%m-%d %H:%M:%f', 'now')";

pub(crate) fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(SCHEMA_SQL)?;
    if add_column_if_missing(conn, "control_status", "changed_by", "TEXT")? {
        tracing::info!("migrated control_status: added changed_by column");
    }
    if add_column_if_missing(conn, "users", "use_seq", "INTEGER NOT NULL DEFAULT 0")? {
        tracing::info!("migrated users: added use_seq column");
    }
    Ok(())
}

/// Returns `true` if the column was added, `false` if it already existed.
fn add_column_if_missing(
    conn: &Connection,
    table: &str,
    column: &str,
    decl: &str,
) -> Result<bool, StoreError> {
    let sql = format!("ALTER TABLE {table} ADD COLUMN {column} {decl}");
    match conn.execute(&sql, []) {
        Ok(_) => Ok(true),
        Err(err) if is_duplicate_column(&err) => Ok(false),
        Err(err) => Err(StoreError::Sql(err)),
    }
}

fn is_duplicate_column(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => {
            message.contains("duplicate column name")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(conn: &Connection, table: &str) -> Vec<String> {
        let mut stmt = conn
            .prepare(&format!("SELECT name FROM pragma_table_info('{table}')"))
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_fresh_schema_has_all_columns() {
        let conn = Connection::open_in_memory().unwrap();
        install_schema(&conn).unwrap();
        let cols = columns(&conn, "control_status");
        assert!(cols.contains(&"changed_by".to_string()));
        assert!(columns(&conn, "users").contains(&"use_seq".to_string()));
    }

    #[test]
    fn test_install_twice_is_noop() {
        let conn = Connection::open_in_memory().unwrap();
        install_schema(&conn).unwrap();
        install_schema(&conn).unwrap();
        let cols = columns(&conn, "control_status");
        assert_eq!(cols.iter().filter(|c| *c == "changed_by").count(), 1);
    }

    #[test]
    fn test_legacy_table_gains_changed_by_without_data_loss() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE control_status (
                 control_id TEXT PRIMARY KEY, status TEXT, notes TEXT,
                 updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP);
             INSERT INTO control_status (control_id, status, notes)
                 VALUES ('C1', 'erfuellt', 'alt');",
        )
        .unwrap();

        install_schema(&conn).unwrap();

        let (notes, by): (String, Option<String>) = conn
            .query_row(
                "SELECT notes, changed_by FROM control_status WHERE control_id = 'C1'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(notes, "alt");
        assert_eq!(by, None);
    }
}
