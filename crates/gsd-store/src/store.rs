//! # Status Store
//!
//! Durable `control_id → (status, notes, changed_by, updated_at)` table
//! plus the `users` recency table behind name suggestions.
//!
//! ## Write semantics
//!
//! [`StatusStore::save()`] is a full overwrite (`INSERT OR REPLACE`): empty
//! notes erase previous notes. The status row and the name upsert run in
//! one transaction, so a failed save leaves both tables unchanged.
//!
//! The store performs no validation. Callers run
//! [`gsd_core::StatusUpdate::validate()`] first.
//!
//! ## Concurrency
//!
//! Several processes may open the same file. SQLite's file lock serializes
//! writers (with a busy timeout); the last save to a control wins and lost
//! updates are not detected.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Duration;

use gsd_core::{ControlStatus, StatusEntry, StatusRecord, Timestamp};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::StoreError;
use crate::schema::{install_schema, NOW_SQL};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const RECORD_COLUMNS: &str = "control_id, status, notes, changed_by, updated_at";

#[derive(Debug)]
pub struct StatusStore {
    conn: Connection,
}

impl StatusStore {
    /// Open (or create) the database file and bring its schema up to date.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        install_schema(&conn)?;
        tracing::debug!(path = %path.display(), "status store opened");
        Ok(Self { conn })
    }

    /// A private in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        install_schema(&conn)?;
        Ok(Self { conn })
    }

    /// The `(status, notes, changed_by)` triple for a control.
    ///
    /// A control without a record yields all-`None`; that is not an error.
    pub fn get(&self, control_id: &str) -> Result<StatusEntry, StoreError> {
        Ok(StatusEntry::from(self.record(control_id)?.as_ref()))
    }

    /// The full stored record for a control, if any.
    pub fn record(&self, control_id: &str) -> Result<Option<StatusRecord>, StoreError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM control_status WHERE control_id = ?1");
        let row = self
            .conn
            .query_row(&sql, params![control_id], read_raw)
            .optional()?;
        row.map(RawRecord::into_record).transpose()
    }

    /// Replace the record for `control_id` and, if `changed_by` is
    /// non-blank after trimming, refresh the trimmed name in the recency
    /// table.
    ///
    /// `changed_by` is stored on the status row exactly as given, so a
    /// whitespace-only name lands there but never in the recency table.
    pub fn save(
        &mut self,
        control_id: &str,
        status: ControlStatus,
        notes: &str,
        changed_by: &str,
    ) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            &format!(
                "INSERT OR REPLACE INTO control_status
                     (control_id, status, notes, changed_by, updated_at)
                 VALUES (?1, ?2, ?3, ?4, {NOW_SQL})"
            ),
            params![control_id, status.as_str(), notes, changed_by],
        )?;

        let name = changed_by.trim();
        if !name.is_empty() {
            tx.execute(
                &format!(
                    "INSERT INTO users (name, last_used, use_seq)
                     VALUES (?1, {NOW_SQL}, (SELECT COALESCE(MAX(use_seq), 0) + 1 FROM users))
                     ON CONFLICT(name) DO UPDATE SET
                         last_used = excluded.last_used,
                         use_seq = excluded.use_seq"
                ),
                params![name],
            )?;
        }
        tx.commit()?;

        tracing::info!(%control_id, %status, changed_by = %name, "status saved");
        Ok(())
    }

    /// Most recently used names, most recent first, at most `limit`.
    pub fn recent_names(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM users ORDER BY last_used DESC, use_seq DESC, id DESC LIMIT ?1",
        )?;
        let names = stmt
            .query_map(params![sql_limit(limit)], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    /// Name suggestions for editing one control: the recent names, with
    /// the control's own last `changed_by` first when it is not among them.
    pub fn name_suggestions(
        &self,
        control_id: &str,
        limit: usize,
    ) -> Result<Vec<String>, StoreError> {
        let mut names = self.recent_names(limit)?;
        if let Some(last) = self.get(control_id)?.changed_by {
            if !names.contains(&last) {
                names.insert(0, last);
            }
        }
        Ok(names)
    }

    /// Delete every status record. Returns the number of rows removed.
    ///
    /// The name recency table is not touched.
    pub fn reset_all(&mut self) -> Result<usize, StoreError> {
        let removed = self.conn.execute("DELETE FROM control_status", [])?;
        tracing::info!(removed, "all status records deleted");
        Ok(removed)
    }

    /// Read every status record into memory, keyed by control id.
    pub fn snapshot(&self) -> Result<HashMap<String, StatusRecord>, StoreError> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM control_status");
        Ok(self
            .query_records(&sql, [])?
            .into_iter()
            .map(|record| (record.control_id.clone(), record))
            .collect())
    }

    /// The latest `limit` records, newest first.
    pub fn recent_updates(&self, limit: usize) -> Result<Vec<StatusRecord>, StoreError> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM control_status
             ORDER BY updated_at DESC, rowid DESC LIMIT ?1"
        );
        self.query_records(&sql, params![sql_limit(limit)])
    }

    /// Number of stored records per status, independent of the catalog.
    ///
    /// Stored values that read as the same status (the literal and its
    /// label, with or without padding) are summed. Rows with a blank or
    /// unknown status are not counted.
    pub fn status_counts(&self) -> Result<BTreeMap<ControlStatus, usize>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT status, COUNT(*) FROM control_status GROUP BY status")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, Option<String>>(0)?, row.get::<_, i64>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut counts = BTreeMap::new();
        for (literal, count) in rows {
            match ControlStatus::from_stored(literal.as_deref()) {
                Ok(Some(status)) => {
                    *counts.entry(status).or_insert(0) += usize::try_from(count).unwrap_or(0);
                }
                Ok(None) => {}
                Err(_) => {
                    tracing::warn!(status = ?literal, count, "ignoring unknown stored status");
                }
            }
        }
        Ok(counts)
    }

    fn query_records<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> Result<Vec<StatusRecord>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let raw = stmt
            .query_map(params, read_raw)?
            .collect::<Result<Vec<_>, _>>()?;
        raw.into_iter().map(RawRecord::into_record).collect()
    }
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// A row as SQLite returned it, before interpretation.
struct RawRecord {
    control_id: String,
    status: Text,
    notes: Text,
    changed_by: Text,
    updated_at: Text,
}

/// A nullable text column. SQLite is dynamically typed, so numbers may
/// appear where text was written; blobs are rejected later.
enum Text {
    Value(String),
    Null,
    Blob,
}

fn read_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<Text> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => Text::Null,
        ValueRef::Text(bytes) => Text::Value(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Integer(n) => Text::Value(n.to_string()),
        ValueRef::Real(f) => Text::Value(f.to_string()),
        ValueRef::Blob(_) => Text::Blob,
    })
}

fn read_raw(row: &Row<'_>) -> rusqlite::Result<RawRecord> {
    let control_id = match read_text(row, 0)? {
        Text::Value(id) => id,
        Text::Null | Text::Blob => String::new(),
    };
    Ok(RawRecord {
        control_id,
        status: read_text(row, 1)?,
        notes: read_text(row, 2)?,
        changed_by: read_text(row, 3)?,
        updated_at: read_text(row, 4)?,
    })
}

impl RawRecord {
    fn into_record(self) -> Result<StatusRecord, StoreError> {
        let control_id = self.control_id;
        let corrupt = |column: &str| StoreError::CorruptRow {
            control_id: control_id.clone(),
            reason: format!("{column} holds binary data"),
        };

        let status = match self.status {
            Text::Blob => return Err(corrupt("status")),
            Text::Null => None,
            Text::Value(literal) => match ControlStatus::from_stored(Some(literal.as_str())) {
                Ok(status) => status,
                Err(_) => {
                    tracing::warn!(%control_id, status = %literal, "unknown stored status; treating as unset");
                    None
                }
            },
        };

        let notes = match self.notes {
            Text::Blob => return Err(corrupt("notes")),
            Text::Null => String::new(),
            Text::Value(s) => s,
        };
        let changed_by = match self.changed_by {
            Text::Blob => return Err(corrupt("changed_by")),
            Text::Null => String::new(),
            Text::Value(s) => s,
        };

        let updated_at = match self.updated_at {
            Text::Blob => return Err(corrupt("updated_at")),
            Text::Null => None,
            Text::Value(raw) => match Timestamp::parse_sqlite(&raw) {
                Ok(ts) => Some(ts),
                Err(e) => {
                    tracing::warn!(%control_id, error = %e, "unreadable updated_at");
                    None
                }
            },
        };

        Ok(StatusRecord {
            control_id,
            status,
            notes,
            changed_by,
            updated_at,
        })
    }
}
