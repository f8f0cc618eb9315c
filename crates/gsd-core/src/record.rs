//! # Status Records
//!
//! The persisted per-control state and the read-side views of it.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::status::ControlStatus;
use crate::temporal::Timestamp;

/// The stored state of one control. At most one exists per control id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Control identifier (primary key).
    pub control_id: String,
    /// Current status; `None` only for rows written with a blank status.
    pub status: Option<ControlStatus>,
    /// Free-text notes, possibly empty.
    pub notes: String,
    /// Name of the person who made the last change, possibly empty.
    pub changed_by: String,
    /// Time of the last write, if the column could be read.
    pub updated_at: Option<Timestamp>,
}

/// The `(status, notes, changed_by)` triple returned for a lookup.
///
/// Blank text fields are reported as `None`, and a control without a
/// record yields all-`None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusEntry {
    pub status: Option<ControlStatus>,
    pub notes: Option<String>,
    pub changed_by: Option<String>,
}

impl From<Option<&StatusRecord>> for StatusEntry {
    fn from(record: Option<&StatusRecord>) -> Self {
        let Some(record) = record else {
            return Self::default();
        };
        Self {
            status: record.status,
            notes: non_blank(&record.notes),
            changed_by: non_blank(&record.changed_by),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Read access to the current status of controls.
///
/// Filtering, reporting and export only need lookups by id; implementing
/// this for an in-memory snapshot keeps them free of store access.
pub trait StatusLookup {
    /// The record for a control, if one exists.
    fn record(&self, control_id: &str) -> Option<&StatusRecord>;

    /// The current status of a control (`None` = unset).
    fn status_of(&self, control_id: &str) -> Option<ControlStatus> {
        self.record(control_id).and_then(|r| r.status)
    }

    /// The lookup triple for a control.
    fn lookup(&self, control_id: &str) -> StatusEntry {
        StatusEntry::from(self.record(control_id))
    }
}

impl StatusLookup for HashMap<String, StatusRecord> {
    fn record(&self, control_id: &str) -> Option<&StatusRecord> {
        self.get(control_id)
    }
}

impl StatusLookup for BTreeMap<String, StatusRecord> {
    fn record(&self, control_id: &str) -> Option<&StatusRecord> {
        self.get(control_id)
    }
}

impl<T: StatusLookup + ?Sized> StatusLookup for &T {
    fn record(&self, control_id: &str) -> Option<&StatusRecord> {
        (**self).record(control_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, status: ControlStatus, notes: &str, by: &str) -> StatusRecord {
        StatusRecord {
            control_id: id.to_string(),
            status: Some(status),
            notes: notes.to_string(),
            changed_by: by.to_string(),
            updated_at: None,
        }
    }

    #[test]
    fn test_missing_record_is_all_none() {
        let map: HashMap<String, StatusRecord> = HashMap::new();
        assert_eq!(map.lookup("C1"), StatusEntry::default());
        assert!(map.status_of("C1").is_none());
    }

    #[test]
    fn test_blank_fields_become_none() {
        let mut map = HashMap::new();
        map.insert(
            "C1".to_string(),
            record("C1", ControlStatus::NotFulfilled, "", ""),
        );
        let entry = map.lookup("C1");
        assert_eq!(entry.status, Some(ControlStatus::NotFulfilled));
        assert_eq!(entry.notes, None);
        assert_eq!(entry.changed_by, None);
    }

    #[test]
    fn test_btree_lookup() {
        let mut map = BTreeMap::new();
        map.insert(
            "C2".to_string(),
            record("C2", ControlStatus::Fulfilled, "Doc at /x", "Alice"),
        );
        let entry = map.lookup("C2");
        assert_eq!(entry.notes.as_deref(), Some("Doc at /x"));
        assert_eq!(entry.changed_by.as_deref(), Some("Alice"));
    }
}
