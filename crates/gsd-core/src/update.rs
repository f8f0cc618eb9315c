//! # Status Update: Validation Gate
//!
//! A `StatusUpdate` is what the interaction layer collects from the user.
//! It must pass [`StatusUpdate::validate()`] before it is handed to the
//! store; the store itself accepts anything.
//!
//! ## Rules
//!
//! - `changed_by` must be non-blank after trimming.
//! - `erfuellt` and `entbehrlich` require non-blank notes pointing at the
//!   evidence or the justification.
//! - `nicht_erfuellt` may be saved without notes.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::status::ControlStatus;

/// A requested status change for one control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub control_id: String,
    pub status: ControlStatus,
    pub notes: String,
    pub changed_by: String,
}

impl StatusUpdate {
    pub fn new(
        control_id: impl Into<String>,
        status: ControlStatus,
        notes: impl Into<String>,
        changed_by: impl Into<String>,
    ) -> Self {
        Self {
            control_id: control_id.into(),
            status,
            notes: notes.into(),
            changed_by: changed_by.into(),
        }
    }

    /// Check the update against the save rules.
    ///
    /// On success the returned update has `changed_by` trimmed; notes are
    /// kept verbatim.
    pub fn validate(self) -> Result<Self, ValidationError> {
        let changed_by = self.changed_by.trim().to_string();
        if changed_by.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.status.requires_notes() && self.notes.trim().is_empty() {
            return Err(ValidationError::MissingNotes {
                status: self.status,
            });
        }
        Ok(Self { changed_by, ..self })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fulfilled_without_notes_rejected() {
        let err = StatusUpdate::new("C1", ControlStatus::Fulfilled, "  ", "Alice")
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingNotes {
                status: ControlStatus::Fulfilled
            }
        );
    }

    #[test]
    fn test_dispensable_without_notes_rejected() {
        let err = StatusUpdate::new("C1", ControlStatus::Dispensable, "", "Alice")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingNotes { .. }));
    }

    #[test]
    fn test_blank_name_rejected_first() {
        let err = StatusUpdate::new("C1", ControlStatus::Fulfilled, "", " \t")
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingName);
    }

    #[test]
    fn test_not_fulfilled_without_notes_accepted() {
        let update = StatusUpdate::new("C1", ControlStatus::NotFulfilled, "", "Bob")
            .validate()
            .unwrap();
        assert_eq!(update.notes, "");
    }

    #[test]
    fn test_name_is_trimmed() {
        let update = StatusUpdate::new("C1", ControlStatus::Fulfilled, "Doc at /x", "  Alice ")
            .validate()
            .unwrap();
        assert_eq!(update.changed_by, "Alice");
        assert_eq!(update.notes, "Doc at /x");
    }
}
