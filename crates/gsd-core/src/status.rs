//! # Control Status: Single Source of Truth
//!
//! Defines the `ControlStatus` enum with the three states a user can set on
//! a control. The stored literals are German ASCII transliterations and are
//! part of the on-disk format: existing databases contain exactly these
//! strings, so they must never change.
//!
//! | Variant | Stored literal | Display label |
//! |---------|----------------|---------------|
//! | `Fulfilled` | `erfuellt` | Erfüllt |
//! | `NotFulfilled` | `nicht_erfuellt` | Nicht erfüllt |
//! | `Dispensable` | `entbehrlich` | Entbehrlich |
//!
//! A control without a record is "unset" and displays as [`UNSET_LABEL`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::GsdError;

/// Display label for a control that has no status record.
pub const UNSET_LABEL: &str = "Ohne Status";

/// Compliance state of a single control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ControlStatus {
    /// The requirement is met.
    #[serde(rename = "erfuellt")]
    Fulfilled,
    /// The requirement is not (yet) met.
    #[serde(rename = "nicht_erfuellt")]
    NotFulfilled,
    /// The requirement does not apply and has been justified away.
    #[serde(rename = "entbehrlich")]
    Dispensable,
}

impl ControlStatus {
    /// Returns all statuses in display order.
    pub fn all() -> &'static [ControlStatus] {
        &[Self::Fulfilled, Self::NotFulfilled, Self::Dispensable]
    }

    /// The literal written to the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fulfilled => "erfuellt",
            Self::NotFulfilled => "nicht_erfuellt",
            Self::Dispensable => "entbehrlich",
        }
    }

    /// German display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fulfilled => "Erfüllt",
            Self::NotFulfilled => "Nicht erfüllt",
            Self::Dispensable => "Entbehrlich",
        }
    }

    /// Whether a save with this status must carry non-blank notes.
    ///
    /// Fulfilled and dispensable controls need a pointer to the evidence
    /// (document location, link, justification).
    pub fn requires_notes(&self) -> bool {
        matches!(self, Self::Fulfilled | Self::Dispensable)
    }

    /// Whether this status counts toward completion progress.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Fulfilled | Self::Dispensable)
    }

    /// Parse a stored literal, treating blank as unset.
    ///
    /// Used when reading rows: `NULL` and `""` both mean "no status".
    pub fn from_stored(value: Option<&str>) -> Result<Option<Self>, GsdError> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

impl std::fmt::Display for ControlStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlStatus {
    type Err = GsdError;

    /// Accepts the stored literal or the German label (label match is
    /// case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "erfuellt" => return Ok(Self::Fulfilled),
            "nicht_erfuellt" => return Ok(Self::NotFulfilled),
            "entbehrlich" => return Ok(Self::Dispensable),
            _ => {}
        }
        let folded = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|status| status.label().to_lowercase() == folded)
            .ok_or_else(|| GsdError::UnknownStatus(s.to_string()))
    }
}

/// Status criterion of a control filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No status restriction.
    #[default]
    All,
    /// Only controls without a status record.
    Unset,
    /// Only controls whose current status equals the given one.
    Is(ControlStatus),
}

impl StatusFilter {
    /// Whether a control with the given current status passes.
    pub fn matches(&self, current: Option<ControlStatus>) -> bool {
        match self {
            Self::All => true,
            Self::Unset => current.is_none(),
            Self::Is(wanted) => current == Some(*wanted),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = GsdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "alle" => Ok(Self::All),
            "unset" | "none" | "ohne status" | "ohne_status" => Ok(Self::Unset),
            _ => s.parse().map(Self::Is),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_roundtrip() {
        for status in ControlStatus::all() {
            let parsed: ControlStatus = status.as_str().parse().unwrap();
            assert_eq!(*status, parsed);
        }
    }

    #[test]
    fn test_labels_parse() {
        assert_eq!("Erfüllt".parse::<ControlStatus>().unwrap(), ControlStatus::Fulfilled);
        assert_eq!(
            "nicht erfüllt".parse::<ControlStatus>().unwrap(),
            ControlStatus::NotFulfilled
        );
        assert_eq!("ENTBEHRLICH".parse::<ControlStatus>().unwrap(), ControlStatus::Dispensable);
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("fulfilled".parse::<ControlStatus>().is_err());
        assert!("".parse::<ControlStatus>().is_err());
        assert!("unset".parse::<ControlStatus>().is_err());
    }

    #[test]
    fn test_serde_format_matches_as_str() {
        for status in ControlStatus::all() {
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_from_stored_blank_is_unset() {
        assert_eq!(ControlStatus::from_stored(None).unwrap(), None);
        assert_eq!(ControlStatus::from_stored(Some("")).unwrap(), None);
        assert_eq!(
            ControlStatus::from_stored(Some("entbehrlich")).unwrap(),
            Some(ControlStatus::Dispensable)
        );
        assert!(ControlStatus::from_stored(Some("garbage")).is_err());
    }

    #[test]
    fn test_notes_requirement() {
        assert!(ControlStatus::Fulfilled.requires_notes());
        assert!(ControlStatus::Dispensable.requires_notes());
        assert!(!ControlStatus::NotFulfilled.requires_notes());
    }

    #[test]
    fn test_status_filter_parse_and_match() {
        let all: StatusFilter = "Alle".parse().unwrap();
        let unset: StatusFilter = "Ohne Status".parse().unwrap();
        let fulfilled: StatusFilter = "erfuellt".parse().unwrap();

        assert!(all.matches(None));
        assert!(all.matches(Some(ControlStatus::NotFulfilled)));
        assert!(unset.matches(None));
        assert!(!unset.matches(Some(ControlStatus::Fulfilled)));
        assert!(fulfilled.matches(Some(ControlStatus::Fulfilled)));
        assert!(!fulfilled.matches(None));
        assert!(!fulfilled.matches(Some(ControlStatus::Dispensable)));
    }
}
