//! # Error Types: Structured Error Hierarchy
//!
//! Errors shared across the dashboard crates. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations. Crate-specific
//! failures (catalog loading, SQLite, CSV) live next to the code that
//! raises them and wrap these where needed.

use thiserror::Error;

use crate::status::ControlStatus;

/// Top-level error type for the domain layer.
#[derive(Error, Debug)]
pub enum GsdError {
    /// A status literal that is not one of the known values.
    #[error("unknown control status: {0:?}")]
    UnknownStatus(String),

    /// A timestamp string that could not be interpreted.
    #[error("invalid timestamp: {0}")]
    Timestamp(String),
}

/// Rejection reasons for a status save.
///
/// Raised by [`crate::StatusUpdate::validate`]; a rejected update never
/// reaches the store, so no partial write can occur.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The responsible person's name is blank.
    #[error("a name is required for every status change")]
    MissingName,

    /// Notes are mandatory for this status but were blank.
    #[error("notes are required when the status is {status} (where is the evidence stored?)")]
    MissingNotes {
        /// The status that requires notes.
        status: ControlStatus,
    },
}
